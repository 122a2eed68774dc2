use async_trait::async_trait;

/// 缓存查询结果
///
/// `ExistsButNoValue` 表示后端暂时不可用或取值失败，调用方应回源处理。
#[derive(Debug, Clone)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}
