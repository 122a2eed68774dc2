//! 缓存层
//!
//! 通过 ctor 插件注册表选择后端：moka（进程内）或 redis。
//! 目前用于 JWT 中间件缓存 token -> 用户 的查询结果。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明一个缓存插件并在进程启动时注册到注册表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $cache_type:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<register_ $cache_type:snake _plugin>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = <$cache_type>::new()
                                .map_err($crate::errors::ClassHubError::cache_connection)?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        }) as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
