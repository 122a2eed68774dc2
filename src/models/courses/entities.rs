use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    // 唯一 ID
    pub id: i64,
    // 课程标题
    pub title: String,
    // 课程描述
    pub description: Option<String>,
    // 授课教师 ID
    pub teacher_id: i64,
    // 课程创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 课程更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
