use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    // 唯一 ID
    pub id: i64,
    // 关联的作业 ID
    pub assignment_id: i64,
    // 提交学生 ID
    pub student_id: i64,
    // 提交内容
    pub content: String,
    // AI 生成的反馈（HTML 片段）
    pub ai_feedback: Option<String>,
    // 教师评分
    pub grade: Option<i32>,
    // 教师评语
    pub teacher_feedback: Option<String>,
    // 首次提交时间
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    // 最近更新时间（重交或评分）
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
