use serde::Serialize;
use ts_rs::TS;

use crate::models::submissions::entities::Submission;

/// 提交结果响应：保存的提交、本次反馈、是否为重交
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmitAssignmentResponse {
    pub submission: Submission,
    pub ai_feedback: String,
    pub is_update: bool,
}

/// 教师视角的提交列表项（附学生信息）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListItem {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub student_email: String,
    pub content: String,
    pub ai_feedback: Option<String>,
    pub grade: Option<i32>,
    pub teacher_feedback: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 某作业的全部提交
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionListItem>,
}
