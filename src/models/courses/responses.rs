use serde::Serialize;
use ts_rs::TS;

/// 学生在某课程下的单个作业成绩
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct GradeReportItem {
    pub assignment_id: i64,
    pub assignment_title: String,
    pub grade: Option<i32>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 学生课程成绩单
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseGradesResponse {
    pub items: Vec<GradeReportItem>,
}
