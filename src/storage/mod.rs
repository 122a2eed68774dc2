use std::sync::Arc;

use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    courses::{
        entities::Course,
        requests::CreateCourseRequest,
        responses::GradeReportItem,
    },
    submissions::{
        entities::Submission,
        requests::GradeSubmissionRequest,
        responses::SubmissionListItem,
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段此时应已是哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, teacher_id: i64, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses(&self) -> Result<Vec<Course>>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(
        &self,
        course_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业信息
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 列出课程下的作业
    async fn list_assignments_by_course(&self, course_id: i64) -> Result<Vec<Assignment>>;
    // 删除作业及其全部提交（单事务）
    async fn delete_assignment_with_submissions(&self, assignment_id: i64) -> Result<bool>;

    /// 提交管理方法
    // 写入提交：同一 (作业, 学生) 已有记录则原地覆盖，否则新建；返回是否为重交
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: String,
        ai_feedback: String,
    ) -> Result<(Submission, bool)>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 获取某学生对某作业的提交
    async fn get_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出某作业的全部提交（附学生姓名/邮箱）
    async fn list_submissions_with_students(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionListItem>>;
    // 评分：写入 grade 和 teacher_feedback
    async fn grade_submission(
        &self,
        submission_id: i64,
        req: GradeSubmissionRequest,
    ) -> Result<Option<Submission>>;
    // 学生在某课程下的成绩单（每个作业一行）
    async fn list_course_grades(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Vec<GradeReportItem>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
