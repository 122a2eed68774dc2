//! 数据模型定义
//!
//! 业务实体、请求/响应模型与统一响应包装。

pub mod assignments;
pub mod auth;
pub mod common;
pub mod courses;
pub mod submissions;
pub mod users;

pub use common::response::ApiResponse;

/// 应用启动时间（用于统计启动耗时）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误代码
///
/// 通用代码沿用 HTTP 状态码语义，领域代码按模块分段：
/// 1xxx 认证、2xxx 用户、3xxx 课程、4xxx 作业、5xxx 提交。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorCode {
    Success = 200,
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    InternalServerError = 500,

    AuthFailed = 1001,
    RegisterFailed = 1002,

    UserNotFound = 2001,
    UserEmailAlreadyExists = 2002,
    UserEmailInvalid = 2003,
    UserPasswordInvalid = 2004,
    UserNameInvalid = 2005,

    CourseNotFound = 3001,
    CourseCreationFailed = 3002,
    CoursePermissionDenied = 3003,

    AssignmentNotFound = 4001,
    AssignmentCreationFailed = 4002,
    AssignmentDeleteFailed = 4003,

    SubmissionNotFound = 5001,
    SubmissionFailed = 5002,
    GradeUpdateFailed = 5003,
}
