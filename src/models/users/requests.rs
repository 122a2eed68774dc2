use serde::Deserialize;
use ts_rs::TS;

use crate::models::users::entities::UserRole;

/// 注册/创建用户请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
}
