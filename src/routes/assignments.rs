use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::submissions::requests::SubmitAssignmentRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{AssignmentService, SubmissionService};
use crate::utils::SafeAssignmentIdI64;

// 懒加载的全局服务实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 删除作业（连同提交）
pub async fn delete_assignment(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ASSIGNMENT_SERVICE
        .delete_assignment(&req, path.0, user_id)
        .await
}

// 提交作业（学生身份取自令牌）
pub async fn submit_assignment(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
    body: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    SUBMISSION_SERVICE
        .submit_assignment(&req, path.0, user_id, body.into_inner())
        .await
}

// 列出某作业的全部提交（教师视角）
pub async fn list_all_submissions(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.list_all_submissions(&req, path.0).await
}

// 获取某学生对某作业的提交
pub async fn get_submission(
    req: HttpRequest,
    path: web::Path<(i64, i64)>, // (assignment_id, student_id)
) -> ActixResult<HttpResponse> {
    let (assignment_id, student_id) = path.into_inner();
    SUBMISSION_SERVICE
        .get_submission(&req, assignment_id, student_id)
        .await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{assignment_id}")
                    // 删除作业 - 仅教师（归属校验在业务层）
                    .route(
                        web::delete()
                            .to(delete_assignment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            // 提交作业 - 所有登录用户可访问
            .service(
                web::resource("/{assignment_id}/submit").route(web::post().to(submit_assignment)),
            )
            // 全部提交 - 仅教师（归属校验在业务层）
            .service(
                web::resource("/{assignment_id}/submissions").route(
                    web::get()
                        .to(list_all_submissions)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            // 单个学生的提交 - 学生本人或授课教师（权限在业务层检查）
            .service(
                web::resource("/{assignment_id}/submissions/{student_id}")
                    .route(web::get().to(get_submission)),
            ),
    );
}
