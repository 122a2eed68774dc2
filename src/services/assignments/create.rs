use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_name;

/// 创建作业
/// POST /courses/{course_id}/assignments
pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    course_id: i64,
    user_id: i64,
    req: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 课程必须存在
    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "课程不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询课程失败: {e}"),
                )),
            );
        }
    };

    // 权限检查：只有授课教师可以布置作业
    if course.teacher_id != user_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "只能在自己的课程下布置作业",
        )));
    }

    // 标题不能为空
    if let Err(msg) = validate_name(&req.title) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AssignmentCreationFailed,
            msg,
        )));
    }

    match storage.create_assignment(course_id, req).await {
        Ok(assignment) => {
            info!(
                "Assignment {} created in course {} by {}",
                assignment.id, course_id, user_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(assignment, "Assignment created successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::AssignmentCreationFailed,
                format!("创建作业失败: {e}"),
            )),
        ),
    }
}
