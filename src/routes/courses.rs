use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{AssignmentService, CourseService};
use crate::utils::SafeCourseIdI64;

// 懒加载的全局服务实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 列出课程
pub async fn list_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req).await
}

// 创建课程
pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseRequest>,
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

    COURSE_SERVICE
        .create_course(&req, user_id, body.into_inner())
        .await
}

// 获取课程详情
pub async fn get_course(req: HttpRequest, path: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, path.0).await
}

// 列出课程下的作业
pub async fn list_assignments(
    req: HttpRequest,
    path: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_assignments(&req, path.0).await
}

// 在课程下布置作业
pub async fn create_assignment(
    req: HttpRequest,
    path: SafeCourseIdI64,
    body: web::Json<CreateAssignmentRequest>,
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
        .create_assignment(&req, path.0, user_id, body.into_inner())
        .await
}

// 获取学生的课程成绩单
pub async fn get_student_grades(
    req: HttpRequest,
    path: web::Path<(i64, i64)>, // (course_id, student_id)
) -> ActixResult<HttpResponse> {
    let (course_id, student_id) = path.into_inner();
    COURSE_SERVICE
        .get_student_grades(&req, course_id, student_id)
        .await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出课程 - 所有登录用户可访问
                    .route(web::get().to(list_courses))
                    // 创建课程 - 仅教师
                    .route(
                        web::post()
                            .to(create_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            // 课程详情 - 所有登录用户可访问
            .service(web::resource("/{course_id}").route(web::get().to(get_course)))
            .service(
                web::resource("/{course_id}/assignments")
                    // 列出作业 - 所有登录用户可访问
                    .route(web::get().to(list_assignments))
                    // 布置作业 - 仅教师（归属校验在业务层）
                    .route(
                        web::post()
                            .to(create_assignment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            // 成绩单 - 学生本人或授课教师（权限在业务层检查）
            .service(
                web::resource("/{course_id}/students/{student_id}/grades")
                    .route(web::get().to(get_student_grades)),
            ),
    );
}
