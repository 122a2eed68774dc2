use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubmissionService;
use crate::ai::{FALLBACK_FEEDBACK, FeedbackContext};
use crate::models::submissions::{
    requests::SubmitAssignmentRequest,
    responses::SubmitAssignmentResponse,
};
use crate::models::{ApiResponse, ErrorCode};

/// 提交作业
/// POST /assignments/{assignment_id}/submit
///
/// 流程：查作业和课程 -> 查是否已有提交 -> 生成 AI 反馈（失败则用兜底文案）
/// -> 覆盖或新建提交行。AI 调用失败不会让提交失败。
pub async fn submit_assignment(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
    student_id: i64,
    req: SubmitAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if req.content.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SubmissionFailed,
            "提交内容不能为空",
        )));
    }

    // 1. 获取作业信息
    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作业失败: {e}"),
                )),
            );
        }
    };

    // 2. 获取课程信息（反馈提示词需要课程背景）
    let course = match storage.get_course_by_id(assignment.course_id).await {
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

    // 3. 查询是否已有提交（决定提示词中的重交说明）
    let existing = match storage.get_submission(assignment_id, student_id).await {
        Ok(existing) => existing,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交失败: {e}"),
                )),
            );
        }
    };

    // 4. 生成 AI 反馈；失败时替换为兜底文案，提交流程继续
    let ctx = FeedbackContext {
        course_title: course.title.clone(),
        course_description: course.description.clone(),
        assignment_title: assignment.title.clone(),
        assignment_description: assignment.description.clone(),
        ai_prompt: assignment.ai_prompt.clone(),
        is_revision: existing.is_some(),
        content: req.content.clone(),
    };

    let generator = service.get_feedback_generator(request);
    let ai_feedback = match generator.generate(&ctx).await {
        Ok(feedback) => feedback,
        Err(e) => {
            error!("AI feedback generation failed: {}", e);
            FALLBACK_FEEDBACK.to_string()
        }
    };

    // 5. 覆盖或新建提交行
    match storage
        .upsert_submission(assignment_id, student_id, req.content, ai_feedback.clone())
        .await
    {
        Ok((submission, is_update)) => {
            info!(
                "Submission {} for assignment {} by student {} ({})",
                submission.id,
                assignment_id,
                student_id,
                if is_update { "updated" } else { "created" }
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmitAssignmentResponse {
                    submission,
                    ai_feedback,
                    is_update,
                },
                "提交成功",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::SubmissionFailed,
                format!("保存提交失败: {e}"),
            )),
        ),
    }
}
