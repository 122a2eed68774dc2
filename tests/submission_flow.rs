//! 提交 + AI 反馈业务流程集成测试
//!
//! 用内存里的假生成器替代真实模型调用：生成失败时提交仍要保存并带上
//! 兜底反馈；生成成功时反馈原样落库；权限检查拦截跨学生/跨课程访问。

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use actix_web::http::StatusCode;
use actix_web::{HttpMessage, HttpRequest, test::TestRequest, web};
use async_trait::async_trait;

use classhub::ai::{FALLBACK_FEEDBACK, FeedbackContext, FeedbackGenerator};
use classhub::errors::{ClassHubError, Result};
use classhub::models::assignments::requests::CreateAssignmentRequest;
use classhub::models::courses::requests::CreateCourseRequest;
use classhub::models::submissions::requests::{GradeSubmissionRequest, SubmitAssignmentRequest};
use classhub::models::users::entities::{User, UserRole};
use classhub::models::users::requests::CreateUserRequest;
use classhub::services::SubmissionService;
use classhub::storage::Storage;
use classhub::storage::sea_orm_storage::SeaOrmStorage;

static DB_COUNTER: AtomicU32 = AtomicU32::new(0);

/// 始终失败的生成器，模拟模型服务不可用
struct FailingGenerator;

#[async_trait]
impl FeedbackGenerator for FailingGenerator {
    async fn generate(&self, _ctx: &FeedbackContext) -> Result<String> {
        Err(ClassHubError::feedback_generation("model service offline"))
    }
}

/// 返回固定文案的生成器
struct CannedGenerator(&'static str);

#[async_trait]
impl FeedbackGenerator for CannedGenerator {
    async fn generate(&self, ctx: &FeedbackContext) -> Result<String> {
        // 重交时提示词必须带上修改稿说明
        if ctx.is_revision {
            assert!(
                classhub::ai::prompt::build_prompt(ctx).contains("revised submission"),
                "revision context should appear in the prompt"
            );
        }
        Ok(self.0.to_string())
    }
}

async fn test_storage() -> SeaOrmStorage {
    let path = std::env::temp_dir().join(format!(
        "classhub-flow-test-{}-{}.db",
        std::process::id(),
        DB_COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    let _ = std::fs::remove_file(&path);
    let url = format!("sqlite://{}?mode=rwc", path.display());
    SeaOrmStorage::new_with_url(&url, 1, 10)
        .await
        .expect("Failed to create test storage")
}

struct TestEnv {
    storage: Arc<dyn Storage>,
    teacher: User,
    student: User,
    course_id: i64,
    assignment_id: i64,
}

async fn seed_env() -> TestEnv {
    let storage = test_storage().await;

    let teacher = storage
        .create_user(CreateUserRequest {
            email: "teacher@example.com".to_string(),
            password: "not-a-real-hash".to_string(),
            name: "Ms. Finch".to_string(),
            role: UserRole::Teacher,
        })
        .await
        .unwrap();
    let student = storage
        .create_user(CreateUserRequest {
            email: "student@example.com".to_string(),
            password: "not-a-real-hash".to_string(),
            name: "Sam Doe".to_string(),
            role: UserRole::Student,
        })
        .await
        .unwrap();

    let course = storage
        .create_course(
            teacher.id,
            CreateCourseRequest {
                title: "Intro to Biology".to_string(),
                description: Some("Cells and ecosystems".to_string()),
            },
        )
        .await
        .unwrap();
    let assignment = storage
        .create_assignment(
            course.id,
            CreateAssignmentRequest {
                title: "Essay 1".to_string(),
                description: Some("Describe the cell cycle".to_string()),
                due_date: None,
                ai_prompt: Some("Focus on terminology".to_string()),
            },
        )
        .await
        .unwrap();

    TestEnv {
        storage: Arc::new(storage),
        teacher,
        student,
        course_id: course.id,
        assignment_id: assignment.id,
    }
}

/// 构造带存储、生成器和当前用户的请求
fn build_request(
    storage: &Arc<dyn Storage>,
    generator: Arc<dyn FeedbackGenerator>,
    current_user: Option<&User>,
) -> HttpRequest {
    let req = TestRequest::default()
        .app_data(web::Data::new(storage.clone()))
        .app_data(web::Data::new(generator))
        .to_http_request();
    if let Some(user) = current_user {
        req.extensions_mut().insert(user.clone());
    }
    req
}

#[actix_web::test]
async fn failed_generation_still_saves_submission_with_fallback() {
    let env = seed_env().await;
    let generator: Arc<dyn FeedbackGenerator> = Arc::new(FailingGenerator);
    let req = build_request(&env.storage, generator, Some(&env.student));

    let service = SubmissionService::new_lazy();
    let response = service
        .submit_assignment(
            &req,
            env.assignment_id,
            env.student.id,
            SubmitAssignmentRequest {
                content: "The cell cycle has four phases.".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // 提交已保存，反馈为兜底文案
    let saved = env
        .storage
        .get_submission(env.assignment_id, env.student.id)
        .await
        .unwrap()
        .expect("submission should be saved even when the AI call fails");
    assert_eq!(saved.ai_feedback.as_deref(), Some(FALLBACK_FEEDBACK));
    assert_eq!(saved.content, "The cell cycle has four phases.");
}

#[actix_web::test]
async fn successful_generation_is_stored_and_resubmission_overwrites() {
    let env = seed_env().await;
    let service = SubmissionService::new_lazy();

    // 首次提交
    let generator: Arc<dyn FeedbackGenerator> = Arc::new(CannedGenerator("<p>Solid start.</p>"));
    let req = build_request(&env.storage, generator, Some(&env.student));
    let response = service
        .submit_assignment(
            &req,
            env.assignment_id,
            env.student.id,
            SubmitAssignmentRequest {
                content: "Draft one.".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let first = env
        .storage
        .get_submission(env.assignment_id, env.student.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.ai_feedback.as_deref(), Some("<p>Solid start.</p>"));

    // 重交：同一行被覆盖
    let generator: Arc<dyn FeedbackGenerator> = Arc::new(CannedGenerator("<p>Much improved.</p>"));
    let req = build_request(&env.storage, generator, Some(&env.student));
    let response = service
        .submit_assignment(
            &req,
            env.assignment_id,
            env.student.id,
            SubmitAssignmentRequest {
                content: "Draft two.".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let second = env
        .storage
        .get_submission(env.assignment_id, env.student.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.content, "Draft two.");
    assert_eq!(second.ai_feedback.as_deref(), Some("<p>Much improved.</p>"));
}

#[actix_web::test]
async fn submitting_to_missing_assignment_returns_not_found() {
    let env = seed_env().await;
    let generator: Arc<dyn FeedbackGenerator> = Arc::new(FailingGenerator);
    let req = build_request(&env.storage, generator, Some(&env.student));

    let response = SubmissionService::new_lazy()
        .submit_assignment(
            &req,
            9999,
            env.student.id,
            SubmitAssignmentRequest {
                content: "Anything".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn student_cannot_read_another_students_submission() {
    let env = seed_env().await;
    let service = SubmissionService::new_lazy();

    let other = env
        .storage
        .create_user(CreateUserRequest {
            email: "other@example.com".to_string(),
            password: "not-a-real-hash".to_string(),
            name: "Nia Park".to_string(),
            role: UserRole::Student,
        })
        .await
        .unwrap();

    env.storage
        .upsert_submission(
            env.assignment_id,
            env.student.id,
            "Draft".to_string(),
            "<p>feedback</p>".to_string(),
        )
        .await
        .unwrap();

    // 其他学生读取 -> 403
    let generator: Arc<dyn FeedbackGenerator> = Arc::new(FailingGenerator);
    let req = build_request(&env.storage, generator, Some(&other));
    let response = service
        .get_submission(&req, env.assignment_id, env.student.id)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // 授课教师读取 -> 200
    let generator: Arc<dyn FeedbackGenerator> = Arc::new(FailingGenerator);
    let req = build_request(&env.storage, generator, Some(&env.teacher));
    let response = service
        .get_submission(&req, env.assignment_id, env.student.id)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn only_the_course_teacher_can_grade() {
    let env = seed_env().await;
    let service = SubmissionService::new_lazy();

    let (submission, _) = env
        .storage
        .upsert_submission(
            env.assignment_id,
            env.student.id,
            "Draft".to_string(),
            "<p>feedback</p>".to_string(),
        )
        .await
        .unwrap();

    // 另一位教师（不教这门课）-> 403
    let outsider = env
        .storage
        .create_user(CreateUserRequest {
            email: "other-teacher@example.com".to_string(),
            password: "not-a-real-hash".to_string(),
            name: "Mr. Hale".to_string(),
            role: UserRole::Teacher,
        })
        .await
        .unwrap();
    let generator: Arc<dyn FeedbackGenerator> = Arc::new(FailingGenerator);
    let req = build_request(&env.storage, generator, Some(&outsider));
    let response = service
        .grade_submission(
            &req,
            submission.id,
            GradeSubmissionRequest {
                grade: 10,
                teacher_feedback: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // 授课教师 -> 200，评分落库
    let generator: Arc<dyn FeedbackGenerator> = Arc::new(FailingGenerator);
    let req = build_request(&env.storage, generator, Some(&env.teacher));
    let response = service
        .grade_submission(
            &req,
            submission.id,
            GradeSubmissionRequest {
                grade: 95,
                teacher_feedback: Some("Well argued".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let graded = env
        .storage
        .get_submission_by_id(submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(graded.grade, Some(95));
    assert_eq!(graded.teacher_feedback.as_deref(), Some("Well argued"));

    // 课程本身不受评分影响
    assert!(
        env.storage
            .get_course_by_id(env.course_id)
            .await
            .unwrap()
            .is_some()
    );
}
