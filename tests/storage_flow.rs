//! 存储层集成测试
//!
//! 使用临时 SQLite 数据库跑迁移后验证核心数据约束：
//! 邮箱唯一、同一 (作业, 学生) 只保留一行提交、评分可见、删除作业级联清理提交。

use std::sync::atomic::{AtomicU32, Ordering};

use classhub::models::assignments::requests::CreateAssignmentRequest;
use classhub::models::courses::requests::CreateCourseRequest;
use classhub::models::submissions::requests::GradeSubmissionRequest;
use classhub::models::users::entities::UserRole;
use classhub::models::users::requests::CreateUserRequest;
use classhub::storage::Storage;
use classhub::storage::sea_orm_storage::SeaOrmStorage;

static DB_COUNTER: AtomicU32 = AtomicU32::new(0);

async fn test_storage() -> SeaOrmStorage {
    let path = std::env::temp_dir().join(format!(
        "classhub-test-{}-{}.db",
        std::process::id(),
        DB_COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    let _ = std::fs::remove_file(&path);
    let url = format!("sqlite://{}?mode=rwc", path.display());
    SeaOrmStorage::new_with_url(&url, 1, 10)
        .await
        .expect("Failed to create test storage")
}

fn user_request(email: &str, name: &str, role: UserRole) -> CreateUserRequest {
    CreateUserRequest {
        email: email.to_string(),
        password: "not-a-real-hash".to_string(),
        name: name.to_string(),
        role,
    }
}

async fn seed_assignment(storage: &SeaOrmStorage) -> (i64, i64, i64) {
    let teacher = storage
        .create_user(user_request("teacher@example.com", "Ms. Finch", UserRole::Teacher))
        .await
        .unwrap();
    let student = storage
        .create_user(user_request("student@example.com", "Sam Doe", UserRole::Student))
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
                ai_prompt: None,
            },
        )
        .await
        .unwrap();
    (assignment.id, student.id, course.id)
}

#[actix_web::test]
async fn duplicate_email_is_rejected() {
    let storage = test_storage().await;

    let first = storage
        .create_user(user_request("dup@example.com", "First", UserRole::Student))
        .await;
    assert!(first.is_ok());

    let second = storage
        .create_user(user_request("dup@example.com", "Second", UserRole::Student))
        .await;
    assert!(second.is_err(), "unique email constraint should reject the second row");

    // 原有记录不受影响
    let kept = storage
        .get_user_by_email("dup@example.com")
        .await
        .unwrap()
        .expect("first user should still exist");
    assert_eq!(kept.name, "First");
}

#[actix_web::test]
async fn resubmission_updates_the_same_row() {
    let storage = test_storage().await;
    let (assignment_id, student_id, _) = seed_assignment(&storage).await;

    let (first, is_update) = storage
        .upsert_submission(
            assignment_id,
            student_id,
            "draft one".to_string(),
            "<p>feedback one</p>".to_string(),
        )
        .await
        .unwrap();
    assert!(!is_update);

    let (second, is_update) = storage
        .upsert_submission(
            assignment_id,
            student_id,
            "draft two".to_string(),
            "<p>feedback two</p>".to_string(),
        )
        .await
        .unwrap();
    assert!(is_update);
    assert_eq!(first.id, second.id, "resubmission must overwrite the existing row");
    assert_eq!(second.content, "draft two");

    let items = storage
        .list_submissions_with_students(assignment_id)
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].student_name, "Sam Doe");
    assert_eq!(items[0].student_email, "student@example.com");
}

#[actix_web::test]
async fn grading_persists_and_is_visible() {
    let storage = test_storage().await;
    let (assignment_id, student_id, _) = seed_assignment(&storage).await;

    let (submission, _) = storage
        .upsert_submission(
            assignment_id,
            student_id,
            "draft".to_string(),
            "<p>feedback</p>".to_string(),
        )
        .await
        .unwrap();

    let graded = storage
        .grade_submission(
            submission.id,
            GradeSubmissionRequest {
                grade: 92,
                teacher_feedback: Some("Strong structure".to_string()),
            },
        )
        .await
        .unwrap()
        .expect("submission should exist");
    assert_eq!(graded.grade, Some(92));

    // 下一次读取必须看到评分
    let fetched = storage
        .get_submission(assignment_id, student_id)
        .await
        .unwrap()
        .expect("submission should exist");
    assert_eq!(fetched.grade, Some(92));
    assert_eq!(fetched.teacher_feedback.as_deref(), Some("Strong structure"));
    // AI 反馈与教师反馈互不覆盖
    assert_eq!(fetched.ai_feedback.as_deref(), Some("<p>feedback</p>"));
}

#[actix_web::test]
async fn grading_missing_submission_returns_none() {
    let storage = test_storage().await;

    let result = storage
        .grade_submission(
            9999,
            GradeSubmissionRequest {
                grade: 50,
                teacher_feedback: None,
            },
        )
        .await
        .unwrap();
    assert!(result.is_none());
}

#[actix_web::test]
async fn deleting_assignment_removes_its_submissions() {
    let storage = test_storage().await;
    let (assignment_id, student_id, course_id) = seed_assignment(&storage).await;

    storage
        .upsert_submission(
            assignment_id,
            student_id,
            "draft".to_string(),
            "<p>feedback</p>".to_string(),
        )
        .await
        .unwrap();

    let deleted = storage
        .delete_assignment_with_submissions(assignment_id)
        .await
        .unwrap();
    assert!(deleted);

    assert!(
        storage
            .get_assignment_by_id(assignment_id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        storage
            .get_submission(assignment_id, student_id)
            .await
            .unwrap()
            .is_none()
    );
    // 课程本身不受影响
    assert!(storage.get_course_by_id(course_id).await.unwrap().is_some());
}

#[actix_web::test]
async fn course_grade_report_lists_every_assignment() {
    let storage = test_storage().await;
    let (assignment_id, student_id, course_id) = seed_assignment(&storage).await;

    // 第二个作业，学生未提交
    let unsubmitted = storage
        .create_assignment(
            course_id,
            CreateAssignmentRequest {
                title: "Essay 2".to_string(),
                description: None,
                due_date: None,
                ai_prompt: None,
            },
        )
        .await
        .unwrap();

    let (submission, _) = storage
        .upsert_submission(
            assignment_id,
            student_id,
            "draft".to_string(),
            "<p>feedback</p>".to_string(),
        )
        .await
        .unwrap();
    storage
        .grade_submission(
            submission.id,
            GradeSubmissionRequest {
                grade: 88,
                teacher_feedback: None,
            },
        )
        .await
        .unwrap();

    let report = storage
        .list_course_grades(course_id, student_id)
        .await
        .unwrap();
    assert_eq!(report.len(), 2);

    let graded = report
        .iter()
        .find(|item| item.assignment_id == assignment_id)
        .unwrap();
    assert_eq!(graded.grade, Some(88));
    assert!(graded.submitted_at.is_some());

    let pending = report
        .iter()
        .find(|item| item.assignment_id == unsubmitted.id)
        .unwrap();
    assert_eq!(pending.grade, None);
    assert!(pending.submitted_at.is_none());
}
