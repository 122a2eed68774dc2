//! 提交存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ClassHubError, Result};
use crate::models::submissions::{
    entities::Submission,
    requests::GradeSubmissionRequest,
    responses::SubmissionListItem,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 写入提交：同一 (作业, 学生) 已有记录则原地覆盖，否则新建
    ///
    /// 查找与写入放在同一事务中，配合 (assignment_id, student_id) 唯一索引
    /// 保证并发重交不会产生第二行。
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: String,
        ai_feedback: String,
    ) -> Result<(Submission, bool)> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&txn)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交失败: {e}")))?;

        let (model, is_update) = match existing {
            Some(found) => {
                let mut active: ActiveModel = found.into();
                active.content = Set(content);
                active.ai_feedback = Set(Some(ai_feedback));
                active.updated_at = Set(now);

                let updated = active
                    .update(&txn)
                    .await
                    .map_err(|e| ClassHubError::database_operation(format!("更新提交失败: {e}")))?;
                (updated, true)
            }
            None => {
                let active = ActiveModel {
                    assignment_id: Set(assignment_id),
                    student_id: Set(student_id),
                    content: Set(content),
                    ai_feedback: Set(Some(ai_feedback)),
                    submitted_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };

                let inserted = active
                    .insert(&txn)
                    .await
                    .map_err(|e| ClassHubError::database_operation(format!("创建提交失败: {e}")))?;
                (inserted, false)
            }
        };

        txn.commit()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((model.into_submission(), is_update))
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取某学生对某作业的提交
    pub async fn get_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出某作业的全部提交（附学生姓名/邮箱）
    pub async fn list_submissions_with_students_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionListItem>> {
        let submissions = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交列表失败: {e}")))?;

        if submissions.is_empty() {
            return Ok(vec![]);
        }

        // 批量查询学生信息
        let student_ids: Vec<i64> = submissions
            .iter()
            .map(|s| s.student_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let students = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询学生信息失败: {e}")))?;

        let student_map: HashMap<i64, _> = students.into_iter().map(|u| (u.id, u)).collect();

        // 组装 SubmissionListItem
        let items = submissions
            .into_iter()
            .map(|s| {
                let student = student_map.get(&s.student_id);
                SubmissionListItem {
                    id: s.id,
                    student_id: s.student_id,
                    student_name: student
                        .map(|u| u.name.clone())
                        .unwrap_or_else(|| "未知学生".to_string()),
                    student_email: student.map(|u| u.email.clone()).unwrap_or_default(),
                    content: s.content,
                    ai_feedback: s.ai_feedback,
                    grade: s.grade,
                    teacher_feedback: s.teacher_feedback,
                    submitted_at: chrono::DateTime::from_timestamp(s.submitted_at, 0)
                        .unwrap_or_default(),
                    updated_at: chrono::DateTime::from_timestamp(s.updated_at, 0)
                        .unwrap_or_default(),
                }
            })
            .collect();

        Ok(items)
    }

    /// 评分：写入 grade 和 teacher_feedback
    pub async fn grade_submission_impl(
        &self,
        submission_id: i64,
        req: GradeSubmissionRequest,
    ) -> Result<Option<Submission>> {
        // 先检查提交是否存在
        let existing = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交失败: {e}")))?;

        let Some(found) = existing else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();

        let mut active: ActiveModel = found.into();
        active.grade = Set(Some(req.grade));
        active.teacher_feedback = Set(req.teacher_feedback);
        active.updated_at = Set(now);

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("更新评分失败: {e}")))?;

        Ok(Some(updated.into_submission()))
    }
}
