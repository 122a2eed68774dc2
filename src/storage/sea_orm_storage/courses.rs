//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{ClassHubError, Result};
use crate::models::courses::{
    entities::Course,
    requests::CreateCourseRequest,
    responses::GradeReportItem,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(
        &self,
        teacher_id: i64,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            teacher_id: Set(teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 列出全部课程
    pub async fn list_courses_impl(&self) -> Result<Vec<Course>> {
        let results = Courses::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_course()).collect())
    }

    /// 学生课程成绩单：课程下每个作业一行，带该学生的成绩与提交时间
    pub async fn list_course_grades_impl(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Vec<GradeReportItem>> {
        // 1. 查询课程下的作业
        let assignments = Assignments::find()
            .filter(AssignmentColumn::CourseId.eq(course_id))
            .order_by_asc(AssignmentColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询作业列表失败: {e}")))?;

        if assignments.is_empty() {
            return Ok(vec![]);
        }

        // 2. 批量查询该学生在这些作业下的提交
        let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
        let submissions = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids))
            .filter(SubmissionColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交失败: {e}")))?;

        let submission_map: HashMap<i64, _> = submissions
            .into_iter()
            .map(|s| (s.assignment_id, s))
            .collect();

        // 3. 组装成绩单
        let items = assignments
            .into_iter()
            .map(|a| {
                let sub = submission_map.get(&a.id);
                GradeReportItem {
                    assignment_id: a.id,
                    assignment_title: a.title,
                    grade: sub.and_then(|s| s.grade),
                    submitted_at: sub.map(|s| {
                        chrono::DateTime::from_timestamp(s.submitted_at, 0).unwrap_or_default()
                    }),
                }
            })
            .collect();

        Ok(items)
    }
}
