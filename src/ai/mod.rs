//! AI 反馈生成层
//!
//! 学生提交作业后调用托管大模型生成点评。生成器放在 trait 后面，
//! 业务层和测试不需要接触网络实现。生成失败时由业务层替换为固定的
//! 兜底文案，提交本身始终会被保存。

pub mod openai;
pub mod prompt;

use std::sync::Arc;

use crate::errors::Result;

/// 生成失败时的兜底反馈
pub const FALLBACK_FEEDBACK: &str = "<p>Unable to generate AI feedback at this time. \
Your submission has been saved and your teacher will review it.</p>";

/// 反馈生成所需的上下文
#[derive(Debug, Clone)]
pub struct FeedbackContext {
    pub course_title: String,
    pub course_description: Option<String>,
    pub assignment_title: String,
    pub assignment_description: Option<String>,
    /// 教师配置的侧重点提示
    pub ai_prompt: Option<String>,
    /// 是否为重交（提示模型这是基于上次反馈的修改稿）
    pub is_revision: bool,
    /// 学生提交内容
    pub content: String,
}

#[async_trait::async_trait]
pub trait FeedbackGenerator: Send + Sync {
    /// 生成反馈文本（HTML 片段，已做清理）
    async fn generate(&self, ctx: &FeedbackContext) -> Result<String>;
}

pub fn create_feedback_generator() -> Arc<dyn FeedbackGenerator> {
    Arc::new(openai::OpenAiFeedbackGenerator::new())
}
