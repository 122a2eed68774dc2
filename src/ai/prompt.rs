//! 反馈提示词组装与输出清理

use super::FeedbackContext;

/// 系统提示词
pub const SYSTEM_PROMPT: &str = "You are a helpful educational assistant providing constructive \
feedback to students. Your goal is to help them improve through specific, actionable advice.";

/// 组装用户提示词
///
/// 包含课程/作业背景、教师侧重点（可选）、重交说明（可选）、学生提交内容
/// 以及对输出 HTML 结构的要求。
pub fn build_prompt(ctx: &FeedbackContext) -> String {
    let instructor_guidance = ctx
        .ai_prompt
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| format!("\n\nTeacher's Specific Focus Areas: {s}"))
        .unwrap_or_default();

    let revision_context = if ctx.is_revision {
        "\n\nThis is a revised submission. The student has improved their work based on previous AI feedback."
    } else {
        ""
    };

    format!(
        "You are an educational AI assistant helping students improve their work.\n\
        \n\
        Course: {course_title}\n\
        Course Description: {course_description}\n\
        Assignment: {assignment_title}\n\
        Assignment Description: {assignment_description}{instructor_guidance}{revision_context}\n\
        \n\
        Student's Submission:\n\
        {content}\n\
        \n\
        Please provide constructive feedback in HTML format. Structure your feedback as follows:\n\
        \n\
        <h4>Strengths</h4>\n\
        <ul>\n\
        <li>List 2-3 specific things the student did well</li>\n\
        </ul>\n\
        \n\
        <h4>Areas for Improvement</h4>\n\
        <ul>\n\
        <li>Provide 3-4 specific, actionable suggestions</li>\n\
        <li>When relevant, quote specific parts using <blockquote> tags</li>\n\
        </ul>\n\
        \n\
        <h4>Next Steps</h4>\n\
        <ul>\n\
        <li>1-2 concrete actions the student can take to improve</li>\n\
        </ul>\n\
        \n\
        Use <strong> for emphasis. Be specific, constructive, and encouraging.",
        course_title = ctx.course_title,
        course_description = ctx.course_description.as_deref().unwrap_or(""),
        assignment_title = ctx.assignment_title,
        assignment_description = ctx.assignment_description.as_deref().unwrap_or(""),
        content = ctx.content,
    )
}

/// 清理模型输出：去掉 markdown 代码围栏并裁剪首尾空白
pub fn clean_feedback(raw: &str) -> String {
    raw.replace("```html\n", "")
        .replace("```html", "")
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> FeedbackContext {
        FeedbackContext {
            course_title: "Intro to Biology".to_string(),
            course_description: Some("Cells and ecosystems".to_string()),
            assignment_title: "Essay 1".to_string(),
            assignment_description: Some("Describe the cell cycle".to_string()),
            ai_prompt: None,
            is_revision: false,
            content: "The cell cycle has four phases.".to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_context() {
        let prompt = build_prompt(&context());
        assert!(prompt.contains("Intro to Biology"));
        assert!(prompt.contains("Essay 1"));
        assert!(prompt.contains("The cell cycle has four phases."));
        assert!(prompt.contains("<h4>Strengths</h4>"));
        assert!(!prompt.contains("Teacher's Specific Focus Areas"));
        assert!(!prompt.contains("revised submission"));
    }

    #[test]
    fn test_prompt_includes_teacher_guidance() {
        let mut ctx = context();
        ctx.ai_prompt = Some("Focus on citations".to_string());
        let prompt = build_prompt(&ctx);
        assert!(prompt.contains("Teacher's Specific Focus Areas: Focus on citations"));
    }

    #[test]
    fn test_prompt_ignores_blank_guidance() {
        let mut ctx = context();
        ctx.ai_prompt = Some("   ".to_string());
        let prompt = build_prompt(&ctx);
        assert!(!prompt.contains("Teacher's Specific Focus Areas"));
    }

    #[test]
    fn test_prompt_marks_revision() {
        let mut ctx = context();
        ctx.is_revision = true;
        let prompt = build_prompt(&ctx);
        assert!(prompt.contains("This is a revised submission."));
    }

    #[test]
    fn test_clean_feedback_strips_fences() {
        let raw = "```html\n<h4>Strengths</h4>\n<ul><li>Good</li></ul>\n```\n";
        assert_eq!(
            clean_feedback(raw),
            "<h4>Strengths</h4>\n<ul><li>Good</li></ul>"
        );
    }

    #[test]
    fn test_clean_feedback_trims_whitespace() {
        assert_eq!(clean_feedback("  <p>ok</p>  "), "<p>ok</p>");
    }

    #[test]
    fn test_clean_feedback_passthrough() {
        let plain = "<p>No fences here.</p>";
        assert_eq!(clean_feedback(plain), plain);
    }
}
