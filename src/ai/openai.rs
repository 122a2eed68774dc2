//! OpenAI 兼容接口的反馈生成器

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::ai::{FeedbackContext, FeedbackGenerator, prompt};
use crate::config::AppConfig;
use crate::errors::{ClassHubError, Result};

/// chat/completions 请求体
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// chat/completions 响应体（只取需要的字段）
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

pub struct OpenAiFeedbackGenerator {
    client: reqwest::Client,
}

impl Default for OpenAiFeedbackGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenAiFeedbackGenerator {
    pub fn new() -> Self {
        let config = AppConfig::get();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.ai.timeout))
            .build()
            .expect("Failed to build HTTP client for feedback generator");

        Self { client }
    }
}

#[async_trait]
impl FeedbackGenerator for OpenAiFeedbackGenerator {
    async fn generate(&self, ctx: &FeedbackContext) -> Result<String> {
        let config = AppConfig::get();

        if config.ai.api_key.is_empty() {
            return Err(ClassHubError::feedback_generation(
                "AI API key is not configured",
            ));
        }

        let user_prompt = prompt::build_prompt(ctx);
        let request = ChatCompletionRequest {
            model: &config.ai.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            temperature: config.ai.temperature,
            max_tokens: config.ai.max_tokens,
        };

        let url = format!("{}/chat/completions", config.ai.api_base.trim_end_matches('/'));
        debug!("Requesting AI feedback from {} (model: {})", url, config.ai.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&config.ai.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassHubError::feedback_generation(format!(
                "AI API returned {status}: {body}"
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ClassHubError::feedback_generation(format!("解析 AI 响应失败: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ClassHubError::feedback_generation("AI API returned no content"))?;

        Ok(prompt::clean_feedback(&content))
    }
}
