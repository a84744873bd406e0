use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use kwr_core::{Post, Sentiment, Summarize};

use crate::error::SummarizeError;
use crate::prompt::build_prompt;
use crate::sentiment::sentiment_of;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Fixed sampling parameters for the report's summaries: moderate
/// randomness, bounded output length.
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: i64 = 300;

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// Every request carries a hard timeout; the reference system's unbounded
/// blocking call is not reproduced.
pub struct LlmClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl LlmClient {
    /// Create a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, SummarizeError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SummarizeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SummarizeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_owned(),
        })
    }

    /// Run one single-turn completion and return the trimmed response text.
    ///
    /// # Errors
    ///
    /// - [`SummarizeError::Http`] on network failure or timeout.
    /// - [`SummarizeError::Api`] on a non-2xx status.
    /// - [`SummarizeError::Malformed`] when the body parses but carries no
    ///   completion choice.
    pub async fn complete(&self, prompt: &str) -> Result<String, SummarizeError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| SummarizeError::Malformed(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| SummarizeError::Malformed("response carried no choices".to_string()))
    }
}

#[async_trait]
impl Summarize for LlmClient {
    async fn summarize(&self, posts: &[Post], keyword: &str) -> (String, Sentiment) {
        let prompt = build_prompt(posts, keyword);
        match self.complete(&prompt).await {
            Ok(summary) => {
                let sentiment = sentiment_of(&summary);
                (summary, sentiment)
            }
            Err(e) => {
                tracing::warn!(keyword, error = %e, "summary generation failed");
                (
                    format!("Error generating summary for {keyword}: {e}"),
                    Sentiment::Unknown,
                )
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: i64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}
