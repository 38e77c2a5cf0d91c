//! Chat-completion summarization client.

use super::{SummarizationResult, Summarize};
use crate::config::{render_user_prompt, system_prompt, Settings};
use crate::cost;
use crate::error::{KikuError, Result};
use crate::openai::{create_client, resolve_api_key};
use crate::record::{ConversationKind, Language};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Returned when the endpoint reports success but no choices. A soft
/// fallback, not an error: the token usage is still real and billed.
const NO_SUMMARY_FALLBACK: &str = "No summary generated";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: ChatUsage,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

/// Summarization client for the OpenAI chat completion endpoint.
pub struct ChatSummarizer {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    api_key: Option<String>,
}

impl ChatSummarizer {
    /// Build a client from settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            client: create_client(settings.api.timeout_secs)?,
            endpoint: settings.api.chat_url.clone(),
            model: settings.api.summary_model.clone(),
            max_tokens: settings.api.max_summary_tokens,
            temperature: settings.api.temperature,
            api_key: resolve_api_key(settings),
        })
    }

    fn require_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(KikuError::MissingApiKey),
        }
    }

    fn build_request(
        &self,
        transcript: &str,
        kind: ConversationKind,
        language: Language,
        profile_context: Option<&str>,
    ) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt(kind, language).to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: render_user_prompt(kind, language, transcript, profile_context),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    fn parse_response(body: &str) -> Result<(String, u32)> {
        let response: ChatResponse = serde_json::from_str(body)
            .map_err(|e| KikuError::InvalidResponse(format!("summarization body: {}", e)))?;

        let text = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_else(|| NO_SUMMARY_FALLBACK.to_string());

        Ok((text, response.usage.total_tokens))
    }
}

#[async_trait]
impl Summarize for ChatSummarizer {
    #[instrument(skip(self, transcript, profile_context), fields(kind = %kind, language = %language))]
    async fn summarize(
        &self,
        transcript: &str,
        kind: ConversationKind,
        language: Language,
        profile_context: Option<&str>,
    ) -> Result<SummarizationResult> {
        let key = self.require_key()?.to_string();

        let request = self.build_request(transcript, kind, language, profile_context);
        debug!("Requesting summary from {}", self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(KikuError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let (text, token_count) = Self::parse_response(&body)?;

        Ok(SummarizationResult {
            text,
            cost: cost::summarization_cost(token_count),
            token_count,
        })
    }
}
