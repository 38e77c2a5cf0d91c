//! Speech-to-text and summarization API clients.
//!
//! Both clients make a single attempt per call; retry policy belongs to the
//! caller. Failures map onto the four-way taxonomy in [`crate::error`]:
//! missing key, transport failure, non-2xx status, unparseable success body.

mod summarization;
mod transcription;

pub use summarization::ChatSummarizer;
pub use transcription::WhisperClient;

use crate::error::Result;
use crate::record::{ConversationKind, Language};
use async_trait::async_trait;
use std::path::Path;

/// Result of transcribing one audio asset.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionResult {
    pub text: String,
    /// USD cost of the call, from the measured duration.
    pub cost: f64,
    pub duration_seconds: f64,
}

/// Result of summarizing one transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizationResult {
    pub text: String,
    /// USD cost of the call, from reported token usage.
    pub cost: f64,
    /// Total tokens (prompt + completion) reported by the endpoint.
    pub token_count: u32,
}

/// Trait for transcription backends.
#[async_trait]
pub trait Transcribe: Send + Sync {
    /// Transcribe the audio asset at `asset_path`.
    async fn transcribe(&self, asset_path: &Path, language: Language) -> Result<TranscriptionResult>;
}

/// Trait for summarization backends.
#[async_trait]
pub trait Summarize: Send + Sync {
    /// Summarize a transcript, optionally with profile context injected
    /// into the prompt.
    async fn summarize(
        &self,
        transcript: &str,
        kind: ConversationKind,
        language: Language,
        profile_context: Option<&str>,
    ) -> Result<SummarizationResult>;
}
