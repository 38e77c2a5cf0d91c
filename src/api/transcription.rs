//! Whisper API transcription client.

use super::{Transcribe, TranscriptionResult};
use crate::config::Settings;
use crate::cost;
use crate::error::{KikuError, Result};
use crate::openai::{create_client, resolve_api_key};
use crate::record::Language;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, instrument};

/// Bytes-per-minute heuristic for duration estimation: 1 MB ≈ 1 minute of
/// audio at typical recording quality.
const BYTES_PER_MINUTE: f64 = 1024.0 * 1024.0;

#[derive(Debug, Deserialize)]
struct WhisperResponse {
    text: String,
}

/// Speech-to-text client for the OpenAI transcription endpoint.
pub struct WhisperClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl WhisperClient {
    /// Build a client from settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            client: create_client(settings.api.timeout_secs)?,
            endpoint: settings.api.transcription_url.clone(),
            model: settings.api.transcription_model.clone(),
            api_key: resolve_api_key(settings),
        })
    }

    fn require_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(KikuError::MissingApiKey),
        }
    }

    /// Approximate the audio duration from the asset's file size.
    ///
    /// TODO: read the exact duration from the audio container instead of
    /// estimating from size.
    pub async fn estimate_duration(asset_path: &Path) -> Result<f64> {
        let metadata = tokio::fs::metadata(asset_path).await?;
        Ok(metadata.len() as f64 / BYTES_PER_MINUTE * 60.0)
    }

    fn parse_response(body: &str) -> Result<String> {
        let response: WhisperResponse = serde_json::from_str(body)
            .map_err(|e| KikuError::InvalidResponse(format!("transcription body: {}", e)))?;
        Ok(response.text)
    }
}

#[async_trait]
impl Transcribe for WhisperClient {
    #[instrument(skip(self), fields(asset = %asset_path.display()))]
    async fn transcribe(&self, asset_path: &Path, language: Language) -> Result<TranscriptionResult> {
        let key = self.require_key()?.to_string();

        let duration_seconds = Self::estimate_duration(asset_path).await?;
        let audio_bytes = tokio::fs::read(asset_path).await?;
        let filename = asset_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.m4a")
            .to_string();

        debug!("Uploading {} bytes to {}", audio_bytes.len(), self.model);

        let form = reqwest::multipart::Form::new()
            .text("model", self.model.clone())
            .text("language", language.code())
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio_bytes)
                    .file_name(filename)
                    .mime_str("audio/m4a")?,
            );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(key)
            .multipart(form)
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
        let text = Self::parse_response(&body)?;

        Ok(TranscriptionResult {
            text,
            cost: cost::transcription_cost(duration_seconds),
            duration_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_without_key() -> WhisperClient {
        let mut settings = Settings::default();
        settings.api.api_key = None;
        WhisperClient {
            client: create_client(settings.api.timeout_secs).unwrap(),
            endpoint: settings.api.transcription_url.clone(),
            model: settings.api.transcription_model.clone(),
            api_key: None,
        }
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_io() {
        let client = client_without_key();
        // The asset does not exist; a missing key must surface first.
        let err = client
            .transcribe(Path::new("/nonexistent/audio.m4a"), Language::English)
            .await
            .unwrap_err();
        assert!(matches!(err, KikuError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_duration_estimate_from_file_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.m4a");
        // 1 MiB of audio ≈ 60 seconds under the heuristic.
        std::fs::write(&path, vec![0u8; 1024 * 1024]).unwrap();

        let duration = WhisperClient::estimate_duration(&path).await.unwrap();
        assert!((duration - 60.0).abs() < 1e-9);

        let half = dir.path().join("half.m4a");
        std::fs::write(&half, vec![0u8; 512 * 1024]).unwrap();
        let duration = WhisperClient::estimate_duration(&half).await.unwrap();
        assert!((duration - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_response() {
        let text = WhisperClient::parse_response(r#"{"text":"hello world"}"#).unwrap();
        assert_eq!(text, "hello world");

        let err = WhisperClient::parse_response("{\"nope\":true}").unwrap_err();
        assert!(matches!(err, KikuError::InvalidResponse(_)));

        let err = WhisperClient::parse_response("<html>busy</html>").unwrap_err();
        assert!(matches!(err, KikuError::InvalidResponse(_)));
    }
}
