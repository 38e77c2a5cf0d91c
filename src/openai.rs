//! OpenAI HTTP client configuration and credential resolution.

use crate::config::Settings;
use crate::error::{KikuError, Result};
use std::time::Duration;

/// Default timeout for OpenAI API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Conventional prefix of OpenAI API keys, checked at the point of entry.
pub const API_KEY_PREFIX: &str = "sk-";

/// Create an HTTP client with the configured timeout.
///
/// The timeout is the only place a hung request gets cut off; the clients
/// themselves never retry.
pub fn create_client(timeout_secs: u64) -> Result<reqwest::Client> {
    let timeout = if timeout_secs == 0 {
        DEFAULT_TIMEOUT_SECS
    } else {
        timeout_secs
    };

    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout))
        .build()
        .map_err(KikuError::Network)
}

/// Resolve the API key: environment variable first, then stored settings.
///
/// Returns `None` when neither source has a non-empty key; callers fail with
/// [`KikuError::MissingApiKey`] at the point of use.
pub fn resolve_api_key(settings: &Settings) -> Option<String> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.is_empty() {
            return Some(key);
        }
    }
    settings
        .api
        .api_key
        .as_ref()
        .filter(|k| !k.is_empty())
        .cloned()
}

/// Loose format check applied when a key is entered, not on every request.
pub fn looks_like_api_key(key: &str) -> bool {
    key.starts_with(API_KEY_PREFIX)
}

/// Mask a key for display, keeping a short prefix and suffix.
///
/// Counts characters, not bytes; the env var can carry arbitrary text.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 11 {
        let prefix: String = chars[..7].iter().collect();
        let suffix: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", prefix, suffix)
    } else {
        "***".to_string()
    }
}
