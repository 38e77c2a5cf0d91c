//! Error types for Kiku.

use thiserror::Error;

/// Library-level error type for Kiku operations.
#[derive(Error, Debug)]
pub enum KikuError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API key is missing. Set OPENAI_API_KEY or store one with 'kiku config set-key'")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for Kiku operations.
pub type Result<T> = std::result::Result<T, KikuError>;
