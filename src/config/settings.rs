//! Configuration settings for Kiku.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub api: ApiSettings,
    pub storage: StorageSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.kiku".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// OpenAI API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Stored API key. The OPENAI_API_KEY environment variable takes
    /// precedence when set.
    pub api_key: Option<String>,
    /// Transcription endpoint URL.
    pub transcription_url: String,
    /// Chat completion endpoint URL.
    pub chat_url: String,
    /// Transcription model.
    pub transcription_model: String,
    /// Summarization model.
    pub summary_model: String,
    /// Maximum tokens for the generated summary.
    pub max_summary_tokens: u32,
    /// Sampling temperature for summarization.
    pub temperature: f32,
    /// HTTP timeout for API requests, in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            transcription_url: "https://api.openai.com/v1/audio/transcriptions".to_string(),
            chat_url: "https://api.openai.com/v1/chat/completions".to_string(),
            transcription_model: "whisper-1".to_string(),
            summary_model: "gpt-3.5-turbo".to_string(),
            max_summary_tokens: 500,
            temperature: 0.3,
            timeout_secs: 300,
        }
    }
}

/// Key-value storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the persisted snapshots (records, profiles).
    pub dir: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            dir: "~/.kiku/store".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::KikuError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kiku")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded storage directory path.
    pub fn storage_dir(&self) -> PathBuf {
        Self::expand_path(&self.storage.dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api.transcription_model, "whisper-1");
        assert_eq!(settings.api.max_summary_tokens, 500);
        assert!((settings.api.temperature - 0.3).abs() < f32::EPSILON);
        assert!(settings.api.api_key.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.api.summary_model = "gpt-4o-mini".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.api.summary_model, "gpt-4o-mini");
        assert_eq!(loaded.api.max_summary_tokens, 500);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = PathBuf::from("/nonexistent/kiku/config.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.general.log_level, "info");
    }
}
