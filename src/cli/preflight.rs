//! Pre-flight checks before expensive operations.
//!
//! Validates that credentials and storage are available before starting
//! operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{KikuError, Result};
use crate::openai::{looks_like_api_key, resolve_api_key};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Processing a recording requires an API key.
    Process,
    /// Library reads have no external requirements.
    Library,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Process => {
            check_api_key(settings)?;
        }
        Operation::Library => {
            // No external requirements for library access
        }
    }
    Ok(())
}

/// Check that an OpenAI API key is configured somewhere.
fn check_api_key(settings: &Settings) -> Result<()> {
    match resolve_api_key(settings) {
        Some(key) => {
            if !looks_like_api_key(&key) {
                tracing::warn!("API key does not start with 'sk-'; requests may be rejected");
            }
            Ok(())
        }
        None => Err(KikuError::Config(
            "No API key configured. Set it with: export OPENAI_API_KEY='sk-...' \
             or: kiku config set-key sk-..."
                .to_string(),
        )),
    }
}
