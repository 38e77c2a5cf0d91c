//! Configuration module for Kiku.
//!
//! Handles loading and managing application settings and the prompt table.

mod prompts;
mod settings;

pub use prompts::{render_user_prompt, system_prompt, user_prompt_template, TRANSCRIPT_PLACEHOLDER};
pub use settings::{ApiSettings, GeneralSettings, Settings, StorageSettings};
