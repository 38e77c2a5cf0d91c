//! CLI command implementations.

mod clear;
mod config;
mod delete;
mod doctor;
mod list;
mod process;
mod profile;
mod retry;
mod save;
mod show;
mod stats;

pub use clear::run_clear;
pub use config::run_config;
pub use delete::run_delete;
pub use doctor::run_doctor;
pub use list::run_list;
pub use process::run_process;
pub use profile::run_profile;
pub use retry::run_retry;
pub use save::run_save;
pub use show::run_show;
pub use stats::run_stats;

use crate::cli::Output;
use crate::config::Settings;
use crate::error::{KikuError, Result};
use crate::record::{AudioFileRecord, ConversationKind, Language, VeterinaryContext};
use crate::storage::{JsonFileStore, KeyValueStore};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// Open the key-value store backing the library and profiles.
fn open_storage(settings: &Settings) -> Result<Arc<dyn KeyValueStore>> {
    Ok(Arc::new(JsonFileStore::new(&settings.storage_dir())?))
}

fn parse_kind(kind: &str) -> Result<ConversationKind> {
    kind.parse().map_err(KikuError::InvalidInput)
}

fn parse_language(language: &str) -> Result<Language> {
    language.parse().map_err(KikuError::InvalidInput)
}

fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|e| KikuError::InvalidInput(format!("Invalid record id: {}", e)))
}

/// Build the veterinary context from CLI flags.
///
/// For non-veterinary kinds the dog and purpose flags are ignored with a
/// warning rather than rejected.
fn veterinary_context(
    kind: ConversationKind,
    dogs: &[String],
    purpose: Option<&str>,
) -> Result<Option<VeterinaryContext>> {
    if kind != ConversationKind::Veterinary {
        if !dogs.is_empty() || purpose.is_some() {
            Output::warning("--dog and --purpose only apply to veterinary recordings, ignoring");
        }
        return Ok(None);
    }

    let selected: HashSet<Uuid> = dogs
        .iter()
        .map(|d| {
            Uuid::parse_str(d)
                .map_err(|e| KikuError::InvalidInput(format!("Invalid dog id '{}': {}", d, e)))
        })
        .collect::<Result<_>>()?;

    Ok(Some(VeterinaryContext::new(
        selected,
        purpose.unwrap_or_default(),
    )))
}

/// Print the outcome of a completed pipeline run.
fn print_processed(record: &AudioFileRecord) {
    if let AudioFileRecord::Processed(r) = record {
        Output::header("Summary");
        println!("{}\n", r.summary);

        Output::kv("Record id", &r.id.to_string());
        Output::kv("Duration", &super::output::format_duration(r.duration_seconds));
        Output::kv(
            "Cost",
            &format!(
                "${:.4} (transcription ${:.4}, summary ${:.4})",
                r.total_cost(),
                r.transcription_cost,
                r.summarization_cost
            ),
        );
        Output::kv("Tokens", &r.token_count.to_string());
    }
}
