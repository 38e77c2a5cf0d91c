//! Save command implementation.

use super::{open_storage, parse_kind, parse_language, veterinary_context};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{Orchestrator, Recording};
use anyhow::Result;

/// Run the save command. Stores a pending record without touching the API.
pub fn run_save(
    audio: &str,
    kind: &str,
    language: &str,
    dogs: &[String],
    purpose: Option<String>,
    settings: Settings,
) -> Result<()> {
    let kind = parse_kind(kind)?;
    let language = parse_language(language)?;
    let veterinary = veterinary_context(kind, dogs, purpose.as_deref())?;

    let path = Settings::expand_path(audio);
    if !path.exists() {
        anyhow::bail!("Audio file not found: {}", path.display());
    }

    let storage = open_storage(&settings)?;
    let orchestrator = Orchestrator::new(&settings, storage)?;

    let record = orchestrator.save_for_later(Recording::from_path(&path), kind, language, veterinary)?;

    Output::success(&format!(
        "Saved {} for later processing.",
        record.filename()
    ));
    Output::kv("Record id", &record.id().to_string());
    Output::info("Process it with: kiku retry <id>");

    Ok(())
}
