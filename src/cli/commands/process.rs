//! Process command implementation.

use super::{open_storage, parse_kind, parse_language, print_processed, veterinary_context};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{Orchestrator, Recording};
use anyhow::Result;

/// Run the process command.
pub async fn run_process(
    audio: &str,
    kind: &str,
    language: &str,
    dogs: &[String],
    purpose: Option<String>,
    settings: Settings,
) -> Result<()> {
    preflight::check(Operation::Process, &settings)?;

    let kind = parse_kind(kind)?;
    let language = parse_language(language)?;
    let veterinary = veterinary_context(kind, dogs, purpose.as_deref())?;

    let path = Settings::expand_path(audio);
    if !path.exists() {
        anyhow::bail!("Audio file not found: {}", path.display());
    }

    let storage = open_storage(&settings)?;
    let orchestrator = Orchestrator::new(&settings, storage)?;

    let recording = Recording::from_path(&path);
    Output::info(&format!("Processing {}...", recording.filename));

    let record = orchestrator
        .process(recording, kind, language, veterinary)
        .await?;

    Output::success("Processing complete.");
    print_processed(&record);

    Ok(())
}
