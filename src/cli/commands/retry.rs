//! Retry command implementation.

use super::{open_storage, parse_id, print_processed};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the retry command. Processes a previously saved pending record.
pub async fn run_retry(id: &str, settings: Settings) -> Result<()> {
    preflight::check(Operation::Process, &settings)?;

    let id = parse_id(id)?;
    let storage = open_storage(&settings)?;
    let orchestrator = Orchestrator::new(&settings, storage)?;

    Output::info(&format!("Processing record {}...", id));
    let record = orchestrator.process_pending(id).await?;

    Output::success("Processing complete.");
    print_processed(&record);

    Ok(())
}
