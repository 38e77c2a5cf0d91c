//! Clear command implementation.

use super::open_storage;
use crate::cli::Output;
use crate::config::Settings;
use crate::library::RecordStore;
use anyhow::Result;

/// Run the clear command.
pub fn run_clear(force: bool, settings: Settings) -> Result<()> {
    let store = RecordStore::load(open_storage(&settings)?)?;

    if store.is_empty() {
        Output::info("Library is already empty.");
        return Ok(());
    }

    if !force {
        Output::warning(&format!(
            "This deletes all {} record(s) and their audio files. Re-run with --force to confirm.",
            store.len()
        ));
        return Ok(());
    }

    let count = store.len();
    store.clear()?;
    Output::success(&format!("Deleted {} record(s).", count));

    Ok(())
}
