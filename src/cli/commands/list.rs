//! List command implementation.

use super::open_storage;
use crate::cli::Output;
use crate::config::Settings;
use crate::library::RecordStore;
use anyhow::Result;

/// Run the list command.
pub fn run_list(settings: Settings) -> Result<()> {
    let store = RecordStore::load(open_storage(&settings)?)?;

    let records = store.records();
    if records.is_empty() {
        Output::info("No recordings yet. Use 'kiku process <audio>' to add one.");
        return Ok(());
    }

    Output::header(&format!("Recordings ({})", records.len()));
    println!();

    for record in &records {
        Output::record_line(record);
    }

    println!();
    Output::kv("Pending", &store.pending_count().to_string());
    Output::kv("Processed", &store.processed_count().to_string());
    Output::kv("Total spend", &format!("${:.4}", store.total_cost()));

    Ok(())
}
