//! Delete command implementation.

use super::{open_storage, parse_id};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result as KikuResult;
use crate::library::RecordStore;
use anyhow::Result;
use uuid::Uuid;

/// Run the delete command.
pub fn run_delete(ids: &[String], settings: Settings) -> Result<()> {
    let ids: Vec<Uuid> = ids.iter().map(|id| parse_id(id)).collect::<KikuResult<_>>()?;

    let store = RecordStore::load(open_storage(&settings)?)?;

    let known: Vec<Uuid> = ids
        .iter()
        .copied()
        .filter(|id| store.get(*id).is_some())
        .collect();
    for id in ids.iter().filter(|id| !known.contains(id)) {
        Output::warning(&format!("No record with id {}, skipping", id));
    }

    if known.is_empty() {
        Output::info("Nothing to delete.");
        return Ok(());
    }

    store.delete(&known)?;
    Output::success(&format!("Deleted {} record(s).", known.len()));

    Ok(())
}
