//! Show command implementation.

use super::{open_storage, parse_id};
use crate::cli::output::format_duration;
use crate::cli::Output;
use crate::config::Settings;
use crate::library::RecordStore;
use crate::record::AudioFileRecord;
use anyhow::Result;

/// Run the show command.
pub fn run_show(id: &str, settings: Settings) -> Result<()> {
    let id = parse_id(id)?;
    let store = RecordStore::load(open_storage(&settings)?)?;

    let record = store
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("No record with id {}", id))?;

    Output::header(record.filename());
    Output::kv("Id", &record.id().to_string());
    Output::kv("Recorded", &record.created_at().format("%Y-%m-%d %H:%M").to_string());
    Output::kv("Kind", record.kind().display_name());
    Output::kv("Language", record.language().display_name());

    match &record {
        AudioFileRecord::Pending(_) => {
            Output::kv("Status", "pending");
            println!();
            Output::info(&format!("Not yet processed. Run: kiku retry {}", id));
        }
        AudioFileRecord::Processed(r) => {
            Output::kv("Status", "processed");
            Output::kv("Duration", &format_duration(r.duration_seconds));
            Output::kv(
                "Cost",
                &format!(
                    "${:.4} (transcription ${:.4}, summary ${:.4})",
                    r.total_cost(),
                    r.transcription_cost,
                    r.summarization_cost
                ),
            );

            if let Some(vet) = &r.veterinary {
                if vet.has_visit_purpose() {
                    Output::kv("Visit purpose", &vet.visit_purpose);
                }
            }

            Output::header("Summary");
            println!("{}", r.summary);

            Output::header("Transcript");
            println!("{}", r.transcript);
        }
    }

    Ok(())
}
