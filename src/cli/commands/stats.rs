//! Stats command implementation.

use super::open_storage;
use crate::cli::output::format_duration;
use crate::cli::Output;
use crate::config::Settings;
use crate::library::RecordStore;
use anyhow::Result;

/// Run the stats command.
pub fn run_stats(settings: Settings) -> Result<()> {
    let store = RecordStore::load(open_storage(&settings)?)?;
    let stats = store.stats();

    Output::header("Library Statistics");
    println!();

    Output::kv(
        "Recordings",
        &(stats.pending_count + stats.processed_count).to_string(),
    );
    Output::kv("Pending", &stats.pending_count.to_string());
    Output::kv("Processed", &stats.processed_count.to_string());
    Output::kv(
        "Total duration",
        &format_duration(stats.total_duration_seconds),
    );
    Output::kv("Total API spend", &format!("${:.4}", stats.total_cost));

    if !stats.count_by_kind.is_empty() {
        println!();
        Output::header("By Kind");
        let mut kinds: Vec<_> = stats.count_by_kind.iter().collect();
        kinds.sort_by_key(|(_, count)| std::cmp::Reverse(**count));
        for (kind, count) in kinds {
            Output::kv(kind.display_name(), &count.to_string());
        }
    }

    if !stats.count_by_language.is_empty() {
        println!();
        Output::header("By Language");
        let mut languages: Vec<_> = stats.count_by_language.iter().collect();
        languages.sort_by_key(|(_, count)| std::cmp::Reverse(**count));
        for (language, count) in languages {
            Output::kv(language.display_name(), &count.to_string());
        }
    }

    Ok(())
}
