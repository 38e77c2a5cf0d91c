//! Kiku CLI entry point.

use anyhow::Result;
use clap::Parser;
use kiku::cli::{commands, Cli, Commands};
use kiku::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("kiku={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Ensure data directories exist
    std::fs::create_dir_all(settings.data_dir())?;
    std::fs::create_dir_all(settings.storage_dir())?;

    // Execute command
    match &cli.command {
        Commands::Process {
            audio,
            kind,
            language,
            dog,
            purpose,
        } => {
            commands::run_process(audio, kind, language, dog, purpose.clone(), settings).await?;
        }

        Commands::Save {
            audio,
            kind,
            language,
            dog,
            purpose,
        } => {
            commands::run_save(audio, kind, language, dog, purpose.clone(), settings)?;
        }

        Commands::Retry { id } => {
            commands::run_retry(id, settings).await?;
        }

        Commands::Show { id } => {
            commands::run_show(id, settings)?;
        }

        Commands::List => {
            commands::run_list(settings)?;
        }

        Commands::Stats => {
            commands::run_stats(settings)?;
        }

        Commands::Delete { ids } => {
            commands::run_delete(ids, settings)?;
        }

        Commands::Clear { force } => {
            commands::run_clear(*force, settings)?;
        }

        Commands::Profile { action } => {
            commands::run_profile(action, settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }
    }

    Ok(())
}
