//! CLI module for Kiku.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Kiku - Conversation Recorder and Summarizer
///
/// A CLI tool for transcribing recorded conversations and generating
/// structured summaries. The name "Kiku" comes from the Japanese word for
/// "to listen."
#[derive(Parser, Debug)]
#[command(name = "kiku")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcribe and summarize a recording immediately
    Process {
        /// Path to the audio file
        audio: String,

        /// Conversation kind (personal, couple, veterinary)
        #[arg(short, long, default_value = "personal")]
        kind: String,

        /// Conversation language (en, ja)
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Dog profile id to attach (veterinary only, repeatable)
        #[arg(short, long)]
        dog: Vec<String>,

        /// Purpose of the veterinary visit
        #[arg(short, long)]
        purpose: Option<String>,
    },

    /// Save a recording for later processing (no API calls)
    Save {
        /// Path to the audio file
        audio: String,

        /// Conversation kind (personal, couple, veterinary)
        #[arg(short, long, default_value = "personal")]
        kind: String,

        /// Conversation language (en, ja)
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Dog profile id to attach (veterinary only, repeatable)
        #[arg(short, long)]
        dog: Vec<String>,

        /// Purpose of the veterinary visit
        #[arg(short, long)]
        purpose: Option<String>,
    },

    /// Process a previously saved recording
    Retry {
        /// Record id (from 'kiku list')
        id: String,
    },

    /// Show a record's transcript and summary
    Show {
        /// Record id
        id: String,
    },

    /// List all records
    List,

    /// Show library statistics and total API spend
    Stats,

    /// Delete records and their audio files
    Delete {
        /// Record ids to delete
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Delete every record and its audio file
    Clear {
        /// Skip the safety check
        #[arg(long)]
        force: bool,
    },

    /// Manage dog and owner profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Check configuration and storage health
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    /// Show all profiles
    Show,

    /// Add a dog profile
    AddDog {
        /// The dog's name
        name: String,

        /// Breed
        #[arg(long)]
        breed: Option<String>,

        /// Age in years
        #[arg(long)]
        age: Option<u32>,

        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,
    },

    /// Add an owner profile
    AddOwner {
        /// First name
        first_name: String,

        /// Last name
        last_name: String,

        /// Email address
        #[arg(long)]
        email: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Store the OpenAI API key in the configuration file
    SetKey {
        /// The API key (sk-...)
        key: String,
    },

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
