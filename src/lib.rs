//! Kiku - Conversation Recorder and Summarizer
//!
//! A CLI tool for transcribing recorded conversations and generating
//! structured summaries with cost tracking.
//!
//! The name "Kiku" comes from the Japanese word for "to listen."
//!
//! # Overview
//!
//! Kiku allows you to:
//! - Transcribe recorded conversations (personal notes, couple conversations,
//!   veterinary consultations) via speech-to-text
//! - Generate conversation-kind-specific summaries in English or Japanese
//! - Save recordings for later and process them when convenient
//! - Track per-recording and total API spend
//! - Inject dog and owner profiles into veterinary summaries
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `cost` - API cost model
//! - `record` - Audio file records and their pending/processed lifecycle
//! - `storage` - Key-value storage abstraction
//! - `library` - The persistent record collection
//! - `profile` - Dog and owner profiles
//! - `api` - Transcription and summarization clients
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use kiku::config::Settings;
//! use kiku::orchestrator::{Orchestrator, Recording};
//! use kiku::record::{ConversationKind, Language};
//! use kiku::storage::JsonFileStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let storage = Arc::new(JsonFileStore::new(&settings.storage_dir())?);
//!     let orchestrator = Orchestrator::new(&settings, storage)?;
//!
//!     let recording = Recording::from_path(Path::new("conversation.m4a"));
//!     let record = orchestrator
//!         .process(recording, ConversationKind::Personal, Language::English, None)
//!         .await?;
//!     println!("Cost: ${:.4}", record.total_cost());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod cost;
pub mod error;
pub mod library;
pub mod openai;
pub mod orchestrator;
pub mod profile;
pub mod record;
pub mod storage;

pub use error::{KikuError, Result};
