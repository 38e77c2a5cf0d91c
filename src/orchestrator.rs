//! Processing pipeline orchestrator.
//!
//! Drives a finished recording through transcription and summarization and
//! commits the result to the record library. Each recording is either
//! processed immediately, or saved as a pending record and processed later.
//! A failed attempt leaves the library exactly as it was.

use crate::api::{ChatSummarizer, Summarize, Transcribe, WhisperClient};
use crate::config::Settings;
use crate::error::{KikuError, Result};
use crate::library::RecordStore;
use crate::profile::{format_profile_context, ProfileStore};
use crate::record::{
    AudioFileRecord, ConversationKind, Language, PendingRecord, ProcessingOutcome,
    VeterinaryContext,
};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// A finished audio asset handed over by the recorder.
#[derive(Debug, Clone)]
pub struct Recording {
    pub asset_path: PathBuf,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}

impl Recording {
    /// Wrap an audio file on disk as a recording handle.
    pub fn from_path(path: &Path) -> Self {
        Self {
            asset_path: path.to_path_buf(),
            filename: path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("recording.m4a")
                .to_string(),
            created_at: Utc::now(),
        }
    }
}

/// The main orchestrator for the Kiku pipeline.
pub struct Orchestrator {
    store: Arc<RecordStore>,
    profiles: Arc<ProfileStore>,
    transcriber: Arc<dyn Transcribe>,
    summarizer: Arc<dyn Summarize>,
}

impl Orchestrator {
    /// Create an orchestrator with HTTP clients built from settings.
    pub fn new(settings: &Settings, storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let store = Arc::new(RecordStore::load(storage.clone())?);
        let profiles = Arc::new(ProfileStore::load_with_migration(storage)?);
        let transcriber: Arc<dyn Transcribe> = Arc::new(WhisperClient::new(settings)?);
        let summarizer: Arc<dyn Summarize> = Arc::new(ChatSummarizer::new(settings)?);

        Ok(Self {
            store,
            profiles,
            transcriber,
            summarizer,
        })
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        store: Arc<RecordStore>,
        profiles: Arc<ProfileStore>,
        transcriber: Arc<dyn Transcribe>,
        summarizer: Arc<dyn Summarize>,
    ) -> Self {
        Self {
            store,
            profiles,
            transcriber,
            summarizer,
        }
    }

    /// Get a reference to the record library.
    pub fn store(&self) -> Arc<RecordStore> {
        self.store.clone()
    }

    /// Get a reference to the profile store.
    pub fn profiles(&self) -> Arc<ProfileStore> {
        self.profiles.clone()
    }

    /// Veterinary runs must carry context with at least one selected dog;
    /// other kinds carry none.
    fn validate_context(
        kind: ConversationKind,
        veterinary: &Option<VeterinaryContext>,
    ) -> Result<()> {
        if kind != ConversationKind::Veterinary {
            return Ok(());
        }
        match veterinary {
            None => Err(KikuError::InvalidInput(
                "Veterinary consultations require a veterinary context (selected dogs and purpose)"
                    .to_string(),
            )),
            Some(ctx) if ctx.selected_dogs.is_empty() => Err(KikuError::InvalidInput(
                "Veterinary consultations require at least one selected dog".to_string(),
            )),
            Some(_) => Ok(()),
        }
    }

    /// Profile context text for the prompt, only for veterinary runs.
    fn profile_context(&self, veterinary: Option<&VeterinaryContext>) -> Option<String> {
        let ctx = veterinary?;
        let book = self.profiles.book();
        let text = format_profile_context(
            &book,
            Some(&ctx.selected_dogs),
            Some(ctx.visit_purpose.as_str()),
        );
        (!text.is_empty()).then_some(text)
    }

    /// Run transcription then summarization for one asset.
    ///
    /// Summarization only runs if transcription succeeded; the first failure
    /// short-circuits.
    async fn run_pipeline(
        &self,
        asset_path: &Path,
        kind: ConversationKind,
        language: Language,
        veterinary: Option<&VeterinaryContext>,
    ) -> Result<ProcessingOutcome> {
        let transcription = self.transcriber.transcribe(asset_path, language).await?;
        info!(
            "Transcribed {:.0}s of audio ({} chars)",
            transcription.duration_seconds,
            transcription.text.len()
        );

        let context = self.profile_context(veterinary);
        let summarization = self
            .summarizer
            .summarize(&transcription.text, kind, language, context.as_deref())
            .await?;
        info!(
            "Summary generated ({} tokens, ${:.4})",
            summarization.token_count, summarization.cost
        );

        Ok(ProcessingOutcome {
            duration_seconds: transcription.duration_seconds,
            transcript: transcription.text,
            summary: summarization.text,
            transcription_cost: transcription.cost,
            summarization_cost: summarization.cost,
            token_count: summarization.token_count,
        })
    }

    fn pending_from(
        recording: Recording,
        kind: ConversationKind,
        language: Language,
        veterinary: Option<VeterinaryContext>,
    ) -> PendingRecord {
        PendingRecord {
            id: Uuid::new_v4(),
            asset_path: recording.asset_path,
            filename: recording.filename,
            created_at: recording.created_at,
            kind,
            language,
            veterinary,
        }
    }

    /// Process a new recording immediately and commit it as processed.
    ///
    /// On any client failure the error propagates and nothing is stored.
    #[instrument(skip(self, recording, veterinary), fields(file = %recording.filename))]
    pub async fn process(
        &self,
        recording: Recording,
        kind: ConversationKind,
        language: Language,
        veterinary: Option<VeterinaryContext>,
    ) -> Result<AudioFileRecord> {
        Self::validate_context(kind, &veterinary)?;

        let pending = Self::pending_from(recording, kind, language, veterinary);
        let outcome = self
            .run_pipeline(&pending.asset_path, kind, language, pending.veterinary.as_ref())
            .await?;

        let record = AudioFileRecord::Processed(pending.into_processed(outcome));
        self.store.add(record.clone())?;
        Ok(record)
    }

    /// Store a recording as a pending record without any network calls.
    pub fn save_for_later(
        &self,
        recording: Recording,
        kind: ConversationKind,
        language: Language,
        veterinary: Option<VeterinaryContext>,
    ) -> Result<AudioFileRecord> {
        Self::validate_context(kind, &veterinary)?;

        let record =
            AudioFileRecord::Pending(Self::pending_from(recording, kind, language, veterinary));
        self.store.add(record.clone())?;
        info!("Saved {} for later processing", record.filename());
        Ok(record)
    }

    /// Process a previously saved pending record.
    ///
    /// On success the stored record transitions pending -> processed under
    /// the same id. On failure it stays pending and untouched.
    #[instrument(skip(self))]
    pub async fn process_pending(&self, id: Uuid) -> Result<AudioFileRecord> {
        let pending = match self.store.get(id) {
            Some(AudioFileRecord::Pending(p)) => p,
            Some(AudioFileRecord::Processed(_)) => {
                return Err(KikuError::InvalidInput(format!(
                    "Record {} is already processed",
                    id
                )))
            }
            None => {
                return Err(KikuError::InvalidInput(format!("No record with id {}", id)))
            }
        };

        let outcome = self
            .run_pipeline(
                &pending.asset_path,
                pending.kind,
                pending.language,
                pending.veterinary.as_ref(),
            )
            .await?;

        let processed = pending.into_processed(outcome);
        let record = AudioFileRecord::Processed(processed.clone());
        self.store.replace_pending(id, processed)?;
        Ok(record)
    }
}
