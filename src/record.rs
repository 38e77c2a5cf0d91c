//! Audio file records and their pending/processed lifecycle.
//!
//! A record is created either as [`AudioFileRecord::Pending`] (saved for
//! later) or directly as [`AudioFileRecord::Processed`]. The only allowed
//! mutation of a stored record is the one-way pending -> processed
//! replacement; everything else is add or delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// What kind of conversation was recorded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConversationKind {
    /// Personal thoughts, notes, or monologue.
    #[default]
    Personal,
    /// Conversation between partners.
    Couple,
    /// Veterinary consultation (doctor and pet owner).
    Veterinary,
}

impl ConversationKind {
    /// Human-readable name for CLI output.
    pub fn display_name(&self) -> &'static str {
        match self {
            ConversationKind::Personal => "Personal Speech",
            ConversationKind::Couple => "Couple Conversation",
            ConversationKind::Veterinary => "Veterinary Consultation",
        }
    }
}

impl std::str::FromStr for ConversationKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "personal" => Ok(ConversationKind::Personal),
            "couple" => Ok(ConversationKind::Couple),
            "veterinary" | "vet" => Ok(ConversationKind::Veterinary),
            _ => Err(format!("Unknown conversation kind: {}", s)),
        }
    }
}

impl std::fmt::Display for ConversationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversationKind::Personal => write!(f, "personal"),
            ConversationKind::Couple => write!(f, "couple"),
            ConversationKind::Veterinary => write!(f, "veterinary"),
        }
    }
}

/// Language the conversation was held in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Japanese,
}

impl Language {
    /// ISO 639-1 code sent to the transcription endpoint.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Japanese => "ja",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Japanese => "日本語",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "japanese" | "ja" => Ok(Language::Japanese),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Extra context attached to veterinary consultations.
///
/// Selected dogs are referenced by profile id; the visit purpose is free
/// text and may be empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct VeterinaryContext {
    pub selected_dogs: HashSet<Uuid>,
    pub visit_purpose: String,
}

impl VeterinaryContext {
    pub fn new(selected_dogs: HashSet<Uuid>, visit_purpose: impl Into<String>) -> Self {
        Self {
            selected_dogs,
            visit_purpose: visit_purpose.into(),
        }
    }

    /// Whether a non-blank visit purpose was entered.
    pub fn has_visit_purpose(&self) -> bool {
        !self.visit_purpose.trim().is_empty()
    }
}

/// A recording that has been saved but not yet transcribed or summarized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingRecord {
    pub id: Uuid,
    pub asset_path: PathBuf,
    pub filename: String,
    pub created_at: DateTime<Utc>,
    pub kind: ConversationKind,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veterinary: Option<VeterinaryContext>,
}

impl PendingRecord {
    /// Promote this record with the results of a completed pipeline run.
    /// The id is preserved.
    pub fn into_processed(self, outcome: ProcessingOutcome) -> ProcessedRecord {
        ProcessedRecord {
            id: self.id,
            asset_path: self.asset_path,
            filename: self.filename,
            created_at: self.created_at,
            kind: self.kind,
            language: self.language,
            veterinary: self.veterinary,
            duration_seconds: outcome.duration_seconds,
            transcript: outcome.transcript,
            summary: outcome.summary,
            transcription_cost: outcome.transcription_cost,
            summarization_cost: outcome.summarization_cost,
            token_count: outcome.token_count,
        }
    }
}

/// Results the orchestrator folds into a record on successful processing.
#[derive(Debug, Clone)]
pub struct ProcessingOutcome {
    pub duration_seconds: f64,
    pub transcript: String,
    pub summary: String,
    pub transcription_cost: f64,
    pub summarization_cost: f64,
    pub token_count: u32,
}

/// A fully processed recording with transcript, summary, and costs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessedRecord {
    pub id: Uuid,
    pub asset_path: PathBuf,
    pub filename: String,
    pub created_at: DateTime<Utc>,
    pub kind: ConversationKind,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veterinary: Option<VeterinaryContext>,
    pub duration_seconds: f64,
    pub transcript: String,
    pub summary: String,
    pub transcription_cost: f64,
    pub summarization_cost: f64,
    pub token_count: u32,
}

impl ProcessedRecord {
    /// Total API spend for this record. Always derived, never stored.
    pub fn total_cost(&self) -> f64 {
        self.transcription_cost + self.summarization_cost
    }
}

/// One recorded conversation in the library.
///
/// The variant *is* the status: a pending record structurally has no
/// transcript, summary, or cost fields to leave half-filled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AudioFileRecord {
    Pending(PendingRecord),
    Processed(ProcessedRecord),
}

impl AudioFileRecord {
    pub fn id(&self) -> Uuid {
        match self {
            AudioFileRecord::Pending(r) => r.id,
            AudioFileRecord::Processed(r) => r.id,
        }
    }

    pub fn asset_path(&self) -> &Path {
        match self {
            AudioFileRecord::Pending(r) => &r.asset_path,
            AudioFileRecord::Processed(r) => &r.asset_path,
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            AudioFileRecord::Pending(r) => &r.filename,
            AudioFileRecord::Processed(r) => &r.filename,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            AudioFileRecord::Pending(r) => r.created_at,
            AudioFileRecord::Processed(r) => r.created_at,
        }
    }

    pub fn kind(&self) -> ConversationKind {
        match self {
            AudioFileRecord::Pending(r) => r.kind,
            AudioFileRecord::Processed(r) => r.kind,
        }
    }

    pub fn language(&self) -> Language {
        match self {
            AudioFileRecord::Pending(r) => r.language,
            AudioFileRecord::Processed(r) => r.language,
        }
    }

    pub fn veterinary(&self) -> Option<&VeterinaryContext> {
        match self {
            AudioFileRecord::Pending(r) => r.veterinary.as_ref(),
            AudioFileRecord::Processed(r) => r.veterinary.as_ref(),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AudioFileRecord::Pending(_))
    }

    /// Duration in seconds; 0 for pending records (unknown until processed).
    pub fn duration_seconds(&self) -> f64 {
        match self {
            AudioFileRecord::Pending(_) => 0.0,
            AudioFileRecord::Processed(r) => r.duration_seconds,
        }
    }

    /// Total API spend; 0 for pending records.
    pub fn total_cost(&self) -> f64 {
        match self {
            AudioFileRecord::Pending(_) => 0.0,
            AudioFileRecord::Processed(r) => r.total_cost(),
        }
    }

    /// Format a duration as MM:SS for display.
    pub fn formatted_duration(&self) -> String {
        let total = self.duration_seconds() as u64;
        format!("{:02}:{:02}", total / 60, total % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> PendingRecord {
        PendingRecord {
            id: Uuid::new_v4(),
            asset_path: PathBuf::from("/tmp/rec.m4a"),
            filename: "rec.m4a".to_string(),
            created_at: Utc::now(),
            kind: ConversationKind::Personal,
            language: Language::English,
            veterinary: None,
        }
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            ConversationKind::Personal,
            ConversationKind::Couple,
            ConversationKind::Veterinary,
        ] {
            let parsed: ConversationKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("meeting".parse::<ConversationKind>().is_err());
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::Japanese.code(), "ja");
        assert_eq!("ja".parse::<Language>().unwrap(), Language::Japanese);
    }

    #[test]
    fn test_status_tagged_serialization() {
        let record = AudioFileRecord::Pending(pending());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"status\":\"pending\""));

        let back: AudioFileRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert!(back.is_pending());
    }

    #[test]
    fn test_into_processed_preserves_id() {
        let p = pending();
        let id = p.id;
        let processed = p.into_processed(ProcessingOutcome {
            duration_seconds: 90.0,
            transcript: "hello world".to_string(),
            summary: "greeting".to_string(),
            transcription_cost: 0.009,
            summarization_cost: 0.0004,
            token_count: 200,
        });
        assert_eq!(processed.id, id);
        assert!((processed.total_cost() - 0.0094).abs() < 1e-12);

        let record = AudioFileRecord::Processed(processed);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"status\":\"processed\""));
        assert_eq!(serde_json::from_str::<AudioFileRecord>(&json).unwrap(), record);
    }

    #[test]
    fn test_pending_has_zero_cost_and_duration() {
        let record = AudioFileRecord::Pending(pending());
        assert_eq!(record.duration_seconds(), 0.0);
        assert_eq!(record.total_cost(), 0.0);
        assert_eq!(record.formatted_duration(), "00:00");
    }

    #[test]
    fn test_visit_purpose_blank_detection() {
        let ctx = VeterinaryContext::new(HashSet::new(), "   \n");
        assert!(!ctx.has_visit_purpose());
        let ctx = VeterinaryContext::new(HashSet::new(), "Annual checkup");
        assert!(ctx.has_visit_purpose());
    }
}
