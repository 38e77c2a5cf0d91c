//! Prompt table for summarization.
//!
//! One system and one user prompt per (conversation kind, language) pair.
//! The match is exhaustive, so every combination is defined by construction.

use crate::record::{ConversationKind, Language};

/// Placeholder in user prompt templates that receives the transcript.
pub const TRANSCRIPT_PLACEHOLDER: &str = "{transcript}";

/// System prompt for a given conversation kind and language.
pub fn system_prompt(kind: ConversationKind, language: Language) -> &'static str {
    match (kind, language) {
        (ConversationKind::Personal, Language::English) => {
            "You are a helpful assistant helping to summarize personal notes and thoughts."
        }
        (ConversationKind::Personal, Language::Japanese) => {
            "あなたは個人のメモや考えを要約するのを手伝うアシスタントです。"
        }
        (ConversationKind::Couple, Language::English) => {
            "You are a helpful assistant helping to summarize conversations between partners."
        }
        (ConversationKind::Couple, Language::Japanese) => {
            "あなたはパートナー間の会話を要約するのを手伝うアシスタントです。"
        }
        (ConversationKind::Veterinary, Language::English) => {
            "You are a veterinary assistant helping to summarize consultation notes."
        }
        (ConversationKind::Veterinary, Language::Japanese) => {
            "あなたは獣医の診察記録を要約するのを手伝う獣医アシスタントです。"
        }
    }
}

/// User prompt template for a given conversation kind and language.
///
/// Each template contains [`TRANSCRIPT_PLACEHOLDER`].
pub fn user_prompt_template(kind: ConversationKind, language: Language) -> &'static str {
    match (kind, language) {
        (ConversationKind::Personal, Language::English) => {
            "Please provide a concise summary of this personal speech or monologue.\n\
             Focus on key points, important thoughts, decisions made, or action items mentioned.\n\
             Format the summary in a clear, organized manner suitable for personal reference.\n\
             \n\
             Transcript:\n\
             {transcript}"
        }
        (ConversationKind::Personal, Language::Japanese) => {
            "この個人的なスピーチや独白の簡潔な要約を提供してください。\n\
             重要なポイント、重要な考え、決定された事項、または言及されたアクション項目に焦点を当ててください。\n\
             個人の参考に適した、明確で整理された形式で要約をフォーマットしてください。\n\
             \n\
             文字起こし:\n\
             {transcript}"
        }
        (ConversationKind::Couple, Language::English) => {
            "Please provide a concise summary of this couple's conversation.\n\
             Focus on key topics discussed, decisions made, plans mentioned, and important points for both partners.\n\
             Format the summary in a clear, organized manner suitable for relationship reference.\n\
             \n\
             Transcript:\n\
             {transcript}"
        }
        (ConversationKind::Couple, Language::Japanese) => {
            "このカップルの会話の簡潔な要約を提供してください。\n\
             議論された主要なトピック、決定された事項、言及された計画、および両パートナーにとって重要なポイントに焦点を当ててください。\n\
             関係の参考に適した、明確で整理された形式で要約をフォーマットしてください。\n\
             \n\
             文字起こし:\n\
             {transcript}"
        }
        (ConversationKind::Veterinary, Language::English) => {
            "Please provide a concise medical summary of this veterinary consultation transcript.\n\
             Focus on key findings, diagnoses, treatment recommendations, and follow-up instructions.\n\
             Format the summary in a clear, professional manner suitable for medical records.\n\
             \n\
             Transcript:\n\
             {transcript}"
        }
        (ConversationKind::Veterinary, Language::Japanese) => {
            "この獣医診察の文字起こしの簡潔な医療要約を提供してください。\n\
             重要な所見、診断、治療推奨事項、およびフォローアップ指示に焦点を当ててください。\n\
             医療記録に適した、明確で専門的な形式で要約をフォーマットしてください。\n\
             \n\
             文字起こし:\n\
             {transcript}"
        }
    }
}

/// Render the user prompt for a summarization request.
///
/// The transcript is substituted verbatim (it can contain arbitrary text,
/// including braces). When profile context is present and non-empty, it is
/// prepended as a background block; otherwise no profile section appears.
pub fn render_user_prompt(
    kind: ConversationKind,
    language: Language,
    transcript: &str,
    profile_context: Option<&str>,
) -> String {
    let body = user_prompt_template(kind, language).replace(TRANSCRIPT_PLACEHOLDER, transcript);

    match profile_context {
        Some(context) if !context.trim().is_empty() => {
            format!("Background information:\n{}\n\n{}", context, body)
        }
        _ => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ConversationKind; 3] = [
        ConversationKind::Personal,
        ConversationKind::Couple,
        ConversationKind::Veterinary,
    ];
    const ALL_LANGUAGES: [Language; 2] = [Language::English, Language::Japanese];

    #[test]
    fn test_all_combinations_defined() {
        for kind in ALL_KINDS {
            for language in ALL_LANGUAGES {
                assert!(!system_prompt(kind, language).is_empty());
                assert!(user_prompt_template(kind, language).contains(TRANSCRIPT_PLACEHOLDER));
            }
        }
    }

    #[test]
    fn test_transcript_substituted_verbatim() {
        // Braces and placeholder-like text in the transcript pass through.
        let transcript = "we said {transcript} literally and {other} too";
        let rendered = render_user_prompt(
            ConversationKind::Personal,
            Language::English,
            transcript,
            None,
        );
        assert!(rendered.contains(transcript));
        assert!(!rendered.contains("Background information"));
    }

    #[test]
    fn test_profile_section_omitted_when_empty() {
        let rendered = render_user_prompt(
            ConversationKind::Veterinary,
            Language::English,
            "hello",
            Some("   "),
        );
        assert!(!rendered.contains("Background information"));

        let rendered = render_user_prompt(
            ConversationKind::Veterinary,
            Language::English,
            "hello",
            Some("Dog: Momo"),
        );
        assert!(rendered.starts_with("Background information:\nDog: Momo"));
        assert!(rendered.contains("hello"));
    }
}
