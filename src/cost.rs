//! API cost accounting.
//!
//! Converts measured usage (audio duration, token counts) into USD amounts.
//! The rates match what the providers bill for whisper-1 and gpt-3.5-turbo.

/// Whisper transcription rate, USD per minute of audio.
pub const TRANSCRIPTION_RATE_PER_MINUTE: f64 = 0.006;

/// Chat completion rate, USD per 1000 tokens (prompt + completion).
pub const SUMMARIZATION_RATE_PER_1K_TOKENS: f64 = 0.002;

/// Cost of transcribing `duration_seconds` of audio.
pub fn transcription_cost(duration_seconds: f64) -> f64 {
    (duration_seconds / 60.0) * TRANSCRIPTION_RATE_PER_MINUTE
}

/// Cost of a summarization call that used `total_tokens` tokens.
pub fn summarization_cost(total_tokens: u32) -> f64 {
    f64::from(total_tokens) * SUMMARIZATION_RATE_PER_1K_TOKENS / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcription_cost_formula() {
        assert!((transcription_cost(0.0)).abs() < 1e-12);
        assert!((transcription_cost(60.0) - 0.006).abs() < 1e-12);
        // 90 seconds of audio -> $0.009
        assert!((transcription_cost(90.0) - 0.009).abs() < 1e-12);
    }

    #[test]
    fn test_transcription_cost_monotonic() {
        let mut prev = 0.0;
        for d in [0.0, 1.0, 30.0, 60.0, 61.5, 3600.0] {
            let cost = transcription_cost(d);
            assert!(cost >= prev);
            prev = cost;
        }
    }

    #[test]
    fn test_summarization_cost_formula() {
        assert!((summarization_cost(0)).abs() < 1e-12);
        assert!((summarization_cost(1000) - 0.002).abs() < 1e-12);
        // 200 tokens -> $0.0004
        assert!((summarization_cost(200) - 0.0004).abs() < 1e-12);
    }
}
