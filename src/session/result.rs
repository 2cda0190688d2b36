use chrono::{DateTime, Utc};

use crate::session::state::Session;

/// Final metrics for a completed round.
#[derive(Clone, Debug)]
pub struct RoundResult {
    /// Words per minute, already penalized by final accuracy.
    pub wpm: u32,
    /// Final accuracy percentage; `None` for a degenerate completion
    /// (no correct chars, or no measurable elapsed time).
    pub accuracy: Option<f64>,
    /// Accuracy from every mistake ever made. Corrections never improve it.
    pub raw_accuracy: f64,
    pub score: f64,
    pub correct_chars: usize,
    pub uncorrected_errors: usize,
    pub elapsed_secs: f64,
    pub timestamp: DateTime<Utc>,
}

impl RoundResult {
    pub fn from_session(session: &Session) -> Self {
        compute(
            session.sample().len(),
            session.correct_chars(),
            session.uncorrected_errors(),
            session.raw_total_errors(),
            session.score(),
            session.elapsed_secs(),
        )
    }

    pub fn has_uncorrected_errors(&self) -> bool {
        self.uncorrected_errors > 0
    }
}

/// Pure metric computation, separated from session timing so it is
/// testable with fixed inputs.
///
/// WPM is the standard chars/5-per-minute figure multiplied by final
/// accuracy, so mistakes left uncorrected drag the displayed speed down.
fn compute(
    sample_len: usize,
    correct_chars: usize,
    uncorrected_errors: usize,
    raw_total_errors: usize,
    score: f64,
    elapsed_secs: f64,
) -> RoundResult {
    let len = sample_len as f64;
    let raw_accuracy = ((len - raw_total_errors as f64) / len).max(0.0) * 100.0;

    let (wpm, accuracy) = if correct_chars == 0 || elapsed_secs <= 0.0 {
        (0, None)
    } else {
        let final_accuracy = ((len - uncorrected_errors as f64) / len).max(0.0);
        let minutes = elapsed_secs / 60.0;
        let wpm = (correct_chars as f64 / 5.0 / minutes * final_accuracy).round() as u32;
        (wpm, Some(final_accuracy * 100.0))
    };

    RoundResult {
        wpm,
        accuracy,
        raw_accuracy,
        score,
        correct_chars,
        uncorrected_errors,
        elapsed_secs,
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_round() {
        // 10 correct chars in 12 seconds: 10/5 / 0.2min = 10 wpm
        let result = compute(10, 10, 0, 0, 50.0, 12.0);
        assert_eq!(result.wpm, 10);
        assert_eq!(result.accuracy, Some(100.0));
        assert_eq!(result.raw_accuracy, 100.0);
        assert!(!result.has_uncorrected_errors());
    }

    #[test]
    fn test_uncorrected_errors_scale_wpm_down() {
        // 8 of 10 correct, 2 left wrong: accuracy 0.8
        let clean = compute(10, 10, 0, 0, 0.0, 12.0);
        let flawed = compute(10, 8, 2, 2, 0.0, 12.0);
        assert_eq!(flawed.accuracy, Some(80.0));
        // 8/5 / 0.2 * 0.8 = 6.4 -> 6
        assert_eq!(flawed.wpm, 6);
        assert!(flawed.wpm < clean.wpm);
    }

    #[test]
    fn test_corrected_mistakes_hurt_raw_accuracy_only() {
        // One mistake, corrected before the end
        let result = compute(3, 3, 0, 1, 0.0, 5.0);
        assert_eq!(result.accuracy, Some(100.0));
        assert!((result.raw_accuracy - 2.0 / 3.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_zero_elapsed() {
        let result = compute(3, 3, 0, 0, 0.0, 0.0);
        assert_eq!(result.wpm, 0);
        assert_eq!(result.accuracy, None);
        assert_eq!(result.raw_accuracy, 100.0);
    }

    #[test]
    fn test_degenerate_no_correct_chars() {
        let result = compute(3, 0, 3, 3, 0.0, 5.0);
        assert_eq!(result.wpm, 0);
        assert_eq!(result.accuracy, None);
    }

    #[test]
    fn test_raw_accuracy_floors_at_zero() {
        // More lifetime mistakes than the sample is long
        let result = compute(3, 3, 0, 7, 0.0, 5.0);
        assert_eq!(result.raw_accuracy, 0.0);
    }
}
