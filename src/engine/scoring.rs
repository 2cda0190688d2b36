use crate::engine::energy;

/// Sample length the per-character award is normalized against, so the
/// maximum attainable score is comparable across texts.
pub const NORMALIZED_LENGTH: f64 = 500.0;
/// Base points per correct character before multiplier and penalty.
pub const BASE_CHAR_SCORE: f64 = 5.0;

/// Score for the first correct keystroke at a character index.
///
/// `num_correct` counts distinct ever-correct indices including this one;
/// `num_typed` counts keystrokes including this one. Their difference is
/// the running incorrect count fed to the penalty ratio.
pub fn char_score(
    num_correct: usize,
    num_typed: usize,
    multiplier: u32,
    sample_len: usize,
) -> f64 {
    let num_incorrect = num_typed.saturating_sub(num_correct);
    let ratio = energy::correct_ratio(num_incorrect);
    let raw = BASE_CHAR_SCORE * multiplier as f64 * ratio;
    raw * (NORMALIZED_LENGTH / sample_len as f64)
}
