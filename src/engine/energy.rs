/// Errors at which the correct ratio bottoms out.
pub const MAX_ERRORS_FOR_MIN_RATIO: usize = 15;
/// Ratio floor once the error count saturates.
pub const MIN_CORRECT_RATIO: f64 = 0.5;

/// Score penalty ratio for the current uncorrected-error count.
///
/// 1.0 with no errors, linear ramp down to `MIN_CORRECT_RATIO` at
/// `MAX_ERRORS_FOR_MIN_RATIO` errors, flat beyond that.
pub fn correct_ratio(num_incorrect: usize) -> f64 {
    if num_incorrect == 0 {
        1.0
    } else if num_incorrect >= MAX_ERRORS_FOR_MIN_RATIO {
        MIN_CORRECT_RATIO
    } else {
        1.0 - (1.0 - MIN_CORRECT_RATIO)
            * (num_incorrect as f64 / MAX_ERRORS_FOR_MIN_RATIO as f64)
    }
}

/// Presentation value derived from `correct_ratio`: 100 at ratio 1.0,
/// 0 at the ratio floor.
pub fn energy(num_incorrect: usize) -> u8 {
    let ratio = correct_ratio(num_incorrect);
    let raw = ((ratio - MIN_CORRECT_RATIO) / (1.0 - MIN_CORRECT_RATIO) * 100.0).round();
    raw.clamp(0.0, 100.0) as u8
}
