//! Invariant guards for score values.
//!
//! When an invariant is violated:
//! 1. Log a structured "INVARIANT_VIOLATION" event
//! 2. Return a safe fallback value

use tracing::warn;

/// Lowest valid score
pub const SCORE_MIN: f64 = 0.0;

/// Highest valid score
pub const SCORE_MAX: f64 = 100.0;

fn log_violation(invariant: &str, expected: &str, actual: &str, context: &str) {
    warn!(
        invariant = invariant,
        expected = expected,
        actual = actual,
        context = context,
        "INVARIANT_VIOLATION"
    );
}

/// Guard a score to [0, 100]. NaN becomes 0.
///
/// Calculators that can legitimately exceed the range (stacked bonuses)
/// should clamp themselves with `clamp_score`; this guard is for values
/// that must already be in range.
pub fn guard_score(raw: f64, context: &str) -> f64 {
    if raw.is_nan() {
        log_violation("score_range", "0-100", "NaN", context);
        return SCORE_MIN;
    }
    if !(SCORE_MIN..=SCORE_MAX).contains(&raw) {
        log_violation("score_range", "0-100", &format!("{:.2}", raw), context);
        return raw.clamp(SCORE_MIN, SCORE_MAX);
    }
    raw
}

/// Quiet clamp for scores built from stacked bonuses
pub fn clamp_score(raw: f64) -> f64 {
    if raw.is_nan() {
        SCORE_MIN
    } else {
        raw.clamp(SCORE_MIN, SCORE_MAX)
    }
}

/// Round a guarded score to the integer scale used in results
pub fn round_score(raw: f64, context: &str) -> u8 {
    guard_score(raw.round(), context) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_passes_valid_values() {
        assert_eq!(guard_score(42.5, "test"), 42.5);
        assert_eq!(guard_score(0.0, "test"), 0.0);
        assert_eq!(guard_score(100.0, "test"), 100.0);
    }

    #[test]
    fn test_guard_clamps_and_zeroes() {
        assert_eq!(guard_score(130.0, "test"), 100.0);
        assert_eq!(guard_score(-4.0, "test"), 0.0);
        assert_eq!(guard_score(f64::NAN, "test"), 0.0);
        assert_eq!(guard_score(f64::INFINITY, "test"), 100.0);
    }

    #[test]
    fn test_clamp_and_round() {
        assert_eq!(clamp_score(112.0), 100.0);
        assert_eq!(round_score(84.6, "test"), 85);
        assert_eq!(round_score(-1.0, "test"), 0);
    }
}
