//! Attachment Flexibility.

use crate::invariants::clamp_score;
use crate::normalize::NormalizedInputs;

const BASELINE: f64 = 50.0;

/// Bonus at 6/6 non-attached categories
const NON_ATTACHMENT_MAX_BONUS: f64 = 25.0;

pub fn attachment_flexibility(inputs: &NormalizedInputs) -> f64 {
    let Some(sa) = inputs.self_assessment else {
        return 0.0;
    };

    let tier = match sa.attachment_score {
        s if s <= -10 => 25.0,
        s if s <= -5 => 15.0,
        s if s <= 0 => 10.0,
        // unreachable while attachment_score is derived, kept for stored values
        _ => -10.0,
    };
    let non_attachment = f64::from(sa.non_attachment_count.min(6)) / 6.0 * NON_ATTACHMENT_MAX_BONUS;

    clamp_score(BASELINE + tier + non_attachment)
}
