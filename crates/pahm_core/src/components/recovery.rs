//! Mind Recovery Effectiveness.

use crate::invariants::clamp_score;
use crate::normalize::NormalizedInputs;

pub fn mind_recovery_effectiveness(inputs: &NormalizedInputs) -> f64 {
    if !inputs.has_sessions() {
        return 0.0;
    }

    let avg_minutes = inputs.average_duration();
    let duration_bonus = if avg_minutes >= 20.0 {
        25.0
    } else if avg_minutes >= 10.0 {
        15.0
    } else if avg_minutes >= 5.0 {
        10.0
    } else {
        0.0
    };

    let count = inputs.session_count();
    let volume_bonus = if count >= 10 {
        15.0
    } else if count >= 5 {
        10.0
    } else {
        0.0
    };

    clamp_score(40.0 + duration_bonus + volume_bonus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::*;
    use crate::records::RecordSnapshot;

    fn score(count: usize, minutes: f64) -> f64 {
        mind_recovery_effectiveness(&inputs(RecordSnapshot {
            sessions: daily_sessions(count, minutes, 3.0),
            ..Default::default()
        }))
    }

    #[test]
    fn test_requires_a_session() {
        assert_eq!(score(0, 30.0), 0.0);
    }

    #[test]
    fn test_duration_and_volume_tiers() {
        assert_eq!(score(1, 2.0), 40.0);
        assert_eq!(score(1, 5.0), 50.0);
        assert_eq!(score(5, 10.0), 65.0);
        assert_eq!(score(10, 20.0), 80.0);
    }
}
