//! Practice Consistency.

use crate::invariants::clamp_score;
use crate::normalize::NormalizedInputs;

pub fn practice_consistency(inputs: &NormalizedInputs, streak: u32) -> f64 {
    if !inputs.has_sessions() {
        return 0.0;
    }

    let recent = inputs.recent_sessions().count();
    let volume_bonus = match recent {
        n if n >= 20 => 40.0,
        n if n >= 15 => 30.0,
        n if n >= 10 => 20.0,
        n if n >= 5 => 10.0,
        _ => 0.0,
    };
    let streak_bonus = match streak {
        s if s >= 7 => 30.0,
        s if s >= 3 => 15.0,
        s if s >= 1 => 5.0,
        _ => 0.0,
    };

    clamp_score(20.0 + volume_bonus + streak_bonus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::*;
    use crate::records::RecordSnapshot;

    fn score(count: usize, streak: u32) -> f64 {
        practice_consistency(
            &inputs(RecordSnapshot {
                sessions: daily_sessions(count, 10.0, 3.0),
                ..Default::default()
            }),
            streak,
        )
    }

    #[test]
    fn test_requires_a_session() {
        assert_eq!(score(0, 5), 0.0);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(score(1, 1), 25.0);
        assert_eq!(score(5, 3), 45.0);
        assert_eq!(score(20, 7), 90.0);
    }

    #[test]
    fn test_old_sessions_do_not_count_as_recent() {
        // 40 daily sessions, only 30 fall inside the window
        assert_eq!(score(40, 0), 60.0);
    }
}
