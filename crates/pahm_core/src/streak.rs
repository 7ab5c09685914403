//! Practice streak calculation.
//!
//! A streak is the run of consecutive calendar days, ending today, with at
//! least one session. A day with no practice breaks it, and so does not
//! having practiced yet today.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Streak statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    /// Consecutive days ending today
    pub current_streak: u32,
    /// Longest run ever
    pub best_streak: u32,
    /// Unique days with practice
    pub active_days: u32,
}

/// Current streak only
pub fn current_streak(days: &[NaiveDate], today: NaiveDate) -> u32 {
    calculate_streaks(days, today).current_streak
}

/// Calculate streak statistics from session days (any order, duplicates allowed)
pub fn calculate_streaks(days: &[NaiveDate], today: NaiveDate) -> StreakStats {
    if days.is_empty() {
        return StreakStats::default();
    }

    let mut days: Vec<NaiveDate> = days.to_vec();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let active_days = days.len() as u32;

    // Walk backward from today; sessions dated after today (clock skew) are skipped.
    let mut current = 0u32;
    let mut cursor = today;
    for day in days.iter().skip_while(|d| **d > today) {
        if *day != cursor {
            break;
        }
        current += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }

    let mut best = 1u32;
    let mut run = 1u32;
    for pair in days.windows(2) {
        if pair[1].succ_opt() == Some(pair[0]) {
            run += 1;
            best = best.max(run);
        } else {
            run = 1;
        }
    }

    StreakStats {
        current_streak: current,
        best_streak: best,
        active_days,
    }
}
