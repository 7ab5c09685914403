//! Current Mood State.

use crate::invariants::clamp_score;
use crate::normalize::{average, NormalizedInputs};
use crate::questionnaire::{answers, QuestionnaireProfile as Q};

const BASELINE: f64 = 50.0;

/// Score when neither a questionnaire nor notes exist
const NO_SIGNAL: f64 = 25.0;

/// Share of the score taken from recent note moods
const NOTE_BLEND: f64 = 0.2;

/// Lifestyle baseline from the questionnaire, blended 80/20 with the mean
/// mood of the most recent notes (scaled x10).
pub fn current_mood_state(inputs: &NormalizedInputs) -> f64 {
    if inputs.questionnaire.is_none() && inputs.notes.is_empty() {
        return NO_SIGNAL;
    }

    let mut score = BASELINE;
    if let Some(q) = &inputs.questionnaire {
        score += match q.sleep_hours {
            Some(h) if h >= 8.0 => 20.0,
            Some(h) if h >= 6.0 => 10.0,
            _ => 0.0,
        };
        if Q::is(&q.physical_activity, answers::VERY_ACTIVE) {
            score += 10.0;
        }
        if Q::is(&q.work_life_balance, answers::OPTIMAL)
            || Q::is(&q.work_life_balance, answers::PERFECT_INTEGRATION)
        {
            score += 15.0;
        }
        if Q::is(&q.diet_pattern, answers::MINDFUL) {
            score += 5.0;
        }
        if Q::is(&q.daily_routine, answers::DISCIPLINED) {
            score += 5.0;
        }
    }

    if !inputs.notes.is_empty() {
        let recent_mood = average(
            inputs
                .notes
                .iter()
                .take(inputs.recent_note_count)
                .map(|n| n.mood),
        );
        score = score * (1.0 - NOTE_BLEND) + recent_mood * 10.0 * NOTE_BLEND;
    }

    clamp_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::*;
    use crate::records::{EmotionalNote, RecordSnapshot};
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_lifestyle_bonuses() {
        let q = questionnaire(&[
            ("sleep_pattern", json!(8)),
            ("physical_activity", json!("very_active")),
            ("work_life_balance", json!("optimal")),
            ("diet_pattern", json!("mindful")),
            ("daily_routine", json!("disciplined")),
        ]);
        let i = inputs(RecordSnapshot {
            questionnaire: Some(q),
            ..Default::default()
        });
        assert_eq!(current_mood_state(&i), 100.0);
    }

    #[test]
    fn test_moderate_sleep_tier() {
        let i = inputs(RecordSnapshot {
            questionnaire: Some(questionnaire(&[("sleep_pattern", json!("6.5"))])),
            ..Default::default()
        });
        assert_eq!(current_mood_state(&i), 60.0);
    }

    #[test]
    fn test_blends_only_most_recent_notes() {
        let base = Utc.with_ymd_and_hms(2026, 6, 30, 9, 0, 0).unwrap();
        // five recent notes at mood 10, one old note at mood 1 that must be ignored
        let mut notes: Vec<EmotionalNote> = (0..5)
            .map(|i| EmotionalNote::new(base - Duration::hours(i)).with_mood(10.0))
            .collect();
        notes.push(EmotionalNote::new(base - Duration::days(20)).with_mood(1.0));
        let i = inputs(RecordSnapshot {
            notes,
            ..Default::default()
        });
        // 50 * 0.8 + 100 * 0.2
        assert!((current_mood_state(&i) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_mood_uses_neutral_default() {
        let note = EmotionalNote::new(Utc.with_ymd_and_hms(2026, 6, 30, 9, 0, 0).unwrap());
        let i = inputs(RecordSnapshot {
            notes: vec![note],
            ..Default::default()
        });
        // 50 * 0.8 + 50 * 0.2
        assert!((current_mood_state(&i) - 50.0).abs() < 1e-9);
    }
}
