//! Emotional Stability Progress and Emotional Regulation.
//!
//! Both start from questionnaire self-report and are pushed up by practice
//! evidence. Neither needs notes; both score 0 with no questionnaire and no
//! sessions.

use crate::invariants::clamp_score;
use crate::normalize::NormalizedInputs;
use crate::questionnaire::{answers, QuestionnaireProfile as Q};

/// Quality rating counted as a "quality" session
const QUALITY_SESSION_RATING: f64 = 4.0;

/// Practice weeks beyond this add nothing to regulation
const MAX_PRACTICE_WEEKS: usize = 10;

pub fn emotional_stability(inputs: &NormalizedInputs) -> f64 {
    if !inputs.has_any_data() {
        return 0.0;
    }

    let mut score = 40.0;
    if let Some(q) = &inputs.questionnaire {
        score += match q.emotional_awareness {
            Some(a) if a >= 8.0 => 20.0,
            Some(a) if a >= 6.0 => 12.0,
            Some(a) if a >= 4.0 => 6.0,
            _ => 0.0,
        };
        if Q::is(&q.stress_response, answers::OBSERVE_AND_LET_GO) {
            score += 10.0;
        }
        if Q::is(&q.thought_patterns, answers::PEACEFUL) {
            score += 10.0;
        }
        if Q::is(&q.self_reflection, answers::DAILY) {
            score += 5.0;
        }
    }

    if inputs.has_sessions() {
        if inputs.recent_sessions().count() >= 5 {
            score += 15.0;
        }
        score += inputs.average_quality() * 3.0;
    }

    clamp_score(score)
}

pub fn emotional_regulation(inputs: &NormalizedInputs) -> f64 {
    if !inputs.has_any_data() {
        return 0.0;
    }

    let mut score = 45.0;
    if let Some(q) = &inputs.questionnaire {
        score += match q.emotional_awareness {
            Some(a) if a >= 8.0 => 15.0,
            Some(a) if a >= 6.0 => 10.0,
            Some(a) if a >= 4.0 => 5.0,
            _ => 0.0,
        };
        if Q::is(&q.decision_making, answers::INTUITIVE_MINDFUL) {
            score += 8.0;
        }
        if Q::is(&q.self_reflection, answers::DAILY) {
            score += 5.0;
        }
        if Q::is(&q.mindfulness_in_daily_life, answers::CONSTANT) {
            score += 7.0;
        }
    }

    if inputs.has_sessions() {
        score += inputs.practice_weeks().min(MAX_PRACTICE_WEEKS) as f64;
        let quality = inputs
            .sessions
            .iter()
            .filter(|s| s.quality >= QUALITY_SESSION_RATING)
            .count();
        score += 8.0 * quality as f64 / inputs.session_count() as f64;
    }

    clamp_score(score)
}
