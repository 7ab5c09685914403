//! Component score calculators.
//!
//! Eight independent sub-scores, each in [0, 100]. A calculator whose own
//! input category is missing scores 0 even when the sufficiency gate passed,
//! so a partial profile degrades per component instead of as a whole.

mod attachment;
mod consistency;
mod emotional;
mod mood;
mod recovery;
mod social;

pub use attachment::attachment_flexibility;
pub use consistency::practice_consistency;
pub use emotional::{emotional_regulation, emotional_stability};
pub use mood::current_mood_state;
pub use recovery::mind_recovery_effectiveness;
pub use social::social_connection;

use crate::invariants::round_score;
use crate::normalize::NormalizedInputs;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Named sub-score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    PahmDevelopment,
    EmotionalStability,
    CurrentMood,
    MindRecovery,
    EmotionalRegulation,
    AttachmentFlexibility,
    SocialConnection,
    PracticeConsistency,
}

impl Component {
    pub const ALL: [Component; 8] = [
        Component::PahmDevelopment,
        Component::EmotionalStability,
        Component::CurrentMood,
        Component::MindRecovery,
        Component::EmotionalRegulation,
        Component::AttachmentFlexibility,
        Component::SocialConnection,
        Component::PracticeConsistency,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Component::PahmDevelopment => "PAHM Development",
            Component::EmotionalStability => "Emotional Stability Progress",
            Component::CurrentMood => "Current Mood State",
            Component::MindRecovery => "Mind Recovery Effectiveness",
            Component::EmotionalRegulation => "Emotional Regulation",
            Component::AttachmentFlexibility => "Attachment Flexibility",
            Component::SocialConnection => "Social Connection",
            Component::PracticeConsistency => "Practice Consistency",
        }
    }
}

/// All eight sub-scores. Rebuilt wholesale on every run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentBreakdown {
    pub pahm_development: u8,
    pub emotional_stability: u8,
    pub current_mood: u8,
    pub mind_recovery: u8,
    pub emotional_regulation: u8,
    pub attachment_flexibility: u8,
    pub social_connection: u8,
    pub practice_consistency: u8,
}

impl ComponentBreakdown {
    pub fn get(&self, component: Component) -> u8 {
        match component {
            Component::PahmDevelopment => self.pahm_development,
            Component::EmotionalStability => self.emotional_stability,
            Component::CurrentMood => self.current_mood,
            Component::MindRecovery => self.mind_recovery,
            Component::EmotionalRegulation => self.emotional_regulation,
            Component::AttachmentFlexibility => self.attachment_flexibility,
            Component::SocialConnection => self.social_connection,
            Component::PracticeConsistency => self.practice_consistency,
        }
    }

    /// (component, score) pairs in weight order
    pub fn entries(&self) -> Vec<(Component, u8)> {
        Component::ALL.iter().map(|c| (*c, self.get(*c))).collect()
    }
}

/// Run every calculator. `pahm_score` comes from the stage classifier.
pub fn compute_breakdown(inputs: &NormalizedInputs, streak: u32, pahm_score: f64) -> ComponentBreakdown {
    let breakdown = ComponentBreakdown {
        pahm_development: round_score(pahm_score, "pahm_development"),
        emotional_stability: round_score(emotional_stability(inputs), "emotional_stability"),
        current_mood: round_score(current_mood_state(inputs), "current_mood"),
        mind_recovery: round_score(mind_recovery_effectiveness(inputs), "mind_recovery"),
        emotional_regulation: round_score(emotional_regulation(inputs), "emotional_regulation"),
        attachment_flexibility: round_score(attachment_flexibility(inputs), "attachment_flexibility"),
        social_connection: round_score(social_connection(inputs), "social_connection"),
        practice_consistency: round_score(practice_consistency(inputs, streak), "practice_consistency"),
    };
    debug!(?breakdown, "component breakdown computed");
    breakdown
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::EngineSettings;
    use crate::normalize::{normalize, NormalizedInputs};
    use crate::records::{PracticeSession, Questionnaire, RecordSnapshot};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
    }

    /// `count` sessions, one per day ending today
    pub fn daily_sessions(count: usize, minutes: f64, rating: f64) -> Vec<PracticeSession> {
        let noon = Utc.with_ymd_and_hms(2026, 6, 30, 12, 0, 0).unwrap();
        (0..count)
            .map(|i| {
                PracticeSession::new(noon - Duration::days(i as i64))
                    .with_duration(minutes)
                    .with_rating(rating)
            })
            .collect()
    }

    pub fn inputs(records: RecordSnapshot) -> NormalizedInputs {
        normalize(&records, &EngineSettings::default(), today())
    }

    pub fn questionnaire(pairs: &[(&str, serde_json::Value)]) -> Questionnaire {
        pairs
            .iter()
            .fold(Questionnaire::completed(), |q, (k, v)| q.with_response(k, v.clone()))
    }
}
