//! Typed view over the questionnaire's loose response map.
//!
//! The questionnaire is persisted as string keys mapped to arbitrary JSON
//! values. Calculators never touch that map; they read this closed set of
//! optional fields instead. A missing, mistyped or unrecognised answer is
//! simply `None` and contributes nothing.

use serde::Serialize;
use serde_json::{Map, Value};

/// Canonical categorical answers that carry a score contribution
pub mod answers {
    pub const VERY_ACTIVE: &str = "very_active";
    pub const OPTIMAL: &str = "optimal";
    pub const PERFECT_INTEGRATION: &str = "perfect_integration";
    pub const MINDFUL: &str = "mindful";
    pub const DISCIPLINED: &str = "disciplined";
    pub const DEEP_MEANINGFUL: &str = "deep_meaningful";
    pub const ALTRUISTIC: &str = "altruistic";
    pub const OBSERVE_AND_LET_GO: &str = "observe_and_let_go";
    pub const PEACEFUL: &str = "peaceful";
    pub const DAILY: &str = "daily";
    pub const INTUITIVE_MINDFUL: &str = "intuitive_mindful";
    pub const CONSTANT: &str = "constant";
}

/// Scored subset of the intake questionnaire
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuestionnaireProfile {
    /// Overall meditation experience, 1-10
    pub experience_level: Option<f64>,
    /// Mindfulness experience, 1-10
    pub mindfulness_experience: Option<f64>,
    /// Typical sleep, hours per night
    pub sleep_hours: Option<f64>,
    pub physical_activity: Option<String>,
    pub work_life_balance: Option<String>,
    pub diet_pattern: Option<String>,
    pub daily_routine: Option<String>,
    pub social_connections: Option<String>,
    pub motivation: Option<String>,
    /// Emotional awareness, 1-10
    pub emotional_awareness: Option<f64>,
    pub stress_response: Option<String>,
    pub thought_patterns: Option<String>,
    pub self_reflection: Option<String>,
    pub decision_making: Option<String>,
    pub mindfulness_in_daily_life: Option<String>,
}

impl QuestionnaireProfile {
    /// Build the typed profile from a raw response map
    pub fn from_responses(responses: &Map<String, Value>) -> Self {
        Self {
            experience_level: number(responses, "experience_level"),
            mindfulness_experience: number(responses, "mindfulness_experience"),
            sleep_hours: number(responses, "sleep_pattern"),
            physical_activity: choice(responses, "physical_activity"),
            work_life_balance: choice(responses, "work_life_balance"),
            diet_pattern: choice(responses, "diet_pattern"),
            daily_routine: choice(responses, "daily_routine"),
            social_connections: choice(responses, "social_connections"),
            motivation: choice(responses, "motivation"),
            emotional_awareness: number(responses, "emotional_awareness"),
            stress_response: choice(responses, "stress_response"),
            thought_patterns: choice(responses, "thought_patterns"),
            self_reflection: choice(responses, "self_reflection"),
            decision_making: choice(responses, "decision_making"),
            mindfulness_in_daily_life: choice(responses, "mindfulness_in_daily_life"),
        }
    }

    /// True when `field` holds the canonical answer `expected`
    pub fn is(field: &Option<String>, expected: &str) -> bool {
        field.as_deref() == Some(expected)
    }
}

/// Numeric answer, accepting JSON numbers or numeric strings
fn number(responses: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match responses.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

/// Categorical answer folded to snake_case ("Very Active" -> "very_active")
fn choice(responses: &Map<String, Value>, key: &str) -> Option<String> {
    let raw = responses.get(key)?.as_str()?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(
        raw.chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect(),
    )
}
