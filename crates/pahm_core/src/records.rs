//! Raw input records owned by the record store.
//!
//! These are read-only to the engine. Every numeric field is optional so a
//! partially written record still deserializes; defaults are applied once in
//! `normalize`, never here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Kind of practice session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    #[default]
    Meditation,
    MindRecovery,
}

/// Unknown kinds read as meditation so the session still counts
impl<'de> Deserialize<'de> for SessionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "meditation" => SessionKind::Meditation,
            "mind_recovery" => SessionKind::MindRecovery,
            other => {
                warn!(kind = other, "unknown session kind, treating as meditation");
                SessionKind::Meditation
            }
        })
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Meditation => write!(f, "meditation"),
            Self::MindRecovery => write!(f, "mind_recovery"),
        }
    }
}

/// A single logged practice session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeSession {
    /// When the session happened
    pub timestamp: DateTime<Utc>,
    /// Session length in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    /// Self-reported quality (1-5), absent when the user skipped rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Level label as recorded by the client ("t1", "T-2", "level 3", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default)]
    pub kind: SessionKind,
}

impl PracticeSession {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            duration_minutes: None,
            rating: None,
            level: None,
            kind: SessionKind::Meditation,
        }
    }

    pub fn with_duration(mut self, minutes: f64) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_level(mut self, label: &str) -> Self {
        self.level = Some(label.to_string());
        self
    }

    pub fn with_kind(mut self, kind: SessionKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Emotional check-in note (each scale 1-10)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalNote {
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress: Option<f64>,
}

impl EmotionalNote {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            mood: None,
            energy: None,
            stress: None,
        }
    }

    pub fn with_mood(mut self, mood: f64) -> Self {
        self.mood = Some(mood);
        self
    }

    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn with_stress(mut self, stress: f64) -> Self {
        self.stress = Some(stress);
        self
    }
}

/// One-time intake questionnaire, stored as a loose response map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub responses: Map<String, Value>,
}

impl Questionnaire {
    /// A completed questionnaire with no answers yet
    pub fn completed() -> Self {
        Self {
            completed: true,
            responses: Map::new(),
        }
    }

    pub fn with_response(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.responses.insert(key.to_string(), value.into());
        self
    }
}

/// Sense-door category rated in the self-assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenseCategory {
    Taste,
    Smell,
    Sound,
    Sight,
    Touch,
    Mind,
}

impl SenseCategory {
    pub const ALL: [SenseCategory; 6] = [
        SenseCategory::Taste,
        SenseCategory::Smell,
        SenseCategory::Sound,
        SenseCategory::Sight,
        SenseCategory::Touch,
        SenseCategory::Mind,
    ];
}

/// Reported attachment to a sense category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentLevel {
    #[serde(rename = "none")]
    Absent,
    #[serde(rename = "some")]
    Mild,
    #[serde(rename = "strong")]
    Strong,
}

impl AttachmentLevel {
    /// Contribution to the attachment score (always <= 0)
    pub fn penalty(self) -> i32 {
        match self {
            AttachmentLevel::Absent => 0,
            AttachmentLevel::Mild => -7,
            AttachmentLevel::Strong => -15,
        }
    }
}

/// One-time sense-attachment self-assessment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelfAssessment {
    #[serde(default)]
    pub completed: bool,
    /// Unknown categories and levels are dropped on read
    #[serde(default, deserialize_with = "lenient_categories")]
    pub categories: BTreeMap<SenseCategory, AttachmentLevel>,
}

impl SelfAssessment {
    pub fn completed() -> Self {
        Self {
            completed: true,
            categories: BTreeMap::new(),
        }
    }

    pub fn with_category(mut self, category: SenseCategory, level: AttachmentLevel) -> Self {
        self.categories.insert(category, level);
        self
    }

    /// Summed penalties across categories. Never positive.
    pub fn attachment_score(&self) -> i32 {
        self.categories.values().map(|l| l.penalty()).sum()
    }

    /// Categories reported with no attachment, in [0, 6]
    pub fn non_attachment_count(&self) -> u8 {
        self.categories
            .values()
            .filter(|l| **l == AttachmentLevel::Absent)
            .count() as u8
    }
}

fn lenient_categories<'de, D>(deserializer: D) -> Result<BTreeMap<SenseCategory, AttachmentLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(raw) = Value::deserialize(deserializer)? else {
        warn!("self-assessment categories are not a map, ignoring them");
        return Ok(BTreeMap::new());
    };

    let mut categories = BTreeMap::new();
    for (key, value) in raw {
        let category = serde_json::from_value::<SenseCategory>(Value::String(key.clone()));
        let level = serde_json::from_value::<AttachmentLevel>(value.clone());
        match (category, level) {
            (Ok(category), Ok(level)) => {
                categories.insert(category, level);
            }
            _ => warn!(category = %key, value = %value, "ignoring unknown self-assessment entry"),
        }
    }
    Ok(categories)
}

/// Everything the record store holds for one user, read in one pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    #[serde(default)]
    pub sessions: Vec<PracticeSession>,
    #[serde(default)]
    pub notes: Vec<EmotionalNote>,
    #[serde(default)]
    pub questionnaire: Option<Questionnaire>,
    #[serde(default)]
    pub self_assessment: Option<SelfAssessment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_score_sums_penalties() {
        let sa = SelfAssessment::completed()
            .with_category(SenseCategory::Taste, AttachmentLevel::Strong)
            .with_category(SenseCategory::Sound, AttachmentLevel::Mild)
            .with_category(SenseCategory::Mind, AttachmentLevel::Absent);
        assert_eq!(sa.attachment_score(), -22);
        assert_eq!(sa.non_attachment_count(), 1);
    }

    #[test]
    fn test_attachment_bounds_hold_for_every_level() {
        for level in [AttachmentLevel::Absent, AttachmentLevel::Mild, AttachmentLevel::Strong] {
            let mut sa = SelfAssessment::completed();
            for cat in SenseCategory::ALL {
                sa = sa.with_category(cat, level);
            }
            assert!(sa.attachment_score() <= 0);
            assert!(sa.non_attachment_count() <= 6);
        }
    }

    #[test]
    fn test_session_deserializes_with_missing_fields() {
        let json = r#"{"timestamp":"2026-01-05T08:00:00Z"}"#;
        let session: PracticeSession = serde_json::from_str(json).unwrap();
        assert!(session.rating.is_none());
        assert!(session.duration_minutes.is_none());
        assert_eq!(session.kind, SessionKind::Meditation);
    }

    #[test]
    fn test_self_assessment_wire_names() {
        let json = r#"{"completed":true,"categories":{"taste":"strong","mind":"none"}}"#;
        let sa: SelfAssessment = serde_json::from_str(json).unwrap();
        assert_eq!(sa.categories[&SenseCategory::Taste], AttachmentLevel::Strong);
        assert_eq!(sa.categories[&SenseCategory::Mind], AttachmentLevel::Absent);
    }

    #[test]
    fn test_missing_completed_flag_reads_as_incomplete() {
        let q: Questionnaire = serde_json::from_str(r#"{"responses":{"experience_level":5}}"#).unwrap();
        assert!(!q.completed);
        assert_eq!(q.responses.len(), 1);

        let sa: SelfAssessment = serde_json::from_str(r#"{"categories":{}}"#).unwrap();
        assert!(!sa.completed);
    }

    #[test]
    fn test_unknown_assessment_entries_are_dropped() {
        let json = r#"{"completed":true,"categories":{"taste":"moderate","smell":"none","aura":"strong"}}"#;
        let sa: SelfAssessment = serde_json::from_str(json).unwrap();
        assert_eq!(sa.categories.len(), 1);
        assert_eq!(sa.non_attachment_count(), 1);

        let sa: SelfAssessment = serde_json::from_str(r#"{"completed":true,"categories":null}"#).unwrap();
        assert!(sa.categories.is_empty());
    }

    #[test]
    fn test_unknown_session_kind_reads_as_meditation() {
        let json = r#"{"timestamp":"2026-01-05T08:00:00Z","kind":"yoga"}"#;
        let session: PracticeSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.kind, SessionKind::Meditation);

        let json = r#"{"timestamp":"2026-01-05T08:00:00Z","kind":"mind_recovery"}"#;
        let session: PracticeSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.kind, SessionKind::MindRecovery);
    }
}
