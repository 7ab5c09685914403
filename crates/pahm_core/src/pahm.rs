//! PAHM developmental stage classifier.
//!
//! Produces the narrative classification (stage, description, progression
//! path, insights) and the 0-100 score that feeds the aggregator as the PAHM
//! Development component.
//!
//! With no sessions the score is a questionnaire baseline:
//!   experience tier (25/20/18/15) + mindfulness tier (+5/+3/+0)
//!
//! With sessions it is the sum of four parts:
//!   present-neutral mastery   0-50  session-count tiers, +15 for avg quality >= 4
//!   present-moment development 0-30 2 per session (max 25), +5 past 300 minutes
//!   therapeutic progress       0-15 2 per three sessions
//!   session quality            0-5  average rating

use crate::invariants::round_score;
use crate::normalize::NormalizedInputs;
use crate::questionnaire::QuestionnaireProfile;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Developmental stage label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevelopmentStage {
    ScatteredMind,
    ScatteredMindWithExperience,
    InitialAwareness,
    ReturnOfAttention,
    DevelopingPresentAttention,
    PresentNeutralMastery,
}

impl DevelopmentStage {
    /// Stage band for a session-based score
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            DevelopmentStage::PresentNeutralMastery
        } else if score >= 60.0 {
            DevelopmentStage::DevelopingPresentAttention
        } else if score >= 40.0 {
            DevelopmentStage::ReturnOfAttention
        } else if score >= 20.0 {
            DevelopmentStage::InitialAwareness
        } else {
            DevelopmentStage::ScatteredMind
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DevelopmentStage::ScatteredMind => "Scattered Mind",
            DevelopmentStage::ScatteredMindWithExperience => "Scattered Mind with Experience",
            DevelopmentStage::InitialAwareness => "Initial Awareness",
            DevelopmentStage::ReturnOfAttention => "Return of Attention",
            DevelopmentStage::DevelopingPresentAttention => "Developing Present Attention",
            DevelopmentStage::PresentNeutralMastery => "Present-Neutral Mastery",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DevelopmentStage::ScatteredMind => {
                "Attention moves freely between past and future thoughts with little noticing."
            }
            DevelopmentStage::ScatteredMindWithExperience => {
                "Some familiarity with practice, but attention is not yet anchored in the present."
            }
            DevelopmentStage::InitialAwareness => {
                "You are beginning to notice where attention goes and when it drifts."
            }
            DevelopmentStage::ReturnOfAttention => {
                "Attention wanders less often and returns to the present more quickly."
            }
            DevelopmentStage::DevelopingPresentAttention => {
                "Present-moment attention is becoming a stable default during practice."
            }
            DevelopmentStage::PresentNeutralMastery => {
                "Attention rests in the present with a neutral, non-reactive quality."
            }
        }
    }

    pub fn progression_path(self) -> &'static str {
        match self {
            DevelopmentStage::ScatteredMind | DevelopmentStage::ScatteredMindWithExperience => {
                "Establish a daily session to move toward Initial Awareness."
            }
            DevelopmentStage::InitialAwareness => {
                "Build session volume and quality to reach Return of Attention."
            }
            DevelopmentStage::ReturnOfAttention => {
                "Lengthen sessions and rate them honestly to reach Developing Present Attention."
            }
            DevelopmentStage::DevelopingPresentAttention => {
                "Sustain high-quality practice over many sessions to reach Present-Neutral Mastery."
            }
            DevelopmentStage::PresentNeutralMastery => {
                "Maintain and deepen present-neutral attention in daily life."
            }
        }
    }
}

impl std::fmt::Display for DevelopmentStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Session-based score parts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PahmScoreParts {
    pub present_neutral_mastery: f64,
    pub present_moment_development: f64,
    pub therapeutic_progress: f64,
    pub session_quality: f64,
}

impl PahmScoreParts {
    pub fn total(&self) -> f64 {
        self.present_neutral_mastery
            + self.present_moment_development
            + self.therapeutic_progress
            + self.session_quality
    }
}

/// Full PAHM classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PahmAnalysis {
    /// 0-100
    pub score: u8,
    pub stage: DevelopmentStage,
    pub description: String,
    pub progression_path: String,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    /// Absent for a questionnaire-only baseline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<PahmScoreParts>,
}

/// Classify the user's PAHM development
pub fn analyze(inputs: &NormalizedInputs) -> PahmAnalysis {
    let analysis = if inputs.has_sessions() {
        from_sessions(inputs)
    } else {
        baseline(inputs.questionnaire.as_ref())
    };
    debug!(score = analysis.score, stage = %analysis.stage, "PAHM analysis");
    analysis
}

fn baseline(questionnaire: Option<&QuestionnaireProfile>) -> PahmAnalysis {
    let experience = questionnaire.and_then(|q| q.experience_level);
    let mindfulness = questionnaire.and_then(|q| q.mindfulness_experience);

    let experience_score = match experience {
        Some(e) if e >= 8.0 => 25.0,
        Some(e) if e >= 6.0 => 20.0,
        Some(e) if e >= 4.0 => 18.0,
        _ => 15.0,
    };
    let mindfulness_bonus = match mindfulness {
        Some(m) if m >= 8.0 => 5.0,
        Some(m) if m >= 5.0 => 3.0,
        _ => 0.0,
    };
    let score = experience_score + mindfulness_bonus;

    let stage = if score >= 20.0 {
        DevelopmentStage::InitialAwareness
    } else {
        DevelopmentStage::ScatteredMindWithExperience
    };

    let insight = if experience.unwrap_or(0.0) >= 6.0 {
        "Your prior practice experience gives you a head start."
    } else {
        "Every practitioner starts here; consistency matters more than experience."
    };

    PahmAnalysis {
        score: round_score(score, "pahm_baseline"),
        stage,
        description: stage.description().to_string(),
        progression_path: stage.progression_path().to_string(),
        insights: vec![insight.to_string()],
        recommendations: vec![
            "Log your first practice session to replace this estimate with real progress.".to_string(),
        ],
        parts: None,
    }
}

fn from_sessions(inputs: &NormalizedInputs) -> PahmAnalysis {
    let count = inputs.session_count();
    let avg_quality = inputs.average_quality();

    let volume = match count {
        n if n >= 50 => 35.0,
        n if n >= 20 => 25.0,
        _ => 10.0,
    };
    let quality_bonus = if avg_quality >= 4.0 { 15.0 } else { 0.0 };
    let duration_bonus = if inputs.total_duration() > 300.0 { 5.0 } else { 0.0 };

    let parts = PahmScoreParts {
        present_neutral_mastery: f64::min(volume + quality_bonus, 50.0),
        present_moment_development: f64::min(2.0 * count as f64, 25.0) + duration_bonus,
        therapeutic_progress: f64::min(2.0 * (count / 3) as f64, 15.0),
        session_quality: avg_quality.min(5.0),
    };
    let score = parts.total();
    let stage = DevelopmentStage::from_score(score);

    let (insight, recommendation) = match count {
        n if n < 10 => (
            "You are laying the foundation: each session trains attention to return.",
            "Keep sessions short and daily until the habit feels automatic.",
        ),
        n if n < 30 => (
            "Your attention is returning to the present more reliably.",
            "Gradually extend sessions toward 20 minutes.",
        ),
        _ => (
            "Sustained practice is stabilising present-moment attention.",
            "Bring present-neutral noticing into everyday activities.",
        ),
    };
    let mut insights = vec![insight.to_string()];
    if avg_quality >= 4.0 {
        insights.push("Your sessions are consistently high quality.".to_string());
    }

    PahmAnalysis {
        score: round_score(score, "pahm_sessions"),
        stage,
        description: stage.description().to_string(),
        progression_path: stage.progression_path().to_string(),
        insights,
        recommendations: vec![recommendation.to_string()],
        parts: Some(parts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::*;
    use crate::records::RecordSnapshot;
    use serde_json::json;

    fn with_sessions(count: usize, minutes: f64, rating: f64) -> PahmAnalysis {
        analyze(&inputs(RecordSnapshot {
            sessions: daily_sessions(count, minutes, rating),
            ..Default::default()
        }))
    }

    #[test]
    fn test_baseline_from_experience() {
        let q = questionnaire(&[
            ("experience_level", json!(8)),
            ("mindfulness_experience", json!(9)),
        ]);
        let a = analyze(&inputs(RecordSnapshot {
            questionnaire: Some(q),
            ..Default::default()
        }));
        assert_eq!(a.score, 30);
        assert_eq!(a.stage, DevelopmentStage::InitialAwareness);
        assert!(a.parts.is_none());
        assert!(a.recommendations[0].contains("session"));
    }

    #[test]
    fn test_baseline_low_experience() {
        let q = questionnaire(&[("experience_level", json!(2))]);
        let a = analyze(&inputs(RecordSnapshot {
            questionnaire: Some(q),
            ..Default::default()
        }));
        assert_eq!(a.score, 15);
        assert_eq!(a.stage, DevelopmentStage::ScatteredMindWithExperience);
    }

    #[test]
    fn test_few_sessions() {
        // 3 sessions, 10 min, rated 3
        let a = with_sessions(3, 10.0, 3.0);
        let parts = a.parts.unwrap();
        assert_eq!(parts.present_neutral_mastery, 10.0);
        assert_eq!(parts.present_moment_development, 6.0);
        assert_eq!(parts.therapeutic_progress, 2.0);
        assert_eq!(parts.session_quality, 3.0);
        assert_eq!(a.score, 21);
        assert_eq!(a.stage, DevelopmentStage::InitialAwareness);
    }

    #[test]
    fn test_many_quality_sessions_reach_mastery() {
        // 60 sessions * 20 min, rated 5: 50 + 30 + 15 + 5
        let a = with_sessions(60, 20.0, 5.0);
        assert_eq!(a.score, 100);
        assert_eq!(a.stage, DevelopmentStage::PresentNeutralMastery);
        assert_eq!(a.insights.len(), 2);
    }

    #[test]
    fn test_stage_bands() {
        assert_eq!(DevelopmentStage::from_score(19.9), DevelopmentStage::ScatteredMind);
        assert_eq!(DevelopmentStage::from_score(40.0), DevelopmentStage::ReturnOfAttention);
        assert_eq!(DevelopmentStage::from_score(60.0), DevelopmentStage::DevelopingPresentAttention);
        assert_eq!(DevelopmentStage::from_score(80.0), DevelopmentStage::PresentNeutralMastery);
    }
}
