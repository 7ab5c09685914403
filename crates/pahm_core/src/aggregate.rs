//! Weighted aggregation and user level classification.

use crate::components::{Component, ComponentBreakdown};
use crate::error::{PahmError, Result};
use crate::invariants::guard_score;
use serde::{Deserialize, Serialize};

/// Component weights. They sum to 1.0.
pub const WEIGHTS: [(Component, f64); 8] = [
    (Component::PahmDevelopment, 0.30),
    (Component::EmotionalStability, 0.20),
    (Component::CurrentMood, 0.15),
    (Component::MindRecovery, 0.12),
    (Component::EmotionalRegulation, 0.10),
    (Component::AttachmentFlexibility, 0.08),
    (Component::SocialConnection, 0.03),
    (Component::PracticeConsistency, 0.02),
];

/// Level bands (min score, level), highest first
pub const LEVEL_BANDS: &[(u8, UserLevel)] = &[
    (80, UserLevel::MasterPractitioner),
    (65, UserLevel::AdvancedPractitioner),
    (45, UserLevel::DevelopingPractitioner),
    (25, UserLevel::EmergingPractitioner),
    (10, UserLevel::Beginner),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserLevel {
    #[default]
    NewUser,
    Beginner,
    EmergingPractitioner,
    DevelopingPractitioner,
    AdvancedPractitioner,
    MasterPractitioner,
}

impl UserLevel {
    /// First band the score reaches, else New User
    pub fn from_score(score: u8) -> Self {
        LEVEL_BANDS
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, level)| *level)
            .unwrap_or(UserLevel::NewUser)
    }

    pub fn label(self) -> &'static str {
        match self {
            UserLevel::NewUser => "New User",
            UserLevel::Beginner => "Beginner",
            UserLevel::EmergingPractitioner => "Emerging Practitioner",
            UserLevel::DevelopingPractitioner => "Developing Practitioner",
            UserLevel::AdvancedPractitioner => "Advanced Practitioner",
            UserLevel::MasterPractitioner => "Master Practitioner",
        }
    }
}

impl std::fmt::Display for UserLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregated result of the eight components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub happiness_points: u8,
    pub user_level: UserLevel,
    pub focus_ability: u8,
    pub habit_change_score: u8,
}

/// Weighted sum, rounded. Errors if the sum is not finite.
pub fn composite(breakdown: &ComponentBreakdown) -> Result<u8> {
    let sum: f64 = WEIGHTS
        .iter()
        .map(|(component, weight)| weight * f64::from(breakdown.get(*component)))
        .sum();
    if !sum.is_finite() {
        return Err(PahmError::Computation(format!("composite is not finite: {}", sum)));
    }
    Ok(guard_score(sum.round(), "happiness_points") as u8)
}

/// Composite, level and the two derived practice metrics
pub fn aggregate(breakdown: &ComponentBreakdown) -> Result<Aggregate> {
    let happiness_points = composite(breakdown)?;
    let pahm = f64::from(breakdown.pahm_development);
    let focus = (pahm + 0.5 * f64::from(breakdown.emotional_regulation)).round().min(100.0);
    let habit = (pahm + 0.8 * f64::from(breakdown.practice_consistency)).round().min(100.0);

    Ok(Aggregate {
        happiness_points,
        user_level: UserLevel::from_score(happiness_points),
        focus_ability: focus as u8,
        habit_change_score: habit as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(score: u8) -> ComponentBreakdown {
        ComponentBreakdown {
            pahm_development: score,
            emotional_stability: score,
            current_mood: score,
            mind_recovery: score,
            emotional_regulation: score,
            attachment_flexibility: score,
            social_connection: score,
            practice_consistency: score,
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_breakdown_keeps_its_value() {
        assert_eq!(composite(&uniform(0)).unwrap(), 0);
        assert_eq!(composite(&uniform(70)).unwrap(), 70);
        assert_eq!(composite(&uniform(100)).unwrap(), 100);
    }

    #[test]
    fn test_weighted_sum() {
        let b = ComponentBreakdown {
            pahm_development: 30,
            attachment_flexibility: 85,
            social_connection: 50,
            ..Default::default()
        };
        // 9 + 6.8 + 1.5 = 17.3
        assert_eq!(composite(&b).unwrap(), 17);
    }

    #[test]
    fn test_level_bands() {
        assert_eq!(UserLevel::from_score(0), UserLevel::NewUser);
        assert_eq!(UserLevel::from_score(9), UserLevel::NewUser);
        assert_eq!(UserLevel::from_score(10), UserLevel::Beginner);
        assert_eq!(UserLevel::from_score(25), UserLevel::EmergingPractitioner);
        assert_eq!(UserLevel::from_score(45), UserLevel::DevelopingPractitioner);
        assert_eq!(UserLevel::from_score(65), UserLevel::AdvancedPractitioner);
        assert_eq!(UserLevel::from_score(80), UserLevel::MasterPractitioner);
        assert_eq!(UserLevel::from_score(100), UserLevel::MasterPractitioner);
    }

    #[test]
    fn test_focus_and_habit_are_capped() {
        let agg = aggregate(&uniform(90)).unwrap();
        assert_eq!(agg.focus_ability, 100);
        assert_eq!(agg.habit_change_score, 100);

        let b = ComponentBreakdown {
            pahm_development: 30,
            emotional_regulation: 45,
            practice_consistency: 25,
            ..Default::default()
        };
        let agg = aggregate(&b).unwrap();
        // 30 + 22.5 -> 53 (round half away from zero), 30 + 20
        assert_eq!(agg.focus_ability, 53);
        assert_eq!(agg.habit_change_score, 50);
    }
}
