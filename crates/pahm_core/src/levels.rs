//! T-level and PAHM-stage identifiers.
//!
//! Five foundational T-levels (T1-T5) come first. PAHM stage 1 is the
//! always-open baseline; stages 2-6 are the tracked advanced stages.

use crate::error::{PahmError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Rated sessions needed at a T-level before the next one opens
pub const T_LEVEL_REQUIRED_SESSIONS: u32 = 3;

/// Practice hours needed to complete a PAHM stage
pub const PAHM_STAGE_REQUIRED_HOURS: f64 = 15.0;

/// Foundational practice level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TLevel {
    T1,
    T2,
    T3,
    T4,
    T5,
}

impl TLevel {
    pub const ALL: [TLevel; 5] = [TLevel::T1, TLevel::T2, TLevel::T3, TLevel::T4, TLevel::T5];

    pub fn number(self) -> u8 {
        match self {
            TLevel::T1 => 1,
            TLevel::T2 => 2,
            TLevel::T3 => 3,
            TLevel::T4 => 4,
            TLevel::T5 => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(TLevel::T1),
            2 => Some(TLevel::T2),
            3 => Some(TLevel::T3),
            4 => Some(TLevel::T4),
            5 => Some(TLevel::T5),
            _ => None,
        }
    }

    /// Level that gates this one, if any
    pub fn previous(self) -> Option<TLevel> {
        Self::from_number(self.number() - 1)
    }

    /// Lenient parse of a session's level label.
    ///
    /// Accepts "t1", "T-1", "T_1", "level 1", "Level1" and bare "1".
    pub fn from_label(label: &str) -> Option<Self> {
        let folded: String = label
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let digits = folded
            .strip_prefix("level")
            .or_else(|| folded.strip_prefix('t'))
            .unwrap_or(folded.as_str());
        digits.parse::<u8>().ok().and_then(Self::from_number)
    }
}

impl FromStr for TLevel {
    type Err = PahmError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s).ok_or_else(|| PahmError::UnknownLevel(s.to_string()))
    }
}

impl std::fmt::Display for TLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}", self.number())
    }
}

/// PAHM stage number, validated to 1..=6
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PahmStage(u8);

impl PahmStage {
    /// Stage 1, open to everyone
    pub const BASELINE: PahmStage = PahmStage(1);
    /// Highest stage
    pub const FINAL: PahmStage = PahmStage(6);

    pub fn new(n: u8) -> Result<Self> {
        if (1..=6).contains(&n) {
            Ok(PahmStage(n))
        } else {
            Err(PahmError::UnknownStage(n))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Stages 2-6, in unlock order
    pub fn tracked() -> impl Iterator<Item = PahmStage> {
        (2..=6).map(PahmStage)
    }

    pub fn is_baseline(self) -> bool {
        self.0 == 1
    }

    pub fn previous(self) -> Option<PahmStage> {
        (self.0 > 1).then(|| PahmStage(self.0 - 1))
    }

    pub fn display_name(self) -> &'static str {
        match self.0 {
            1 => "Baseline",
            2 => "PAHM Trainee",
            3 => "PAHM Beginner",
            4 => "PAHM Practitioner",
            5 => "PAHM Master",
            _ => "PAHM Illuminator",
        }
    }
}

impl TryFrom<u8> for PahmStage {
    type Error = PahmError;

    fn try_from(n: u8) -> Result<Self> {
        Self::new(n)
    }
}

impl From<PahmStage> for u8 {
    fn from(stage: PahmStage) -> u8 {
        stage.0
    }
}

impl std::fmt::Display for PahmStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stage {} ({})", self.0, self.display_name())
    }
}
