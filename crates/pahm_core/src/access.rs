//! Access control for T-levels and PAHM stages.
//!
//! Answers only "may the user enter this level now?". Entering, leaving and
//! marking a level complete are the caller's business. Every answer is a
//! pure function of a `StageProgress` snapshot.

use crate::levels::{PahmStage, TLevel, PAHM_STAGE_REQUIRED_HOURS, T_LEVEL_REQUIRED_SESSIONS};
use crate::tracker::StageProgress;
use serde::{Deserialize, Serialize};
use tracing::info;

/// What is missing when access is denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKind {
    /// An earlier level or stage must be completed
    Progression,
    /// More rated sessions are needed at the previous T-level
    Sessions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_kind: Option<MissingKind>,
}

impl AccessDecision {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            requirement_message: None,
            missing_kind: None,
        }
    }

    pub fn denied(kind: MissingKind, message: String) -> Self {
        Self {
            allowed: false,
            requirement_message: Some(message),
            missing_kind: Some(kind),
        }
    }
}

/// T1 is always open; Tn needs T(n-1) completed
pub fn check_t_level_access(progress: &StageProgress, level: TLevel) -> AccessDecision {
    let Some(prev) = level.previous() else {
        return AccessDecision::allowed();
    };
    let gate = progress.t_level(prev);
    if gate.completed {
        return AccessDecision::allowed();
    }

    let current = gate.completed_session_count.min(T_LEVEL_REQUIRED_SESSIONS);
    info!(level = %level, prev = %prev, current, "T-level access denied");
    AccessDecision::denied(
        MissingKind::Sessions,
        format!(
            "Complete {} rated {} sessions to unlock {} (current {}/{})",
            T_LEVEL_REQUIRED_SESSIONS, prev, level, current, T_LEVEL_REQUIRED_SESSIONS
        ),
    )
}

/// Stage 1 is always open; stage 2+ needs T1-T5, stage 3+ also the prior stage
pub fn check_pahm_stage_access(progress: &StageProgress, stage: PahmStage) -> AccessDecision {
    if stage.is_baseline() {
        return AccessDecision::allowed();
    }

    if !progress.all_t_levels_complete() {
        info!(stage = stage.number(), "PAHM stage access denied: T-levels incomplete");
        return AccessDecision::denied(
            MissingKind::Progression,
            "Complete all T-stages (T1-T5) first".to_string(),
        );
    }

    if let Some(prev) = stage.previous().filter(|p| !p.is_baseline()) {
        if !progress.pahm_stage_complete(prev) {
            let hours = progress
                .pahm_stage(prev)
                .map(|p| p.accumulated_hours)
                .unwrap_or(0.0);
            info!(stage = stage.number(), prev = prev.number(), hours, "PAHM stage access denied");
            return AccessDecision::denied(
                MissingKind::Progression,
                format!(
                    "Complete {} first ({:.1}/{:.0} hours)",
                    prev, hours, PAHM_STAGE_REQUIRED_HOURS
                ),
            );
        }
    }

    AccessDecision::allowed()
}

/// Forward scan of the stage chain.
///
/// Baseline while any T-level is open, else the first accessible stage not
/// yet completed, else the final stage.
pub fn current_accessible_stage(progress: &StageProgress) -> PahmStage {
    if !progress.all_t_levels_complete() {
        return PahmStage::BASELINE;
    }
    PahmStage::tracked()
        .find(|stage| {
            !progress.pahm_stage_complete(*stage) && check_pahm_stage_access(progress, *stage).allowed
        })
        .unwrap_or(PahmStage::FINAL)
}
