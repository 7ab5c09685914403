//! Stage and T-level progress tracking.
//!
//! Session counts are derived from the session log on every call. Completion
//! flags and PAHM-stage hours come from the externally persisted
//! `ProgressState`; this module never derives hours from session durations.

use crate::levels::{PahmStage, TLevel, PAHM_STAGE_REQUIRED_HOURS, T_LEVEL_REQUIRED_SESSIONS};
use crate::normalize::NormalizedSession;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Persisted hours and completion for one PAHM stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PahmStageState {
    #[serde(default)]
    pub accumulated_hours: f64,
    #[serde(default)]
    pub completed: bool,
}

/// Externally persisted completion state.
///
/// The write methods only ever set flags or add hours, so unlock state
/// is monotonic through this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    #[serde(default)]
    pub t_levels: BTreeMap<TLevel, bool>,
    /// Keyed by stage number (2-6)
    #[serde(default)]
    pub pahm_stages: BTreeMap<u8, PahmStageState>,
}

impl ProgressState {
    pub fn t_level_flag(&self, level: TLevel) -> bool {
        self.t_levels.get(&level).copied().unwrap_or(false)
    }

    pub fn pahm_stage(&self, stage: PahmStage) -> PahmStageState {
        self.pahm_stages
            .get(&stage.number())
            .copied()
            .unwrap_or_default()
    }

    pub fn mark_t_level_complete(&mut self, level: TLevel) {
        self.t_levels.insert(level, true);
    }

    pub fn mark_pahm_stage_complete(&mut self, stage: PahmStage) {
        self.pahm_stages.entry(stage.number()).or_default().completed = true;
    }

    /// Add logged practice hours to a stage; completes it at the threshold
    pub fn add_pahm_hours(&mut self, stage: PahmStage, hours: f64) {
        if !hours.is_finite() || hours < 0.0 {
            warn!(stage = stage.number(), hours, "ignoring invalid PAHM hours");
            return;
        }
        let entry = self.pahm_stages.entry(stage.number()).or_default();
        entry.accumulated_hours += hours;
        if entry.accumulated_hours >= PAHM_STAGE_REQUIRED_HOURS {
            entry.completed = true;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TLevelProgress {
    pub level: TLevel,
    /// Sessions at this level that carry a rating
    pub completed_session_count: u32,
    /// All sessions at this level
    pub total_sessions: u32,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PahmStageProgress {
    pub stage: PahmStage,
    pub display_name: String,
    pub accumulated_hours: f64,
    pub required_hours: f64,
    pub completed: bool,
}

/// Per-level state for T1-T5 and PAHM stages 2-6
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageProgress {
    pub t_levels: Vec<TLevelProgress>,
    pub pahm_stages: Vec<PahmStageProgress>,
}

impl StageProgress {
    pub fn t_level(&self, level: TLevel) -> &TLevelProgress {
        // t_levels always holds T1..T5 in order
        &self.t_levels[usize::from(level.number() - 1)]
    }

    /// None for the baseline stage, which is not tracked
    pub fn pahm_stage(&self, stage: PahmStage) -> Option<&PahmStageProgress> {
        self.pahm_stages.iter().find(|p| p.stage == stage)
    }

    pub fn all_t_levels_complete(&self) -> bool {
        self.t_levels.iter().all(|t| t.completed)
    }

    pub fn pahm_stage_complete(&self, stage: PahmStage) -> bool {
        self.pahm_stage(stage).map(|p| p.completed).unwrap_or(false)
    }
}

/// Build the per-level view from the session log and persisted state
pub fn track(sessions: &[NormalizedSession], state: &ProgressState) -> StageProgress {
    let t_levels = TLevel::ALL
        .iter()
        .map(|&level| {
            let at_level = sessions.iter().filter(|s| s.t_level == Some(level));
            let (total, rated) = at_level.fold((0u32, 0u32), |(total, rated), s| {
                (total + 1, rated + u32::from(s.rated))
            });
            TLevelProgress {
                level,
                completed_session_count: rated,
                total_sessions: total,
                completed: state.t_level_flag(level) || rated >= T_LEVEL_REQUIRED_SESSIONS,
            }
        })
        .collect();

    let pahm_stages = PahmStage::tracked()
        .map(|stage| {
            let persisted = state.pahm_stage(stage);
            PahmStageProgress {
                stage,
                display_name: stage.display_name().to_string(),
                accumulated_hours: persisted.accumulated_hours,
                required_hours: PAHM_STAGE_REQUIRED_HOURS,
                completed: persisted.completed
                    || persisted.accumulated_hours >= PAHM_STAGE_REQUIRED_HOURS,
            }
        })
        .collect();

    let progress = StageProgress {
        t_levels,
        pahm_stages,
    };
    debug!(
        t_complete = progress.t_levels.iter().filter(|t| t.completed).count(),
        pahm_complete = progress.pahm_stages.iter().filter(|p| p.completed).count(),
        "stage progress tracked"
    );
    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::*;
    use crate::records::{PracticeSession, RecordSnapshot};
    use chrono::{TimeZone, Utc};

    fn sessions_at(label: &str, rated: usize, unrated: usize) -> Vec<PracticeSession> {
        let at = Utc.with_ymd_and_hms(2026, 6, 1, 7, 0, 0).unwrap();
        let mut out: Vec<PracticeSession> = (0..rated)
            .map(|_| PracticeSession::new(at).with_level(label).with_rating(4.0))
            .collect();
        out.extend((0..unrated).map(|_| PracticeSession::new(at).with_level(label)));
        out
    }

    fn tracked(sessions: Vec<PracticeSession>, state: &ProgressState) -> StageProgress {
        let i = inputs(RecordSnapshot {
            sessions,
            ..Default::default()
        });
        track(&i.sessions, state)
    }

    #[test]
    fn test_only_rated_sessions_count() {
        let p = tracked(sessions_at("t1", 2, 4), &ProgressState::default());
        let t1 = p.t_level(TLevel::T1);
        assert_eq!(t1.completed_session_count, 2);
        assert_eq!(t1.total_sessions, 6);
        assert!(!t1.completed);
    }

    #[test]
    fn test_three_rated_sessions_complete_a_level() {
        let p = tracked(sessions_at("T-2", 3, 0), &ProgressState::default());
        assert!(p.t_level(TLevel::T2).completed);
        assert!(!p.t_level(TLevel::T1).completed);
    }

    #[test]
    fn test_external_flag_completes_a_level() {
        let mut state = ProgressState::default();
        state.mark_t_level_complete(TLevel::T4);
        let p = tracked(Vec::new(), &state);
        assert!(p.t_level(TLevel::T4).completed);
        assert_eq!(p.t_level(TLevel::T4).completed_session_count, 0);
    }

    #[test]
    fn test_pahm_hours_complete_a_stage() {
        let stage = PahmStage::new(2).unwrap();
        let mut state = ProgressState::default();
        state.add_pahm_hours(stage, 10.0);
        assert!(!state.pahm_stage(stage).completed);
        state.add_pahm_hours(stage, 5.0);
        assert!(state.pahm_stage(stage).completed);

        let p = tracked(Vec::new(), &state);
        let s2 = p.pahm_stage(stage).unwrap();
        assert_eq!(s2.accumulated_hours, 15.0);
        assert_eq!(s2.display_name, "PAHM Trainee");
        assert!(p.pahm_stage(PahmStage::BASELINE).is_none());
    }

    #[test]
    fn test_invalid_hours_are_ignored() {
        let stage = PahmStage::new(3).unwrap();
        let mut state = ProgressState::default();
        state.add_pahm_hours(stage, -4.0);
        state.add_pahm_hours(stage, f64::NAN);
        assert_eq!(state.pahm_stage(stage).accumulated_hours, 0.0);
    }

    #[test]
    fn test_persisted_hours_alone_read_as_complete() {
        let mut state = ProgressState::default();
        state.pahm_stages.insert(
            5,
            PahmStageState {
                accumulated_hours: 16.0,
                completed: false,
            },
        );
        let p = tracked(Vec::new(), &state);
        assert!(p.pahm_stage_complete(PahmStage::new(5).unwrap()));
    }

    #[test]
    fn test_state_json_round_trip() {
        let mut state = ProgressState::default();
        state.mark_t_level_complete(TLevel::T1);
        state.add_pahm_hours(PahmStage::new(2).unwrap(), 3.5);
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"t1\":true"));
        let parsed: ProgressState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
