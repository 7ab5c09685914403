//! Progress engine: the public entry point.
//!
//! Stateless between calls. Every operation re-reads the record source and
//! recomputes from scratch, so repeated or racing calls are safe and the last
//! result simply replaces the previous one. The only side effect is the
//! change notification sent to listeners after `compute_progress`.

use crate::access;
use crate::aggregate::{aggregate, UserLevel};
use crate::components::{compute_breakdown, ComponentBreakdown};
use crate::config::EngineSettings;
use crate::error::Result;
use crate::levels::{PahmStage, TLevel};
use crate::normalize::{self, normalize};
use crate::pahm::{self, PahmAnalysis};
use crate::records::RecordSnapshot;
use crate::store::RecordSource;
use crate::streak::{self, StreakStats};
use crate::sufficiency::DataCompleteness;
use crate::tracker::{self, StageProgress};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Derived snapshot of a user's progress. Zeroed unless `has_minimum_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    /// Composite well-being score, 0-100
    pub happiness_points: u8,
    pub user_level: UserLevel,
    pub focus_ability: u8,
    pub habit_change_score: u8,
    pub practice_streak: u32,
    pub has_minimum_data: bool,
    pub data_completeness: DataCompleteness,
    pub breakdown: ComponentBreakdown,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pahm: Option<PahmAnalysis>,
}

impl UserProgress {
    /// The safe default: no score, only completeness flags
    pub fn zeroed(data_completeness: DataCompleteness) -> Self {
        Self {
            happiness_points: 0,
            user_level: UserLevel::NewUser,
            focus_ability: 0,
            habit_change_score: 0,
            practice_streak: 0,
            has_minimum_data: false,
            data_completeness,
            breakdown: ComponentBreakdown::default(),
            pahm: None,
        }
    }
}

/// Receives every freshly computed `UserProgress`
pub trait ProgressListener {
    fn progress_updated(&self, progress: &UserProgress);
}

impl<F> ProgressListener for F
where
    F: Fn(&UserProgress),
{
    fn progress_updated(&self, progress: &UserProgress) {
        self(progress)
    }
}

/// Score a snapshot for a given day. Pure; no listeners involved.
pub fn evaluate(records: &RecordSnapshot, settings: &EngineSettings, today: NaiveDate) -> Result<UserProgress> {
    let inputs = normalize(records, settings, today);
    let completeness = DataCompleteness::assess(
        inputs.questionnaire.is_some(),
        inputs.self_assessment.is_some(),
        inputs.session_count(),
    );

    if !completeness.sufficient {
        info!(?completeness, "insufficient data for scoring");
        return Ok(UserProgress::zeroed(completeness));
    }

    let streak = streak::current_streak(&inputs.session_days(), today);
    let analysis = pahm::analyze(&inputs);
    let breakdown = compute_breakdown(&inputs, streak, f64::from(analysis.score));
    let agg = aggregate(&breakdown)?;

    info!(
        happiness_points = agg.happiness_points,
        level = %agg.user_level,
        streak,
        "progress computed"
    );

    Ok(UserProgress {
        happiness_points: agg.happiness_points,
        user_level: agg.user_level,
        focus_ability: agg.focus_ability,
        habit_change_score: agg.habit_change_score,
        practice_streak: streak,
        has_minimum_data: true,
        data_completeness: completeness,
        breakdown,
        pahm: Some(analysis),
    })
}

/// Engine bound to one user's record source
pub struct ProgressEngine<S> {
    source: S,
    settings: EngineSettings,
    listeners: Vec<Box<dyn ProgressListener>>,
}

impl<S: RecordSource> ProgressEngine<S> {
    pub fn new(source: S, settings: EngineSettings) -> Self {
        Self {
            source,
            settings,
            listeners: Vec::new(),
        }
    }

    /// Register a listener; called in registration order after each compute
    pub fn subscribe(&mut self, listener: impl ProgressListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Today in the configured offset
    pub fn today(&self) -> NaiveDate {
        normalize::today(&self.settings)
    }

    pub fn compute_progress(&self) -> UserProgress {
        self.compute_progress_on(self.today())
    }

    /// Compute against an explicit "today". Never fails: any error yields
    /// the zeroed result.
    pub fn compute_progress_on(&self, today: NaiveDate) -> UserProgress {
        let progress = match self
            .source
            .snapshot()
            .and_then(|records| evaluate(&records, &self.settings, today))
        {
            Ok(progress) => progress,
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "progress computation failed, using zeroed result");
                UserProgress::zeroed(DataCompleteness::default())
            }
        };
        self.notify(&progress);
        progress
    }

    fn notify(&self, progress: &UserProgress) {
        debug!(listeners = self.listeners.len(), "notifying progress listeners");
        for listener in &self.listeners {
            listener.progress_updated(progress);
        }
    }

    /// Per-level completion state from the session log and persisted flags
    pub fn stage_progress(&self) -> Result<StageProgress> {
        let records = RecordSnapshot {
            sessions: self.source.practice_sessions()?,
            ..Default::default()
        };
        let inputs = normalize(&records, &self.settings, self.today());
        let state = self.source.progress_state()?;
        Ok(tracker::track(&inputs.sessions, &state))
    }

    pub fn check_t_level_access(&self, level: TLevel) -> Result<access::AccessDecision> {
        Ok(access::check_t_level_access(&self.stage_progress()?, level))
    }

    pub fn check_pahm_stage_access(&self, stage: PahmStage) -> Result<access::AccessDecision> {
        Ok(access::check_pahm_stage_access(&self.stage_progress()?, stage))
    }

    pub fn current_accessible_stage(&self) -> Result<PahmStage> {
        Ok(access::current_accessible_stage(&self.stage_progress()?))
    }

    pub fn streak(&self) -> Result<u32> {
        Ok(self.streak_stats()?.current_streak)
    }

    pub fn streak_stats(&self) -> Result<StreakStats> {
        self.streak_stats_on(self.today())
    }

    pub fn streak_stats_on(&self, today: NaiveDate) -> Result<StreakStats> {
        let offset = self.settings.offset();
        let days: Vec<NaiveDate> = self
            .source
            .practice_sessions()?
            .iter()
            .map(|s| normalize::local_day(s.timestamp, offset))
            .collect();
        Ok(streak::calculate_streaks(&days, today))
    }
}
