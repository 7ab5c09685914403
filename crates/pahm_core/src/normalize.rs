//! Input normalization.
//!
//! Runs once per invocation, before any calculator. All defaulting of
//! missing or malformed fields happens here and nowhere else:
//!
//! - session rating: absent -> 3 (and the session counts as unrated), else clamped to 1-5
//! - session duration: absent, negative or non-finite -> 0 minutes
//! - note mood/energy/stress: absent or non-finite -> 5, else clamped to 1-10
//! - questionnaire/self-assessment: visible only when `completed`

use crate::config::EngineSettings;
use crate::levels::TLevel;
use crate::questionnaire::QuestionnaireProfile;
use crate::records::{RecordSnapshot, SessionKind};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use std::collections::BTreeSet;

/// Quality assumed for a session the user did not rate
pub const DEFAULT_RATING: f64 = 3.0;

/// Neutral value for a missing note scale
pub const DEFAULT_NOTE_SCALE: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSession {
    pub at: DateTime<Utc>,
    /// Calendar day in the configured offset
    pub day: NaiveDate,
    pub duration_minutes: f64,
    /// Rating with the default applied, in [1, 5]
    pub quality: f64,
    /// Whether the user actually rated the session
    pub rated: bool,
    pub t_level: Option<TLevel>,
    pub kind: SessionKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedNote {
    pub at: DateTime<Utc>,
    pub mood: f64,
    pub energy: f64,
    pub stress: f64,
}

/// Attachment figures derived from a completed self-assessment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachmentProfile {
    pub attachment_score: i32,
    pub non_attachment_count: u8,
}

/// Calculator input after defaults are applied
#[derive(Debug, Clone)]
pub struct NormalizedInputs {
    /// Newest first
    pub sessions: Vec<NormalizedSession>,
    /// Newest first
    pub notes: Vec<NormalizedNote>,
    pub questionnaire: Option<QuestionnaireProfile>,
    pub self_assessment: Option<AttachmentProfile>,
    pub today: NaiveDate,
    pub recent_window_days: u32,
    pub recent_note_count: usize,
}

/// Normalize a raw snapshot against a fixed "today"
pub fn normalize(records: &RecordSnapshot, settings: &EngineSettings, today: NaiveDate) -> NormalizedInputs {
    let offset = settings.offset();

    let mut sessions: Vec<NormalizedSession> = records
        .sessions
        .iter()
        .map(|s| {
            let rating = s.rating.filter(|r| r.is_finite());
            NormalizedSession {
                at: s.timestamp,
                day: local_day(s.timestamp, offset),
                duration_minutes: s
                    .duration_minutes
                    .filter(|d| d.is_finite())
                    .map(|d| d.max(0.0))
                    .unwrap_or(0.0),
                quality: rating.map(|r| r.clamp(1.0, 5.0)).unwrap_or(DEFAULT_RATING),
                rated: rating.is_some(),
                t_level: s.level.as_deref().and_then(TLevel::from_label),
                kind: s.kind,
            }
        })
        .collect();
    sessions.sort_by(|a, b| b.at.cmp(&a.at));

    let mut notes: Vec<NormalizedNote> = records
        .notes
        .iter()
        .map(|n| NormalizedNote {
            at: n.timestamp,
            mood: note_scale(n.mood),
            energy: note_scale(n.energy),
            stress: note_scale(n.stress),
        })
        .collect();
    notes.sort_by(|a, b| b.at.cmp(&a.at));

    NormalizedInputs {
        sessions,
        notes,
        questionnaire: records
            .questionnaire
            .as_ref()
            .filter(|q| q.completed)
            .map(|q| QuestionnaireProfile::from_responses(&q.responses)),
        self_assessment: records
            .self_assessment
            .as_ref()
            .filter(|sa| sa.completed)
            .map(|sa| AttachmentProfile {
                attachment_score: sa.attachment_score(),
                non_attachment_count: sa.non_attachment_count(),
            }),
        today,
        recent_window_days: settings.effective_recent_window_days(),
        recent_note_count: settings.effective_recent_note_count(),
    }
}

fn note_scale(value: Option<f64>) -> f64 {
    value
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(1.0, 10.0))
        .unwrap_or(DEFAULT_NOTE_SCALE)
}

/// Calendar day of a timestamp in the given offset
pub fn local_day(at: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    at.with_timezone(&offset).date_naive()
}

/// Today's date in the configured offset
pub fn today(settings: &EngineSettings) -> NaiveDate {
    local_day(Utc::now(), settings.offset())
}

impl NormalizedInputs {
    pub fn has_sessions(&self) -> bool {
        !self.sessions.is_empty()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Questionnaire or at least one session
    pub fn has_any_data(&self) -> bool {
        self.questionnaire.is_some() || self.has_sessions()
    }

    /// Sessions within the recent window (today inclusive). Future-dated
    /// sessions are excluded, matching the streak calculation.
    pub fn recent_sessions(&self) -> impl Iterator<Item = &NormalizedSession> {
        let window = i64::from(self.recent_window_days);
        self.sessions
            .iter()
            .filter(move |s| (0..window).contains(&(self.today - s.day).num_days()))
    }

    pub fn average_quality(&self) -> f64 {
        average(self.sessions.iter().map(|s| s.quality))
    }

    pub fn average_duration(&self) -> f64 {
        average(self.sessions.iter().map(|s| s.duration_minutes))
    }

    pub fn total_duration(&self) -> f64 {
        self.sessions.iter().map(|s| s.duration_minutes).sum()
    }

    /// Distinct ISO weeks with at least one session
    pub fn practice_weeks(&self) -> usize {
        self.sessions
            .iter()
            .map(|s| {
                let week = s.day.iso_week();
                (week.year(), week.week())
            })
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Session days, newest first, for streak math
    pub fn session_days(&self) -> Vec<NaiveDate> {
        self.sessions.iter().map(|s| s.day).collect()
    }
}

/// Mean of an iterator, 0 when empty
pub fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{EmotionalNote, PracticeSession, Questionnaire, SelfAssessment};
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 20).unwrap()
    }

    #[test]
    fn test_session_defaults() {
        let records = RecordSnapshot {
            sessions: vec![
                PracticeSession::new(at(1, 8)),
                PracticeSession::new(at(2, 8)).with_rating(9.0).with_duration(-5.0),
                PracticeSession::new(at(3, 8)).with_rating(f64::NAN).with_level("T-2"),
            ],
            ..Default::default()
        };
        let n = normalize(&records, &EngineSettings::default(), today());

        // newest first
        assert_eq!(n.sessions[0].t_level, Some(TLevel::T2));
        assert!(!n.sessions[0].rated);
        assert_eq!(n.sessions[0].quality, DEFAULT_RATING);
        assert_eq!(n.sessions[1].quality, 5.0);
        assert_eq!(n.sessions[1].duration_minutes, 0.0);
        assert!(n.sessions[1].rated);
        assert!(!n.sessions[2].rated);
    }

    #[test]
    fn test_note_defaults() {
        let records = RecordSnapshot {
            notes: vec![EmotionalNote::new(at(1, 8)).with_mood(42.0)],
            ..Default::default()
        };
        let n = normalize(&records, &EngineSettings::default(), today());
        assert_eq!(n.notes[0].mood, 10.0);
        assert_eq!(n.notes[0].energy, DEFAULT_NOTE_SCALE);
        assert_eq!(n.notes[0].stress, DEFAULT_NOTE_SCALE);
    }

    #[test]
    fn test_incomplete_forms_are_invisible() {
        let records = RecordSnapshot {
            questionnaire: Some(Questionnaire::default()),
            self_assessment: Some(SelfAssessment::default()),
            ..Default::default()
        };
        let n = normalize(&records, &EngineSettings::default(), today());
        assert!(n.questionnaire.is_none());
        assert!(n.self_assessment.is_none());
        assert!(!n.has_any_data());
    }

    #[test]
    fn test_offset_moves_day_boundary() {
        let settings = EngineSettings {
            utc_offset_minutes: -300,
            ..Default::default()
        };
        // 02:00 UTC on the 5th is still the 4th at UTC-5
        assert_eq!(
            local_day(at(5, 2), settings.offset()),
            NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
        );
    }

    #[test]
    fn test_future_sessions_are_not_recent() {
        let records = RecordSnapshot {
            sessions: vec![
                PracticeSession::new(at(20, 8)),
                PracticeSession::new(at(25, 8)),
                PracticeSession::new(at(27, 8)),
            ],
            ..Default::default()
        };
        let n = normalize(&records, &EngineSettings::default(), today());
        assert_eq!(n.session_count(), 3);
        assert_eq!(n.recent_sessions().count(), 1);
    }

    #[test]
    fn test_recent_window_and_weeks() {
        let records = RecordSnapshot {
            sessions: vec![
                PracticeSession::new(Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap()),
                PracticeSession::new(at(16, 8)),
                PracticeSession::new(at(19, 8)),
            ],
            ..Default::default()
        };
        let n = normalize(&records, &EngineSettings::default(), today());
        assert_eq!(n.recent_sessions().count(), 2);
        assert_eq!(n.practice_weeks(), 2);
    }

    #[test]
    fn test_average_of_empty_is_zero() {
        assert_eq!(average(std::iter::empty()), 0.0);
    }
}
