//! Record store boundary.
//!
//! The engine reads user records only through `RecordSource`. Storage,
//! identity and synchronisation belong to the implementor.

mod json_store;

pub use json_store::JsonStore;

use crate::error::Result;
use crate::records::{EmotionalNote, PracticeSession, Questionnaire, RecordSnapshot, SelfAssessment};
use crate::tracker::ProgressState;

/// Read-only access to one user's records and persisted progress flags
pub trait RecordSource {
    fn practice_sessions(&self) -> Result<Vec<PracticeSession>>;

    fn emotional_notes(&self) -> Result<Vec<EmotionalNote>>;

    fn questionnaire(&self) -> Result<Option<Questionnaire>>;

    fn self_assessment(&self) -> Result<Option<SelfAssessment>>;

    /// Externally persisted T-level flags and PAHM-stage hours
    fn progress_state(&self) -> Result<ProgressState>;

    /// All scoring records in one read
    fn snapshot(&self) -> Result<RecordSnapshot> {
        Ok(RecordSnapshot {
            sessions: self.practice_sessions()?,
            notes: self.emotional_notes()?,
            questionnaire: self.questionnaire()?,
            self_assessment: self.self_assessment()?,
        })
    }
}

impl<T: RecordSource + ?Sized> RecordSource for &T {
    fn practice_sessions(&self) -> Result<Vec<PracticeSession>> {
        (**self).practice_sessions()
    }

    fn emotional_notes(&self) -> Result<Vec<EmotionalNote>> {
        (**self).emotional_notes()
    }

    fn questionnaire(&self) -> Result<Option<Questionnaire>> {
        (**self).questionnaire()
    }

    fn self_assessment(&self) -> Result<Option<SelfAssessment>> {
        (**self).self_assessment()
    }

    fn progress_state(&self) -> Result<ProgressState> {
        (**self).progress_state()
    }
}

/// In-memory record source
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub records: RecordSnapshot,
    pub state: ProgressState,
}

impl MemoryStore {
    pub fn new(records: RecordSnapshot) -> Self {
        Self {
            records,
            state: ProgressState::default(),
        }
    }

    pub fn with_state(mut self, state: ProgressState) -> Self {
        self.state = state;
        self
    }
}

impl RecordSource for MemoryStore {
    fn practice_sessions(&self) -> Result<Vec<PracticeSession>> {
        Ok(self.records.sessions.clone())
    }

    fn emotional_notes(&self) -> Result<Vec<EmotionalNote>> {
        Ok(self.records.notes.clone())
    }

    fn questionnaire(&self) -> Result<Option<Questionnaire>> {
        Ok(self.records.questionnaire.clone())
    }

    fn self_assessment(&self) -> Result<Option<SelfAssessment>> {
        Ok(self.records.self_assessment.clone())
    }

    fn progress_state(&self) -> Result<ProgressState> {
        Ok(self.state.clone())
    }

    fn snapshot(&self) -> Result<RecordSnapshot> {
        Ok(self.records.clone())
    }
}
