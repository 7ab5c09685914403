//! Data sufficiency gate.
//!
//! No score is produced for a user without real signal. The gate passes on
//! any one of: questionnaire + self-assessment, three or more sessions, or
//! questionnaire + at least one session.

use serde::{Deserialize, Serialize};

/// Sessions that are enough evidence on their own
pub const MIN_SESSIONS_ALONE: usize = 3;

/// Sessions needed alongside a completed questionnaire
pub const MIN_SESSIONS_WITH_QUESTIONNAIRE: usize = 1;

/// Which inputs are present, so callers can explain what unlocks scoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCompleteness {
    pub questionnaire: bool,
    pub self_assessment: bool,
    pub practice_sessions: bool,
    pub sufficient: bool,
}

impl DataCompleteness {
    pub fn assess(questionnaire: bool, self_assessment: bool, session_count: usize) -> Self {
        Self {
            questionnaire,
            self_assessment,
            practice_sessions: session_count > 0,
            sufficient: sufficient(questionnaire, self_assessment, session_count),
        }
    }

    /// Guidance for a user who has not unlocked scoring yet
    pub fn unlock_hints(&self) -> Vec<String> {
        if self.sufficient {
            return Vec::new();
        }
        let mut hints = Vec::new();
        if !self.questionnaire {
            hints.push("Complete the intake questionnaire".to_string());
        }
        if self.questionnaire && !self.self_assessment {
            hints.push("Complete the self-assessment, or log one practice session".to_string());
        }
        if !self.questionnaire {
            hints.push(format!(
                "Or log at least {} practice sessions",
                MIN_SESSIONS_ALONE
            ));
        }
        hints
    }
}

/// The gate itself
pub fn sufficient(questionnaire: bool, self_assessment: bool, session_count: usize) -> bool {
    (questionnaire && self_assessment)
        || session_count >= MIN_SESSIONS_ALONE
        || (questionnaire && session_count >= MIN_SESSIONS_WITH_QUESTIONNAIRE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_is_insufficient() {
        assert!(!sufficient(false, false, 0));
    }

    #[test]
    fn test_each_passing_rule() {
        assert!(sufficient(true, true, 0));
        assert!(sufficient(false, false, 3));
        assert!(sufficient(true, false, 1));
    }

    #[test]
    fn test_weak_evidence_alone_is_insufficient() {
        assert!(!sufficient(true, false, 0));
        assert!(!sufficient(false, true, 2));
        assert!(!sufficient(false, false, 2));
    }

    #[test]
    fn test_hints_for_new_user() {
        let dc = DataCompleteness::assess(false, false, 0);
        assert!(!dc.sufficient);
        assert!(!dc.practice_sessions);
        assert_eq!(dc.unlock_hints().len(), 2);
    }

    #[test]
    fn test_no_hints_when_sufficient() {
        let dc = DataCompleteness::assess(true, true, 0);
        assert!(dc.unlock_hints().is_empty());
    }

    #[test]
    fn test_hint_after_questionnaire() {
        let dc = DataCompleteness::assess(true, false, 0);
        let hints = dc.unlock_hints();
        assert_eq!(hints.len(), 1);
        assert!(hints[0].contains("self-assessment"));
    }
}
