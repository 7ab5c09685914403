//! Social Connection.

use crate::invariants::clamp_score;
use crate::normalize::NormalizedInputs;
use crate::questionnaire::{answers, QuestionnaireProfile as Q};

pub fn social_connection(inputs: &NormalizedInputs) -> f64 {
    let Some(q) = &inputs.questionnaire else {
        return 0.0;
    };

    let mut score = 50.0;
    if Q::is(&q.social_connections, answers::DEEP_MEANINGFUL) {
        score += 20.0;
    }
    if Q::is(&q.work_life_balance, answers::PERFECT_INTEGRATION) {
        score += 15.0;
    }
    if Q::is(&q.motivation, answers::ALTRUISTIC) {
        score += 15.0;
    }
    clamp_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::*;
    use crate::records::RecordSnapshot;
    use serde_json::json;

    #[test]
    fn test_requires_questionnaire() {
        assert_eq!(social_connection(&inputs(RecordSnapshot::default())), 0.0);
    }

    #[test]
    fn test_all_bonuses() {
        let q = questionnaire(&[
            ("social_connections", json!("Deep Meaningful")),
            ("work_life_balance", json!("perfect-integration")),
            ("motivation", json!("altruistic")),
        ]);
        let i = inputs(RecordSnapshot {
            questionnaire: Some(q),
            ..Default::default()
        });
        assert_eq!(social_connection(&i), 100.0);
    }

    #[test]
    fn test_unrecognised_answers_keep_baseline() {
        let q = questionnaire(&[("social_connections", json!("a few friends"))]);
        let i = inputs(RecordSnapshot {
            questionnaire: Some(q),
            ..Default::default()
        });
        assert_eq!(social_connection(&i), 50.0);
    }
}
