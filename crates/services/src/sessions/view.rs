use serde::Serialize;

use drill_core::model::{Person, Question, Tense};

use super::engine::{AttemptStatus, SessionEngine, SessionSummary};

/// The correct answer and its context, shown after the second miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealCard {
    pub canonical: Option<String>,
    pub translation: Option<String>,
    pub tense: Option<Tense>,
    pub person: Option<Person>,
    pub correct_answer: String,
}

impl RevealCard {
    fn for_question(question: &Question) -> Self {
        let entry = question.entry();
        Self {
            canonical: entry.map(|e| e.canonical().to_string()),
            translation: question.prompt_translation().map(str::to_string),
            tense: question.tense(),
            person: question.person(),
            correct_answer: question.correct_answer().to_string(),
        }
    }
}

/// Everything a renderer needs after a transition.
///
/// Field for field this maps onto JSON primitives; question fields are `null`
/// once the session is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub question_id: Option<String>,
    pub prompt: Option<String>,
    pub sub_prompt: Option<String>,
    pub status: AttemptStatus,
    pub wrong_input: Option<String>,
    pub index: usize,
    pub total: usize,
    pub correct_count: usize,
    pub reveal: Option<RevealCard>,
    pub summary: Option<SessionSummary>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn capture(engine: &SessionEngine) -> Self {
        let question = engine.current_question();
        let reveal = match (question, engine.status()) {
            (Some(q), AttemptStatus::Wrong2) => Some(RevealCard::for_question(q)),
            _ => None,
        };
        Self {
            question_id: question.map(|q| q.id().to_string()),
            prompt: question.map(|q| q.prompt().to_string()),
            sub_prompt: question.and_then(|q| q.sub_prompt().map(str::to_string)),
            status: engine.status(),
            wrong_input: engine.wrong_input().map(str::to_string),
            index: engine.current_index(),
            total: engine.total(),
            correct_count: engine.correct_count(),
            reveal,
            summary: engine.summary().cloned(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.summary.is_some()
    }
}

impl SessionEngine {
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self)
    }
}
