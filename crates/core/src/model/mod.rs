use thiserror::Error;

pub mod answer;
mod config;
mod conjugation;
mod entry;
mod grammar;
mod ids;
mod language;
mod question;

pub use answer::{answers_match, normalize_answer};
pub use config::{ConfigError, GameConfig, GameMode};
pub use conjugation::ConjugationMap;
pub use entry::{Auxiliary, EntryError, EntryKind, LexicalEntry};
pub use grammar::{Person, Tense};
pub use ids::{EntryId, ParseIdError, QuestionId};
pub use language::SourceLanguage;
pub use question::{FUNCTION_WORD_LABEL, INFINITIVE_LABEL, Question};

/// Errors raised when parsing enumerated values from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown source language: {0}")]
    Language(String),
    #[error("unknown tense: {0}")]
    Tense(String),
    #[error("unknown person: {0}")]
    Person(String),
    #[error("unknown game mode: {0}")]
    Mode(String),
    #[error("unknown entry kind: {0}")]
    EntryKind(String),
    #[error("unknown auxiliary: {0}")]
    Auxiliary(String),
}
