use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::grammar::{Person, Tense};
use crate::model::language::SourceLanguage;

/// Unique identifier for a lexical entry within its kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(u64);

impl EntryId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({})", self.0)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing an `EntryId` from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    raw: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse EntryId from {:?}", self.raw)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for EntryId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(EntryId::new).map_err(|_| ParseIdError {
            raw: s.to_string(),
        })
    }
}

/// Stable identifier of a generated question.
///
/// Derived only from the source entry, tense and person (or source language in
/// translation mode), so two generations with the same random source can be
/// compared id by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    #[must_use]
    pub fn translation(entry: EntryId, language: SourceLanguage) -> Self {
        Self(format!("{entry}-trans-{language}"))
    }

    #[must_use]
    pub fn function_word(entry: EntryId) -> Self {
        Self(format!("fw-{entry}"))
    }

    #[must_use]
    pub fn conjugation(entry: EntryId, tense: Tense, person: Person) -> Self {
        Self(format!("{entry}-{tense}-{person}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
