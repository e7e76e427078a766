use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::ParseError;

//
// ─── TENSE ─────────────────────────────────────────────────────────────────────
//

/// Tenses a verb may carry a conjugation table for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tense {
    #[serde(rename = "Presente", alias = "presente")]
    Presente,
    #[serde(
        rename = "Passato Prossimo",
        alias = "passato_prossimo",
        alias = "passatoProssimo"
    )]
    PassatoProssimo,
    #[serde(rename = "Imperfetto", alias = "imperfetto")]
    Imperfetto,
    #[serde(
        rename = "Presente Progressivo",
        alias = "presente_progressivo",
        alias = "presenteProgressivo"
    )]
    PresenteProgressivo,
}

impl Tense {
    pub const ALL: [Tense; 4] = [
        Self::Presente,
        Self::PassatoProssimo,
        Self::Imperfetto,
        Self::PresenteProgressivo,
    ];

    /// Human-facing label, also used inside question ids.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Tense::Presente => "Presente",
            Tense::PassatoProssimo => "Passato Prossimo",
            Tense::Imperfetto => "Imperfetto",
            Tense::PresenteProgressivo => "Presente Progressivo",
        }
    }

    /// Snake-case key used by lexicon files.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Tense::Presente => "presente",
            Tense::PassatoProssimo => "passato_prossimo",
            Tense::Imperfetto => "imperfetto",
            Tense::PresenteProgressivo => "presente_progressivo",
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tense {
    type Err = ParseError;

    /// Accepts labels and keys regardless of case, spaces and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "presente" => Ok(Self::Presente),
            "passatoprossimo" => Ok(Self::PassatoProssimo),
            "imperfetto" => Ok(Self::Imperfetto),
            "presenteprogressivo" => Ok(Self::PresenteProgressivo),
            _ => Err(ParseError::Tense(s.to_string())),
        }
    }
}

//
// ─── PERSON ────────────────────────────────────────────────────────────────────
//

/// The six grammatical persons a conjugation table is indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Person {
    #[serde(rename = "io")]
    Io,
    #[serde(rename = "tu")]
    Tu,
    #[serde(rename = "lui/lei")]
    LuiLei,
    #[serde(rename = "noi")]
    Noi,
    #[serde(rename = "voi")]
    Voi,
    #[serde(rename = "loro")]
    Loro,
}

impl Person {
    /// All persons in table order.
    pub const ALL: [Person; 6] = [
        Self::Io,
        Self::Tu,
        Self::LuiLei,
        Self::Noi,
        Self::Voi,
        Self::Loro,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Person::Io => "io",
            Person::Tu => "tu",
            Person::LuiLei => "lui/lei",
            Person::Noi => "noi",
            Person::Voi => "voi",
            Person::Loro => "loro",
        }
    }

    /// Position of this person in [`Person::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Person::Io => 0,
            Person::Tu => 1,
            Person::LuiLei => 2,
            Person::Noi => 3,
            Person::Voi => 4,
            Person::Loro => 5,
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Person {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        Person::ALL
            .into_iter()
            .find(|p| p.label() == trimmed)
            .ok_or_else(|| ParseError::Person(s.to_string()))
    }
}
