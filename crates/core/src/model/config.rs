use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::{ParseError, grammar::Tense, language::SourceLanguage};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("conjugation mode needs at least one tense")]
    NoTenses,
}

/// What a drill asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Prompt with a translation, expect the canonical form.
    Translation,
    /// Prompt with a verb, tense and person, expect the conjugated form.
    Conjugation,
}

impl GameMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Translation => "translation",
            GameMode::Conjugation => "conjugation",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "translation" => Ok(Self::Translation),
            "conjugation" => Ok(Self::Conjugation),
            _ => Err(ParseError::Mode(s.to_string())),
        }
    }
}

/// Settings a session is generated from. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    mode: GameMode,
    source_language: SourceLanguage,
    tenses: BTreeSet<Tense>,
}

impl GameConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::NoTenses` when `mode` is conjugation and `tenses`
    /// is empty.
    pub fn new(
        mode: GameMode,
        source_language: SourceLanguage,
        tenses: impl IntoIterator<Item = Tense>,
    ) -> Result<Self, ConfigError> {
        let tenses: BTreeSet<Tense> = tenses.into_iter().collect();
        if mode == GameMode::Conjugation && tenses.is_empty() {
            return Err(ConfigError::NoTenses);
        }
        Ok(Self {
            mode,
            source_language,
            tenses,
        })
    }

    /// Translation drills ignore tenses.
    #[must_use]
    pub fn translation(source_language: SourceLanguage) -> Self {
        Self {
            mode: GameMode::Translation,
            source_language,
            tenses: BTreeSet::new(),
        }
    }

    /// # Errors
    ///
    /// Returns `ConfigError::NoTenses` if `tenses` is empty.
    pub fn conjugation(
        source_language: SourceLanguage,
        tenses: impl IntoIterator<Item = Tense>,
    ) -> Result<Self, ConfigError> {
        Self::new(GameMode::Conjugation, source_language, tenses)
    }

    /// Build a config from loose text settings: a mode name, a language code
    /// and a comma-separated tense list (empty entries ignored).
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` for unknown names and `Error::Config` when a
    /// conjugation config ends up without tenses.
    pub fn from_params(
        mode: &str,
        source_language: &str,
        tenses: &str,
    ) -> Result<Self, crate::Error> {
        let mode: GameMode = mode.parse()?;
        let source_language: SourceLanguage = source_language.parse()?;
        if mode == GameMode::Translation {
            return Ok(Self::translation(source_language));
        }
        let tenses = tenses
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::parse::<Tense>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(mode, source_language, tenses)?)
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn source_language(&self) -> SourceLanguage {
        self.source_language
    }

    /// Selected tenses in declaration order.
    #[must_use]
    pub fn tenses(&self) -> &BTreeSet<Tense> {
        &self.tenses
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Conjugation,
            source_language: SourceLanguage::En,
            tenses: BTreeSet::from([Tense::Presente]),
        }
    }
}
