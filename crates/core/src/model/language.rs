use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::ParseError;

/// Language a prompt is shown in.
///
/// `It` is the language being learned; entries carry no translation slot for
/// it, so prompts fall back to the canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    It,
    En,
    De,
}

impl SourceLanguage {
    pub const ALL: [SourceLanguage; 3] = [Self::It, Self::En, Self::De];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            SourceLanguage::It => "it",
            SourceLanguage::En => "en",
            SourceLanguage::De => "de",
        }
    }

    /// True when entries carry a translation in this language.
    #[must_use]
    pub fn has_translation_slot(self) -> bool {
        !matches!(self, SourceLanguage::It)
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SourceLanguage {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "it" => Ok(Self::It),
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            _ => Err(ParseError::Language(s.to_string())),
        }
    }
}
