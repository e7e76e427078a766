//! JSON lexicon files in the starter-data format.
//!
//! ```json
//! {
//!   "verbs": [{
//!     "italian": "parlare", "english": "to speak", "german": "sprechen",
//!     "presente": "parlo, parli, parla, parliamo, parlate, parlano",
//!     "passato_prossimo": "ho parlato, hai parlato, ..."
//!   }],
//!   "function_words": [{ "italian": "di", "english": "of", "german": "von" }]
//! }
//! ```
//!
//! Conjugations may also be written as objects keyed by person. Ids are
//! assigned from 1 in file order, separately for verbs and function words.

use std::path::Path;

use drill_core::model::{
    Auxiliary, ConjugationMap, EntryError, EntryId, EntryKind, LexicalEntry, SourceLanguage,
    Tense,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::{LexiconRepository, StorageError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LexiconFileError {
    #[error("cannot read lexicon file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed lexicon file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid {kind:?} #{position}: {source}")]
    Entry {
        kind: EntryKind,
        position: usize,
        #[source]
        source: EntryError,
    },
}

/// A conjugation written either as a compact list or as a person table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConjugationField {
    List(String),
    Table(ConjugationMap),
}

impl ConjugationField {
    fn into_map(self) -> ConjugationMap {
        match self {
            ConjugationField::List(list) => ConjugationMap::from_list(&list),
            ConjugationField::Table(map) => map,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbRecord {
    pub italian: String,
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub german: Option<String>,
    #[serde(default)]
    pub auxiliary: Option<Auxiliary>,
    #[serde(default)]
    pub presente: Option<ConjugationField>,
    #[serde(default)]
    pub passato_prossimo: Option<ConjugationField>,
    #[serde(default)]
    pub imperfetto: Option<ConjugationField>,
    #[serde(default)]
    pub presente_progressivo: Option<ConjugationField>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionWordRecord {
    pub italian: String,
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub german: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconFile {
    #[serde(default)]
    pub verbs: Vec<VerbRecord>,
    #[serde(default)]
    pub function_words: Vec<FunctionWordRecord>,
}

/// Validated entries ready to be stored or drilled.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    pub verbs: Vec<LexicalEntry>,
    pub function_words: Vec<LexicalEntry>,
}

/// Both translations are required; a missing one is reported like a blank one.
fn with_translations(
    mut entry: LexicalEntry,
    english: Option<String>,
    german: Option<String>,
) -> Result<LexicalEntry, EntryError> {
    for (language, text) in [(SourceLanguage::En, english), (SourceLanguage::De, german)] {
        entry = entry.with_translation(language, text.unwrap_or_default())?;
    }
    Ok(entry)
}

impl VerbRecord {
    fn into_entry(self, id: EntryId) -> Result<LexicalEntry, EntryError> {
        let auxiliary = self
            .auxiliary
            .unwrap_or_else(|| Auxiliary::guess_for(&self.italian));
        let mut entry = LexicalEntry::verb(id, self.italian)?.with_auxiliary(auxiliary);
        entry = with_translations(entry, self.english, self.german)?;

        let tables = [
            (Tense::Presente, self.presente),
            (Tense::PassatoProssimo, self.passato_prossimo),
            (Tense::Imperfetto, self.imperfetto),
            (Tense::PresenteProgressivo, self.presente_progressivo),
        ];
        for (tense, field) in tables {
            if let Some(field) = field {
                entry = entry.with_conjugation(tense, field.into_map())?;
            }
        }
        Ok(entry)
    }
}

impl FunctionWordRecord {
    fn into_entry(self, id: EntryId) -> Result<LexicalEntry, EntryError> {
        let entry = LexicalEntry::function_word(id, self.italian)?;
        with_translations(entry, self.english, self.german)
    }
}

fn position_id(position: usize) -> EntryId {
    EntryId::new(u64::try_from(position).unwrap_or(u64::MAX).saturating_add(1))
}

impl LexiconFile {
    /// # Errors
    ///
    /// Returns `LexiconFileError::Json` if the text is not a lexicon document.
    pub fn from_json(text: &str) -> Result<Self, LexiconFileError> {
        Ok(serde_json::from_str(text)?)
    }

    /// # Errors
    ///
    /// Returns `LexiconFileError::Io` or `LexiconFileError::Json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconFileError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validates every record and assigns ids.
    ///
    /// Incomplete conjugation lists are kept; they are filtered out when
    /// questions are generated.
    ///
    /// # Errors
    ///
    /// Returns `LexiconFileError::Entry` for the first invalid record.
    pub fn into_lexicon(self) -> Result<Lexicon, LexiconFileError> {
        let verbs = self
            .verbs
            .into_iter()
            .enumerate()
            .map(|(position, record)| {
                record
                    .into_entry(position_id(position))
                    .map_err(|source| LexiconFileError::Entry {
                        kind: EntryKind::Verb,
                        position,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let function_words = self
            .function_words
            .into_iter()
            .enumerate()
            .map(|(position, record)| {
                record
                    .into_entry(position_id(position))
                    .map_err(|source| LexiconFileError::Entry {
                        kind: EntryKind::FunctionWord,
                        position,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Lexicon {
            verbs,
            function_words,
        })
    }
}

impl Lexicon {
    #[must_use]
    pub fn len(&self) -> usize {
        self.verbs.len() + self.function_words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes every entry into `repo`, returning how many were stored.
    ///
    /// # Errors
    ///
    /// Returns the first `StorageError` raised by the repository.
    pub async fn import_into(&self, repo: &dyn LexiconRepository) -> Result<usize, StorageError> {
        for entry in self.verbs.iter().chain(&self.function_words) {
            repo.upsert_entry(entry).await?;
        }
        tracing::info!(
            verbs = self.verbs.len(),
            function_words = self.function_words.len(),
            "imported lexicon"
        );
        Ok(self.len())
    }
}
