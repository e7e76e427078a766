use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::{
    conjugation::ConjugationMap,
    grammar::Tense,
    ids::EntryId,
    language::SourceLanguage,
    ParseError,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("canonical form cannot be empty")]
    EmptyCanonical,

    #[error("translation for {0} cannot be empty")]
    EmptyTranslation(SourceLanguage),

    #[error("entries have no translation slot for {0}")]
    NoTranslationSlot(SourceLanguage),

    #[error("function words cannot carry conjugations")]
    ConjugatedFunctionWord,
}

//
// ─── KIND & AUXILIARY ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Verb,
    FunctionWord,
}

impl EntryKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Verb => "verb",
            EntryKind::FunctionWord => "function_word",
        }
    }
}

impl FromStr for EntryKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verb" => Ok(Self::Verb),
            "function_word" => Ok(Self::FunctionWord),
            _ => Err(ParseError::EntryKind(s.to_string())),
        }
    }
}

/// Auxiliary verb used to build compound tenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Auxiliary {
    Avere,
    Essere,
}

impl Auxiliary {
    /// Rough default when a data source does not say: the few motion and
    /// state verbs in the starter lexicon take `essere`, the rest `avere`.
    #[must_use]
    pub fn guess_for(infinitive: &str) -> Self {
        match infinitive.trim() {
            "essere" | "andare" | "venire" => Auxiliary::Essere,
            _ => Auxiliary::Avere,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Auxiliary::Avere => "avere",
            Auxiliary::Essere => "essere",
        }
    }
}

impl FromStr for Auxiliary {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "avere" => Ok(Self::Avere),
            "essere" => Ok(Self::Essere),
            _ => Err(ParseError::Auxiliary(s.to_string())),
        }
    }
}

//
// ─── LEXICAL ENTRY ─────────────────────────────────────────────────────────────
//

/// A verb or function word as supplied by the lexicon.
///
/// Conjugation tables are stored as supplied, even when incomplete; callers
/// that need a usable table go through [`LexicalEntry::usable_conjugation`].
#[derive(Clone, PartialEq, Eq)]
pub struct LexicalEntry {
    id: EntryId,
    kind: EntryKind,
    canonical: String,
    translations: BTreeMap<SourceLanguage, String>,
    auxiliary: Option<Auxiliary>,
    conjugations: BTreeMap<Tense, ConjugationMap>,
}

impl LexicalEntry {
    /// # Errors
    ///
    /// Returns `EntryError::EmptyCanonical` if the infinitive is blank.
    pub fn verb(id: EntryId, infinitive: impl Into<String>) -> Result<Self, EntryError> {
        Self::new(id, EntryKind::Verb, infinitive)
    }

    /// # Errors
    ///
    /// Returns `EntryError::EmptyCanonical` if the word is blank.
    pub fn function_word(id: EntryId, word: impl Into<String>) -> Result<Self, EntryError> {
        Self::new(id, EntryKind::FunctionWord, word)
    }

    fn new(id: EntryId, kind: EntryKind, canonical: impl Into<String>) -> Result<Self, EntryError> {
        let canonical = canonical.into().trim().to_string();
        if canonical.is_empty() {
            return Err(EntryError::EmptyCanonical);
        }
        Ok(Self {
            id,
            kind,
            canonical,
            translations: BTreeMap::new(),
            auxiliary: None,
            conjugations: BTreeMap::new(),
        })
    }

    /// # Errors
    ///
    /// Returns `EntryError::NoTranslationSlot` for the learned language and
    /// `EntryError::EmptyTranslation` for blank text.
    pub fn with_translation(
        mut self,
        language: SourceLanguage,
        text: impl Into<String>,
    ) -> Result<Self, EntryError> {
        if !language.has_translation_slot() {
            return Err(EntryError::NoTranslationSlot(language));
        }
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(EntryError::EmptyTranslation(language));
        }
        self.translations.insert(language, text);
        Ok(self)
    }

    /// Attaches a conjugation table. Incomplete tables are accepted.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::ConjugatedFunctionWord` for function words.
    pub fn with_conjugation(
        mut self,
        tense: Tense,
        map: ConjugationMap,
    ) -> Result<Self, EntryError> {
        if self.kind != EntryKind::Verb {
            return Err(EntryError::ConjugatedFunctionWord);
        }
        self.conjugations.insert(tense, map);
        Ok(self)
    }

    #[must_use]
    pub fn with_auxiliary(mut self, auxiliary: Auxiliary) -> Self {
        self.auxiliary = Some(auxiliary);
        self
    }

    #[must_use]
    pub fn id(&self) -> EntryId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[must_use]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    #[must_use]
    pub fn auxiliary(&self) -> Option<Auxiliary> {
        self.auxiliary
    }

    #[must_use]
    pub fn translation(&self, language: SourceLanguage) -> Option<&str> {
        self.translations.get(&language).map(String::as_str)
    }

    /// Text to prompt with in `language`, falling back to the canonical form
    /// when there is no translation for it.
    #[must_use]
    pub fn prompt_text(&self, language: SourceLanguage) -> &str {
        self.translation(language).unwrap_or(&self.canonical)
    }

    #[must_use]
    pub fn conjugation(&self, tense: Tense) -> Option<&ConjugationMap> {
        self.conjugations.get(&tense)
    }

    #[must_use]
    pub fn conjugations(&self) -> &BTreeMap<Tense, ConjugationMap> {
        &self.conjugations
    }

    /// The table for `tense`, only if all six persons are populated.
    #[must_use]
    pub fn usable_conjugation(&self, tense: Tense) -> Option<&ConjugationMap> {
        self.conjugation(tense).filter(|map| map.is_usable())
    }

    /// A verb with at least one usable table.
    #[must_use]
    pub fn is_conjugatable(&self) -> bool {
        self.kind == EntryKind::Verb && self.conjugations.values().any(ConjugationMap::is_usable)
    }
}

impl fmt::Debug for LexicalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexicalEntry")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("canonical", &self.canonical)
            .field("tenses", &self.conjugations.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn parlare() -> LexicalEntry {
        LexicalEntry::verb(EntryId::new(1), "parlare")
            .unwrap()
            .with_translation(SourceLanguage::En, "to speak")
            .unwrap()
            .with_conjugation(
                Tense::Presente,
                ConjugationMap::from_list("parlo, parli, parla, parliamo, parlate, parlano"),
            )
            .unwrap()
    }

    #[test]
    fn blank_canonical_is_rejected() {
        let err = LexicalEntry::verb(EntryId::new(1), "  ").unwrap_err();
        assert_eq!(err, EntryError::EmptyCanonical);
    }

    #[test]
    fn italian_has_no_translation_slot() {
        let err = parlare()
            .with_translation(SourceLanguage::It, "parlare")
            .unwrap_err();
        assert_eq!(err, EntryError::NoTranslationSlot(SourceLanguage::It));
    }

    #[test]
    fn prompt_text_falls_back_to_canonical() {
        let verb = parlare();
        assert_eq!(verb.prompt_text(SourceLanguage::En), "to speak");
        assert_eq!(verb.prompt_text(SourceLanguage::De), "parlare");
        assert_eq!(verb.prompt_text(SourceLanguage::It), "parlare");
    }

    #[test]
    fn function_words_cannot_be_conjugated() {
        let err = LexicalEntry::function_word(EntryId::new(3), "di")
            .unwrap()
            .with_conjugation(Tense::Presente, ConjugationMap::default())
            .unwrap_err();
        assert_eq!(err, EntryError::ConjugatedFunctionWord);
    }

    #[test]
    fn incomplete_tables_are_kept_but_unusable() {
        let verb = parlare()
            .with_conjugation(Tense::Imperfetto, ConjugationMap::from_list("parlavo, parlavi"))
            .unwrap();
        assert!(verb.conjugation(Tense::Imperfetto).is_some());
        assert!(verb.usable_conjugation(Tense::Imperfetto).is_none());
        assert!(verb.usable_conjugation(Tense::Presente).is_some());
        assert!(verb.is_conjugatable());
    }

    #[test]
    fn verb_without_usable_tables_is_not_conjugatable() {
        let verb = LexicalEntry::verb(EntryId::new(2), "andare")
            .unwrap()
            .with_conjugation(Tense::Presente, ConjugationMap::from_list("vado"))
            .unwrap();
        assert!(!verb.is_conjugatable());
    }

    #[test]
    fn auxiliary_guess_uses_essere_for_motion_verbs() {
        assert_eq!(Auxiliary::guess_for("andare"), Auxiliary::Essere);
        assert_eq!(Auxiliary::guess_for("mangiare"), Auxiliary::Avere);
    }
}
