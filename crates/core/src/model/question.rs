use std::sync::Arc;

use crate::model::{
    answer::answers_match,
    entry::{EntryKind, LexicalEntry},
    grammar::{Person, Tense},
    ids::QuestionId,
    language::SourceLanguage,
};

pub const INFINITIVE_LABEL: &str = "Infinitive";
pub const FUNCTION_WORD_LABEL: &str = "Function Word";

/// One self-contained prompt with its expected answer.
///
/// Translation questions leave `tense` and `person` empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    entry: Option<Arc<LexicalEntry>>,
    tense: Option<Tense>,
    person: Option<Person>,
    language: SourceLanguage,
    prompt: String,
    sub_prompt: Option<String>,
    correct_answer: String,
}

impl Question {
    /// Asks for the canonical form of `entry`, prompting in `language`.
    #[must_use]
    pub fn translation(entry: &Arc<LexicalEntry>, language: SourceLanguage) -> Self {
        let (id, label) = match entry.kind() {
            EntryKind::Verb => (QuestionId::translation(entry.id(), language), INFINITIVE_LABEL),
            EntryKind::FunctionWord => (QuestionId::function_word(entry.id()), FUNCTION_WORD_LABEL),
        };
        Self {
            id,
            entry: Some(Arc::clone(entry)),
            tense: None,
            person: None,
            language,
            prompt: entry.prompt_text(language).to_string(),
            sub_prompt: Some(label.to_string()),
            correct_answer: entry.canonical().to_string(),
        }
    }

    /// Asks for the `person` form of `entry` in `tense`.
    ///
    /// Returns `None` when the entry has no usable table for `tense`.
    #[must_use]
    pub fn conjugation(
        entry: &Arc<LexicalEntry>,
        tense: Tense,
        person: Person,
        language: SourceLanguage,
    ) -> Option<Self> {
        let map = entry.usable_conjugation(tense)?;
        Some(Self {
            id: QuestionId::conjugation(entry.id(), tense, person),
            entry: Some(Arc::clone(entry)),
            tense: Some(tense),
            person: Some(person),
            language,
            prompt: format!("{} ({})", entry.prompt_text(language), entry.canonical()),
            sub_prompt: Some(format!("{person} • {tense}")),
            correct_answer: map.get(person).to_string(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn entry(&self) -> Option<&LexicalEntry> {
        self.entry.as_deref()
    }

    #[must_use]
    pub fn tense(&self) -> Option<Tense> {
        self.tense
    }

    #[must_use]
    pub fn person(&self) -> Option<Person> {
        self.person
    }

    #[must_use]
    pub fn language(&self) -> SourceLanguage {
        self.language
    }

    /// The source entry's translation in the prompt language, if it has one.
    #[must_use]
    pub fn prompt_translation(&self) -> Option<&str> {
        self.entry()?.translation(self.language)
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn sub_prompt(&self) -> Option<&str> {
        self.sub_prompt.as_deref()
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// True when `input` matches the expected answer, ignoring case and
    /// surrounding whitespace.
    #[must_use]
    pub fn accepts(&self, input: &str) -> bool {
        answers_match(input, &self.correct_answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{conjugation::ConjugationMap, ids::EntryId};

    fn parlare() -> Arc<LexicalEntry> {
        Arc::new(
            LexicalEntry::verb(EntryId::new(1), "parlare")
                .unwrap()
                .with_translation(SourceLanguage::En, "to speak")
                .unwrap()
                .with_conjugation(
                    Tense::Presente,
                    ConjugationMap::from_list("parlo, parli, parla, parliamo, parlate, parlano"),
                )
                .unwrap(),
        )
    }

    #[test]
    fn translation_question_asks_for_canonical() {
        let q = Question::translation(&parlare(), SourceLanguage::En);
        assert_eq!(q.id().as_str(), "1-trans-en");
        assert_eq!(q.prompt(), "to speak");
        assert_eq!(q.sub_prompt(), Some(INFINITIVE_LABEL));
        assert_eq!(q.correct_answer(), "parlare");
        assert!(q.tense().is_none());
        assert!(q.person().is_none());
        assert_eq!(q.prompt_translation(), Some("to speak"));
    }

    #[test]
    fn italian_prompt_falls_back_to_canonical() {
        let q = Question::translation(&parlare(), SourceLanguage::It);
        assert_eq!(q.prompt(), "parlare");
        assert_eq!(q.prompt_translation(), None);
    }

    #[test]
    fn function_word_question_uses_its_own_label() {
        let word = Arc::new(
            LexicalEntry::function_word(EntryId::new(4), "perché")
                .unwrap()
                .with_translation(SourceLanguage::De, "warum")
                .unwrap(),
        );
        let q = Question::translation(&word, SourceLanguage::De);
        assert_eq!(q.id().as_str(), "fw-4");
        assert_eq!(q.prompt(), "warum");
        assert_eq!(q.sub_prompt(), Some(FUNCTION_WORD_LABEL));
    }

    #[test]
    fn conjugation_question_combines_translation_and_canonical() {
        let q = Question::conjugation(&parlare(), Tense::Presente, Person::Noi, SourceLanguage::En)
            .unwrap();
        assert_eq!(q.prompt(), "to speak (parlare)");
        assert_eq!(q.sub_prompt(), Some("noi • Presente"));
        assert_eq!(q.correct_answer(), "parliamo");
        assert_eq!(q.id().as_str(), "1-Presente-noi");
    }

    #[test]
    fn conjugation_question_needs_a_usable_table() {
        assert!(
            Question::conjugation(&parlare(), Tense::Imperfetto, Person::Io, SourceLanguage::En)
                .is_none()
        );
    }

    #[test]
    fn accepts_is_case_and_whitespace_insensitive() {
        let q = Question::conjugation(&parlare(), Tense::Presente, Person::Io, SourceLanguage::En)
            .unwrap();
        assert!(q.accepts("  Parlo  "));
        assert!(!q.accepts("parli"));
    }
}
