use rand::Rng;
use std::sync::Arc;

use drill_core::model::{GameConfig, GameMode, LexicalEntry, Person, Question};

/// Longest session the drill offers by default.
pub const DEFAULT_SESSION_LENGTH: usize = 25;

/// Shuffles `items` in place (Fisher–Yates, walking down from the last index).
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Builds all questions for `config`, shuffled but not capped.
pub fn generate_questions<R: Rng + ?Sized>(
    entries: &[LexicalEntry],
    config: &GameConfig,
    rng: &mut R,
) -> Vec<Question> {
    QuestionGenerator::new(config.clone()).generate(entries, rng)
}

/// Turns lexical entries into a shuffled, optionally capped question list.
///
/// Randomness comes only from the `Rng` passed to [`QuestionGenerator::generate`]:
/// person picks happen in entry/tense order, then the whole list is shuffled.
#[derive(Debug, Clone)]
pub struct QuestionGenerator {
    config: GameConfig,
    limit: Option<usize>,
}

impl QuestionGenerator {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            limit: None,
        }
    }

    /// Keep at most `limit` questions after shuffling.
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Generate the question sequence for a session.
    ///
    /// Entries without a usable table for a selected tense are skipped for
    /// that tense. The result may be empty; callers decide whether a session
    /// can start.
    pub fn generate<R: Rng + ?Sized>(&self, entries: &[LexicalEntry], rng: &mut R) -> Vec<Question> {
        let language = self.config.source_language();
        let mut questions = Vec::new();

        for entry in entries {
            let entry = Arc::new(entry.clone());
            match self.config.mode() {
                GameMode::Translation => {
                    questions.push(Question::translation(&entry, language));
                }
                GameMode::Conjugation => {
                    for &tense in self.config.tenses() {
                        if entry.usable_conjugation(tense).is_none() {
                            tracing::trace!(
                                entry = %entry.id(),
                                canonical = entry.canonical(),
                                %tense,
                                "skipping entry without a complete table"
                            );
                            continue;
                        }
                        let person = Person::ALL[rng.random_range(0..Person::ALL.len())];
                        if let Some(q) = Question::conjugation(&entry, tense, person, language) {
                            questions.push(q);
                        }
                    }
                }
            }
        }

        shuffle(&mut questions, rng);
        if let Some(limit) = self.limit {
            questions.truncate(limit);
        }

        tracing::debug!(
            mode = %self.config.mode(),
            entries = entries.len(),
            questions = questions.len(),
            "generated questions"
        );
        questions
    }
}
