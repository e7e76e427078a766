use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use drill_core::Clock;
use drill_core::model::{ConfigError, GameConfig, LexicalEntry, Question, SourceLanguage, Tense};
use storage::repository::{InMemoryRepository, LexiconRepository};

use super::engine::SessionEngine;
use super::plan::{DEFAULT_SESSION_LENGTH, QuestionGenerator};
use crate::error::SessionError;

/// Which list of the lexicon a drill draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrillSource {
    #[default]
    Verbs,
    FunctionWords,
}

impl DrillSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DrillSource::Verbs => "verbs",
            DrillSource::FunctionWords => "function-words",
        }
    }
}

impl fmt::Display for DrillSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrillSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "verbs" | "verb" => Ok(DrillSource::Verbs),
            "function-words" | "function-word" | "words" => Ok(DrillSource::FunctionWords),
            other => Err(format!("unknown drill source: {other}")),
        }
    }
}

/// What to drill: a game configuration plus the entry list it runs over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillRequest {
    pub config: GameConfig,
    pub source: DrillSource,
}

impl DrillRequest {
    #[must_use]
    pub fn new(config: GameConfig, source: DrillSource) -> Self {
        Self { config, source }
    }

    #[must_use]
    pub fn translation(source: DrillSource, language: SourceLanguage) -> Self {
        Self::new(GameConfig::translation(language), source)
    }

    /// Conjugation drill over verbs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoTenses` if `tenses` is empty.
    pub fn conjugation(
        language: SourceLanguage,
        tenses: impl IntoIterator<Item = Tense>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(
            GameConfig::conjugation(language, tenses)?,
            DrillSource::Verbs,
        ))
    }
}

/// Loads lexical entries and starts drill sessions.
#[derive(Clone)]
pub struct DrillLoopService {
    clock: Clock,
    lexicon: Arc<dyn LexiconRepository>,
    seed: Option<u64>,
    limit: Option<usize>,
}

impl DrillLoopService {
    #[must_use]
    pub fn new(clock: Clock, lexicon: Arc<dyn LexiconRepository>) -> Self {
        Self {
            clock,
            lexicon,
            seed: None,
            limit: Some(DEFAULT_SESSION_LENGTH),
        }
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(clock, Arc::new(InMemoryRepository::new()))
    }

    /// Fix the random source so generated sessions are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Cap on questions per session; `None` keeps every generated question.
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn lexicon(&self) -> &Arc<dyn LexiconRepository> {
        &self.lexicon
    }

    /// Load the entries a request draws from.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on repository failures.
    pub async fn load_entries(&self, source: DrillSource) -> Result<Vec<LexicalEntry>, SessionError> {
        let entries = match source {
            DrillSource::Verbs => self.lexicon.list_verbs().await?,
            DrillSource::FunctionWords => self.lexicon.list_function_words().await?,
        };
        tracing::debug!(source = %source, count = entries.len(), "loaded entries");
        Ok(entries)
    }

    /// Generate the question sequence for `request` without starting a session.
    ///
    /// An empty result is not an error here.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on repository failures.
    pub async fn preview(&self, request: &DrillRequest) -> Result<Vec<Question>, SessionError> {
        let entries = self.load_entries(request.source).await?;
        let generator = QuestionGenerator::new(request.config.clone()).with_limit(self.limit);
        let mut rng = self.rng();
        Ok(generator.generate(&entries, &mut rng))
    }

    /// Generate questions for `request` and start a session over them.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no question could be generated.
    /// Returns `SessionError::Storage` on repository failures.
    pub async fn start_session(&self, request: &DrillRequest) -> Result<SessionEngine, SessionError> {
        let questions = self.preview(request).await?;
        if questions.is_empty() {
            tracing::warn!(
                mode = %request.config.mode(),
                source = %request.source,
                "no questions for drill"
            );
            return Err(SessionError::Empty);
        }
        SessionEngine::new(questions, self.clock)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
