use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Args;

use drill_core::Clock;
use drill_core::model::{GameConfig, GameMode, SourceLanguage, Tense};
use services::{DrillLoopService, DrillRequest, DrillSource};
use storage::repository::{InMemoryRepository, LexiconRepository, Storage};
use storage::LexiconFile;

pub const DEFAULT_DB_URL: &str = "sqlite:drill.sqlite3";

/// Where lexical entries come from.
#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
    /// SQLite database URL
    #[arg(long = "db", env = "DRILL_DB_URL", default_value = DEFAULT_DB_URL)]
    pub db_url: String,

    /// Read entries from a lexicon JSON file instead of the database
    #[arg(long, env = "DRILL_LEXICON")]
    pub lexicon: Option<PathBuf>,
}

impl StoreArgs {
    /// Open the lexicon: an in-memory copy of `--lexicon` if given, else SQLite.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be loaded or the database cannot be opened.
    pub async fn open(&self) -> anyhow::Result<Arc<dyn LexiconRepository>> {
        if let Some(path) = &self.lexicon {
            let lexicon = LexiconFile::load(path)
                .and_then(LexiconFile::into_lexicon)
                .with_context(|| format!("loading {}", path.display()))?;
            let repo = InMemoryRepository::new();
            lexicon.import_into(&repo).await?;
            return Ok(Arc::new(repo));
        }

        let storage = open_sqlite(&self.db_url).await?;
        Ok(storage.lexicon)
    }
}

/// Game settings for `play` and `preview`.
#[derive(Debug, Clone, Args)]
pub struct DrillArgs {
    /// translation or conjugation
    #[arg(long, default_value = "conjugation")]
    pub mode: GameMode,

    /// Language prompts are shown in: it, en or de
    #[arg(long = "source", default_value = "en")]
    pub source_language: SourceLanguage,

    /// Comma-separated tenses for conjugation mode
    #[arg(long, value_delimiter = ',', default_value = "presente")]
    pub tenses: Vec<Tense>,

    /// verbs or function-words
    #[arg(long, default_value = "verbs")]
    pub kind: DrillSource,

    /// Maximum questions per session, 0 for no limit
    #[arg(long, env = "DRILL_MAX_QUESTIONS", default_value_t = services::session::DEFAULT_SESSION_LENGTH)]
    pub max: usize,

    /// Seed for reproducible sessions
    #[arg(long, env = "DRILL_SEED")]
    pub seed: Option<u64>,
}

impl DrillArgs {
    /// # Errors
    ///
    /// Fails when conjugation mode is selected without tenses.
    pub fn request(&self) -> anyhow::Result<DrillRequest> {
        let config = match self.mode {
            GameMode::Translation => GameConfig::translation(self.source_language),
            GameMode::Conjugation => {
                if self.kind == DrillSource::FunctionWords {
                    bail!("function words have no conjugations; use --mode translation");
                }
                GameConfig::conjugation(self.source_language, self.tenses.iter().copied())?
            }
        };
        Ok(DrillRequest::new(config, self.kind))
    }

    #[must_use]
    pub fn service(&self, lexicon: Arc<dyn LexiconRepository>) -> DrillLoopService {
        let limit = (self.max > 0).then_some(self.max);
        DrillLoopService::new(Clock::default(), lexicon)
            .with_seed(self.seed)
            .with_limit(limit)
    }
}

/// Open and migrate a SQLite database, creating the file if needed.
///
/// # Errors
///
/// Fails on an unusable URL or when the connection or migrations fail.
pub async fn open_sqlite(raw_url: &str) -> anyhow::Result<Storage> {
    let url = normalize_sqlite_url(raw_url)?;
    prepare_sqlite_file(&url)?;
    let storage = Storage::sqlite(&url)
        .await
        .with_context(|| format!("opening {url}"))?;
    tracing::debug!(url = %url, "database ready");
    Ok(storage)
}

/// Turn `sqlite:relative.db` or a bare path into an absolute `sqlite://` URL.
pub fn normalize_sqlite_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("invalid --db value: {raw:?}");
    }
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return Ok(trimmed.to_string());
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    Ok(format!("sqlite://{}", absolute.display()))
}

fn prepare_sqlite_file(db_url: &str) -> anyhow::Result<()> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let Some(path) = db_url.strip_prefix("sqlite://") else {
        bail!("invalid --db value: {db_url}");
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.starts_with("file:") {
        return Ok(());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("creating {}", path.display()))?;
    }
    Ok(())
}
