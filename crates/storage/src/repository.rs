use async_trait::async_trait;
use drill_core::model::{EntryId, EntryKind, LexicalEntry};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Supplier of lexical entries.
///
/// Listings are ordered by ascending id so that a seeded generator sees the
/// same input on every run.
#[async_trait]
pub trait LexiconRepository: Send + Sync {
    /// List every entry of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_entries(&self, kind: EntryKind) -> Result<Vec<LexicalEntry>, StorageError>;

    /// Persist or replace an entry, keyed by kind and id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if another entry of the same kind
    /// already uses the canonical form, or other storage errors.
    async fn upsert_entry(&self, entry: &LexicalEntry) -> Result<(), StorageError>;

    /// Remove every entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn clear(&self) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_verbs(&self) -> Result<Vec<LexicalEntry>, StorageError> {
        self.list_entries(EntryKind::Verb).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_function_words(&self) -> Result<Vec<LexicalEntry>, StorageError> {
        self.list_entries(EntryKind::FunctionWord).await
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<BTreeMap<(EntryKind, EntryId), LexicalEntry>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LexiconRepository for InMemoryRepository {
    async fn list_entries(&self, kind: EntryKind) -> Result<Vec<LexicalEntry>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, entry)| entry.clone())
            .collect())
    }

    async fn upsert_entry(&self, entry: &LexicalEntry) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let clash = guard.iter().any(|((kind, id), existing)| {
            *kind == entry.kind() && *id != entry.id() && existing.canonical() == entry.canonical()
        });
        if clash {
            return Err(StorageError::Conflict(entry.canonical().to_string()));
        }
        guard.insert((entry.kind(), entry.id()), entry.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.clear();
        Ok(())
    }
}

/// Lexicon backend behind a trait object for easy swapping.
#[derive(Clone)]
pub struct Storage {
    pub lexicon: Arc<dyn LexiconRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let lexicon: Arc<dyn LexiconRepository> = Arc::new(InMemoryRepository::new());
        Self { lexicon }
    }
}
