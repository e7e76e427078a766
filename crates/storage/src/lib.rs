#![forbid(unsafe_code)]

pub mod lexicon_file;
pub mod repository;
pub mod sqlite;

pub use lexicon_file::{Lexicon, LexiconFile, LexiconFileError};
pub use repository::{InMemoryRepository, LexiconRepository, Storage, StorageError};
