use thiserror::Error;

use crate::model::{ConfigError, EntryError, ParseError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Entry(#[from] EntryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
