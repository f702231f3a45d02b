//! Error types for chmdict operations.

use thiserror::Error;

/// Errors that can occur while converting a dictionary.
#[derive(Error, Debug)]
pub enum Error {
    /// One raw entry could not be split into headword and definition.
    ///
    /// Only that entry is lost; the batch driver decides whether to go on.
    #[error("Malformed entry: {0}")]
    MalformedEntry(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    #[error("Object not found in archive: {0}")]
    ObjectNotFound(String),

    /// A value does not fit the container's fixed-width fields.
    #[error("Container limit exceeded: {0}")]
    ContainerLimit(String),

    /// The key collator could not be loaded.
    #[error("Collation error: {0}")]
    Collation(String),
}

impl Error {
    /// Whether this error only concerns a single entry.
    pub fn is_entry_local(&self) -> bool {
        matches!(self, Error::MalformedEntry(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
