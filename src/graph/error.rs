use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by the graph store.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Backing file unreadable (other than missing) or unwritable. Fatal.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `add_observations` referenced an entity that does not exist.
    #[error("Entity with name {0} not found")]
    EntityNotFound(String),

    /// A record could not be encoded for writing.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A `fromDate`/`toDate` bound that is not a valid date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl GraphError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> GraphError {
        let path = path.to_path_buf();
        move |source| GraphError::Io { path, source }
    }
}

/// Convenient Result type using [`GraphError`].
pub type Result<T> = std::result::Result<T, GraphError>;
