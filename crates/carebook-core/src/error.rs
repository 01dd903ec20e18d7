//! Error type shared by every fallible operation in carebook-core.
//!
//! The matcher has no error path; everything that touches files, JSON,
//! config, or user-supplied record data reports through [`Error`].

use std::path::PathBuf;

/// Result alias used throughout carebook-core.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("invalid keybinding for `{action}`: expected a single character, got {value:?}")]
    Keybinding { action: &'static str, value: String },

    #[error("invalid date {0:?} (expected YYYY-MM-DD or e.g. \"March 15, 2024\")")]
    InvalidDate(String),

    #[error("invalid date format {0:?}")]
    DateFormat(String),

    #[error("unknown category {0:?}")]
    UnknownCategory(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("duplicate record id {0}")]
    DuplicateId(String),

    #[error("no record with id {0}")]
    RecordNotFound(String),

    #[error("there are no records to export")]
    NothingToExport,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub(crate) fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Json { context: context.into(), source }
    }
}
