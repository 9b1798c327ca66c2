use std::path::PathBuf;

use thiserror::Error;

/// Fatal problems detected before any report is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{flag} directory does not exist: {}", path.display())]
    MissingDirectory { flag: &'static str, path: PathBuf },

    #[error("{flag} path is not a directory: {}", path.display())]
    NotADirectory { flag: &'static str, path: PathBuf },

    #[error("unknown adapter '{0}' (run `codebrowser list-adapters`)")]
    UnknownAdapter(String),

    #[error("invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// A single finding that could not be normalized. The finding is dropped,
/// the adapter carries on with its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("<{element}> attribute '{attribute}' is not a line number: '{value}'")]
    InvalidNumber {
        element: String,
        attribute: &'static str,
        value: String,
    },

    #[error("finding has an empty file path")]
    EmptyFilePath,
}

/// Per-file rendering failures. The file is skipped and the run continues.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("source not readable: {}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read report directory {}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
