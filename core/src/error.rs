use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the dashboard core.
///
/// Degenerate metric inputs are never errors; they are clamped by the
/// calculator. Only user text that cannot be understood and I/O failures
/// end up here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("expected key:value, got '{0}'")]
    Malformed(String),

    #[error("unknown key: '{0}'")]
    UnknownKey(String),

    #[error("ambiguous key: '{key}' matches {candidates:?}")]
    AmbiguousKey { key: String, candidates: Vec<String> },

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("could not parse date: '{0}'")]
    InvalidDate(String),

    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
