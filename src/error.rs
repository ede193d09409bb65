//! Error types for vocabulary loading and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain a usable vocabulary. The tokenizer is never built
/// from a partially loaded asset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read vocabulary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot fetch vocabulary from {url}: {message}")]
    Http { url: String, message: String },

    #[error("vocabulary is not a JSON array of strings: {0}")]
    Parse(String),

    #[error("no vocabulary embedded (build with BERTOK_VOCAB)")]
    NotEmbedded,
}

/// Invalid command-line or environment settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}
