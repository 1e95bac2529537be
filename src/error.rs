use std::path::PathBuf;

/// Failures at the input boundary. Cleaning itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid column mapping {0:?} (expected field=Column, field one of name, phone, email, language, city)")]
    InvalidMapping(String),

    #[error("unsupported input format {0:?} (expected .json or .csv)")]
    UnsupportedFormat(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
