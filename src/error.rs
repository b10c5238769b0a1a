use std::path::PathBuf;
use thiserror::Error;

/// The only failures that escape the normalizer: the source itself could
/// not be read. Everything below that level degrades to defaults.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read payroll source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("payroll source is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("payroll source could not be parsed: {0}")]
    Parse(#[from] csv::Error),

    #[error("payroll source contains no parseable rows")]
    Empty,
}

pub type Result<T> = std::result::Result<T, SourceError>;
