use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlanError>;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read {} line {line}: {source}", path.display())]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: missing column {column} ({name})")]
    MissingColumn { line: usize, column: usize, name: &'static str },

    #[error("line {line}: column {column} ({name}) has invalid value {value:?}")]
    InvalidValue { line: usize, column: usize, name: &'static str, value: String },

    #[error("data rows are numbered from 1")]
    ZeroRow,

    #[error("data row {row} not found, file has {available} data row(s)")]
    RowNotFound { row: usize, available: usize },
}
