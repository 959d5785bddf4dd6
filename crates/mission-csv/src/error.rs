use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("field index 0 is invalid, fields are numbered from 1")]
    ZeroFieldIndex,

    #[error("field {index} out of range, row has {count} field(s)")]
    FieldOutOfRange { index: usize, count: usize },

    #[error("row cursor is exhausted")]
    CursorExhausted,
}
