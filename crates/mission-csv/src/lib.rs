//! Line-oriented delimited text reading.
//!
//! A [`Row`] holds one line and the offsets of its delimiters, so fields are
//! handed out as `&str` views into the line without per-field allocation.
//! [`RowCursor`] walks a source one row at a time and [`Rows`] wraps a source
//! for one-shot iteration.
//!
//! There is no quoting or escaping: a delimiter inside a field is a field
//! separator. Fields are numbered from 1.

mod error;
pub mod cursor;
pub mod range;
pub mod row;

pub use cursor::RowCursor;
pub use error::{Error, Result};
pub use range::{rows, Rows};
pub use row::Row;

/// Field separator used when none is given.
pub const DEFAULT_DELIMITER: char = ',';
