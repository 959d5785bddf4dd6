use std::io::BufRead;
use std::mem;

use tracing::{debug, trace};

use crate::{Error, Result, Row, DEFAULT_DELIMITER};

enum State<S> {
    Active(S),
    Exhausted,
}

/// Forward-only, single-pass cursor over the rows of a source.
///
/// An active cursor is positioned on a row. Once a read fails (end-of-input,
/// I/O error, invalid UTF-8) the cursor drops its source and stays exhausted.
/// All exhausted cursors compare equal, which makes [`RowCursor::end`] the
/// end-of-rows sentinel.
///
/// `S` is usually `&mut R`; the caller keeps ownership of the reader.
pub struct RowCursor<S> {
    state: State<S>,
    row: Row,
}

impl<S: BufRead> RowCursor<S> {
    pub fn new(source: S) -> Self {
        Self::with_delimiter(source, DEFAULT_DELIMITER)
    }

    pub fn with_delimiter(source: S, delimiter: char) -> Self {
        let mut cursor = Self {
            state: State::Active(source),
            row: Row::with_delimiter(delimiter),
        };
        cursor.advance();
        cursor
    }

    /// Build a cursor from a source that may have failed to open.
    pub fn from_source<E: std::fmt::Display>(
        source: std::result::Result<S, E>,
        delimiter: char,
    ) -> Self {
        match source {
            Ok(source) => Self::with_delimiter(source, delimiter),
            Err(e) => {
                debug!("row source unavailable: {}", e);
                Self::end_with_delimiter(delimiter)
            }
        }
    }

    /// Move to the next row. No-op once exhausted.
    pub fn advance(&mut self) {
        let State::Active(source) = &mut self.state else {
            return;
        };
        match self.row.read_next_row(source) {
            Ok(0) => {
                trace!("row source reached end of input");
                self.state = State::Exhausted;
            }
            Ok(_) => {}
            Err(e) => {
                debug!("row source read failed, treating as end of input: {}", e);
                self.state = State::Exhausted;
            }
        }
    }
}

impl<S> RowCursor<S> {
    /// The exhausted sentinel.
    pub fn end() -> Self {
        Self::end_with_delimiter(DEFAULT_DELIMITER)
    }

    fn end_with_delimiter(delimiter: char) -> Self {
        Self {
            state: State::Exhausted,
            row: Row::with_delimiter(delimiter),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, State::Exhausted)
    }

    /// The row the cursor is positioned on.
    pub fn row(&self) -> Result<&Row> {
        match self.state {
            State::Active(_) => Ok(&self.row),
            State::Exhausted => Err(Error::CursorExhausted),
        }
    }

    pub fn current(&self) -> Option<&Row> {
        self.row().ok()
    }
}

impl<S> PartialEq for RowCursor<S> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || (self.is_exhausted() && other.is_exhausted())
    }
}

impl<S> Eq for RowCursor<S> {}

impl<S> std::fmt::Debug for RowCursor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowCursor")
            .field("exhausted", &self.is_exhausted())
            .field("row", &self.row)
            .finish()
    }
}

/// Yields owned rows. The current buffer is moved out, not copied.
impl<S: BufRead> Iterator for RowCursor<S> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.is_exhausted() {
            return None;
        }
        let fresh = Row::with_delimiter(self.row.delimiter());
        let row = mem::replace(&mut self.row, fresh);
        self.advance();
        Some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn test_three_lines_three_steps() {
        let mut src = Cursor::new("1,a\n2,b\n3,c\n");
        let mut cursor = RowCursor::new(&mut src);
        let mut seen = vec![];
        while cursor != RowCursor::end() {
            seen.push(cursor.row().unwrap().field(1).unwrap().to_string());
            cursor.advance();
        }
        assert_eq!(seen, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_advance_past_end_is_idempotent() {
        let mut src = Cursor::new("only\n");
        let mut cursor = RowCursor::new(&mut src);
        assert!(!cursor.is_exhausted());
        cursor.advance();
        assert!(cursor.is_exhausted());
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.row().unwrap_err(), Error::CursorExhausted);
    }

    #[test]
    fn test_last_line_without_newline() {
        let mut src = Cursor::new("a\nb");
        let rows: Vec<Row> = RowCursor::new(&mut src).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].field(1), Ok("b"));
    }

    #[test]
    fn test_exhausted_cursors_are_equal() {
        let mut a = Cursor::new("x\n");
        let mut b = Cursor::new("y\ny\n");
        let mut first = RowCursor::new(&mut a);
        let mut second = RowCursor::new(&mut b);
        assert_ne!(first, second);
        first.advance();
        second.advance();
        second.advance();
        assert_eq!(first, second);
        assert_eq!(first, RowCursor::end());
    }

    #[test]
    fn test_active_never_equals_exhausted() {
        let mut src = Cursor::new("x\n");
        let cursor = RowCursor::new(&mut src);
        assert_ne!(cursor, RowCursor::end());
        assert_eq!(cursor, cursor);
    }

    #[test]
    fn test_empty_source_is_exhausted() {
        let mut src = Cursor::new("");
        let cursor = RowCursor::new(&mut src);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_failed_open_is_exhausted() {
        let source: io::Result<Cursor<&str>> =
            Err(io::Error::new(io::ErrorKind::NotFound, "missing.csv"));
        let mut cursor = RowCursor::from_source(source, ',');
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_read_error_is_end_of_input() {
        let mut src = io::BufReader::new(Broken);
        let cursor = RowCursor::new(&mut src);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_invalid_utf8_ends_iteration() {
        let mut src = Cursor::new(b"ok\n\xff\xfe\nlater\n".to_vec());
        let rows: Vec<Row> = RowCursor::new(&mut src).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line(), "ok");
    }

    #[test]
    fn test_iterator_keeps_delimiter() {
        let mut src = Cursor::new("1;2\n3;4\n");
        let rows: Vec<Row> = RowCursor::with_delimiter(&mut src, ';').collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].field(2), Ok("4"));
    }
}
