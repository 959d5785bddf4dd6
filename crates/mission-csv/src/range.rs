use std::io::BufRead;

use crate::{Row, RowCursor, DEFAULT_DELIMITER};

/// One-shot view over the rows of a borrowed source.
///
/// Every [`Rows::begin`] continues from wherever the source currently is; the
/// source is never rewound.
pub struct Rows<'a, R: ?Sized> {
    source: &'a mut R,
    delimiter: char,
}

pub fn rows<R: BufRead + ?Sized>(source: &mut R) -> Rows<'_, R> {
    Rows::new(source)
}

impl<'a, R: BufRead + ?Sized> Rows<'a, R> {
    pub fn new(source: &'a mut R) -> Self {
        Self::with_delimiter(source, DEFAULT_DELIMITER)
    }

    pub fn with_delimiter(source: &'a mut R, delimiter: char) -> Self {
        Self { source, delimiter }
    }

    pub fn begin(&mut self) -> RowCursor<&mut R> {
        RowCursor::with_delimiter(&mut *self.source, self.delimiter)
    }

    /// The exhausted sentinel to compare [`Rows::begin`] cursors against.
    /// Takes no `self`, so it can be called while a cursor borrows the range.
    pub fn end() -> RowCursor<&'a mut R> {
        RowCursor::end()
    }

    /// Visit every remaining row, borrowing each in turn. Stops at the first
    /// error returned by `f`. Returns the number of rows visited.
    pub fn for_each_row<E, F>(&mut self, mut f: F) -> Result<usize, E>
    where
        F: FnMut(&Row) -> Result<(), E>,
    {
        let mut visited = 0;
        let mut cursor = self.begin();
        while let Some(row) = cursor.current() {
            f(row)?;
            visited += 1;
            cursor.advance();
        }
        Ok(visited)
    }
}

impl<'a, R: BufRead + ?Sized> IntoIterator for Rows<'a, R> {
    type Item = Row;
    type IntoIter = RowCursor<&'a mut R>;

    fn into_iter(self) -> Self::IntoIter {
        RowCursor::with_delimiter(self.source, self.delimiter)
    }
}
