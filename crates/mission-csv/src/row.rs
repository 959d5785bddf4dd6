use std::fmt;
use std::io::{self, BufRead};
use std::ops::Index;

use crate::{Error, Result, DEFAULT_DELIMITER};

/// One line of delimited text.
///
/// `ends` holds the byte offset of every delimiter in `line`, followed by
/// `line.len()`. Field `i` (1-based) spans `ends[i - 2] + 1 .. ends[i - 1]`,
/// with field 1 starting at 0. The row is reused across reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    line: String,
    ends: Vec<usize>,
    delimiter: char,
}

impl Default for Row {
    fn default() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            line: String::new(),
            ends: vec![0],
            delimiter,
        }
    }

    /// Replace the contents with the next line of `source`.
    ///
    /// Returns the number of bytes consumed, as reported by the source. Zero
    /// means end-of-input; the row then holds an empty line with a single
    /// empty field. The line terminator is not kept.
    pub fn read_next_row<R: BufRead + ?Sized>(&mut self, source: &mut R) -> io::Result<usize> {
        self.line.clear();
        let read = source.read_line(&mut self.line);
        if read.is_err() {
            self.line.clear();
        }
        if self.line.ends_with('\n') {
            self.line.pop();
            if self.line.ends_with('\r') {
                self.line.pop();
            }
        }
        self.index_fields();
        read
    }

    fn index_fields(&mut self) {
        self.ends.clear();
        let mut pos = 0;
        while let Some(found) = self.line[pos..].find(self.delimiter) {
            let at = pos + found;
            self.ends.push(at);
            pos = at + self.delimiter.len_utf8();
        }
        self.ends.push(self.line.len());
    }

    /// Borrow field `index` (1-based).
    pub fn field(&self, index: usize) -> Result<&str> {
        if index == 0 {
            return Err(Error::ZeroFieldIndex);
        }
        let end = *self.ends.get(index - 1).ok_or(Error::FieldOutOfRange {
            index,
            count: self.field_count(),
        })?;
        let start = match index {
            1 => 0,
            _ => self.ends[index - 2] + self.delimiter.len_utf8(),
        };
        Ok(&self.line[start..end])
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.field(index).ok()
    }

    pub fn field_count(&self) -> usize {
        self.ends.len()
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// All fields, in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        (1..=self.field_count()).filter_map(move |i| self.get(i))
    }
}

impl Index<usize> for Row {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        match self.field(index) {
            Ok(field) => field,
            Err(e) => panic!("{}", e),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}
