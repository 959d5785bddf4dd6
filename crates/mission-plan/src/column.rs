use std::str::FromStr;

use mission_csv::Row;

use crate::{PlanError, Result};

/// Parse field `column` (1-based) of `row`, which came from file line `line`.
pub(crate) fn parse<T: FromStr>(row: &Row, line: usize, column: usize, name: &'static str) -> Result<T> {
    let raw = row
        .get(column)
        .ok_or(PlanError::MissingColumn { line, column, name })?;
    raw.trim().parse().map_err(|_| PlanError::InvalidValue {
        line,
        column,
        name,
        value: raw.to_string(),
    })
}
