use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use mission_csv::Row;
use tracing::{debug, info};

use crate::{CsvCfg, MissionInit, PlanError, Result, Waypoint};

fn open(path: &Path) -> Result<BufReader<File>> {
    let f = File::open(path).map_err(|source| PlanError::Open { path: path.to_path_buf(), source })?;
    Ok(BufReader::new(f))
}

/// Visit the data rows of `path` with their 1-based file line numbers.
/// The header (when configured) and blank lines are skipped.
fn for_each_data_row<F>(path: &Path, cfg: &CsvCfg, mut f: F) -> Result<usize>
where
    F: FnMut(&Row, usize) -> Result<bool>,
{
    let mut reader = open(path)?;
    let mut row = Row::with_delimiter(cfg.delimiter);
    let mut line = 0;
    let mut data_rows = 0;
    loop {
        let read = row.read_next_row(&mut reader).map_err(|source| PlanError::Read {
            path: path.to_path_buf(),
            line: line + 1,
            source,
        })?;
        if read == 0 {
            break;
        }
        line += 1;
        let is_header = line == 1 && cfg.skip_header;
        if !is_header && !row.line().trim().is_empty() {
            data_rows += 1;
            if !f(&row, line)? {
                break;
            }
        }
    }
    debug!("{}: {} line(s), {} data row(s) visited", path.display(), line, data_rows);
    Ok(data_rows)
}

/// Load every waypoint row in file order.
pub fn load_waypoints(path: impl AsRef<Path>, cfg: &CsvCfg) -> Result<Vec<Waypoint>> {
    let path = path.as_ref();
    let mut out = Vec::new();
    for_each_data_row(path, cfg, |row, line| {
        out.push(Waypoint::from_row(row, line)?);
        Ok(true)
    })?;
    info!("loaded {} waypoint(s) from {}", out.len(), path.display());
    Ok(out)
}

/// Load mission settings from data row `row_num` (1-based, header excluded).
pub fn load_init(path: impl AsRef<Path>, row_num: usize, cfg: &CsvCfg) -> Result<MissionInit> {
    if row_num == 0 {
        return Err(PlanError::ZeroRow);
    }
    let path = path.as_ref();
    let mut found = None;
    let mut seen = 0;
    for_each_data_row(path, cfg, |row, line| {
        seen += 1;
        if seen < row_num {
            return Ok(true);
        }
        found = Some(MissionInit::from_row(row, line)?);
        Ok(false)
    })?;
    let init = found.ok_or(PlanError::RowNotFound { row: row_num, available: seen })?;
    info!("loaded mission settings from {} row {}", path.display(), row_num);
    Ok(init)
}
