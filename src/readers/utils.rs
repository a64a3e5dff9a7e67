use super::scan::{HeaderPattern, ScanState, scan_lines};
use super::types::ReadError;
use log::debug;
use std::path::Path;

/// Reads `path` into fixed-width numeric rows, starting after the header.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_table(
    path: &Path,
    pattern: &HeaderPattern,
    columns: usize,
) -> Result<Option<Vec<Vec<f64>>>, ReadError> {
    if !path.exists() {
        return Ok(None);
    }

    let text =
        std::fs::read_to_string(path).map_err(|e| ReadError::Io(path.to_path_buf(), e))?;

    let state = scan_lines(pattern, text.lines());
    let data_start = state.data_start().unwrap_or(0);
    if state == ScanState::Fallback {
        debug!(
            "No '{}'/'{}' header in {}, parsing from line 0",
            pattern.first,
            pattern.second,
            path.display()
        );
    }

    let rows = parse_rows(text.lines().enumerate().skip(data_start), columns)?;
    if rows.is_empty() {
        return Err(ReadError::Empty(path.to_path_buf()));
    }

    Ok(Some(rows))
}

/// Parses whitespace-delimited rows of exactly `columns` numbers. Blank lines
/// are skipped; line numbers in errors are 1-based.
pub fn parse_rows<'a, I>(lines: I, columns: usize) -> Result<Vec<Vec<f64>>, ReadError>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let mut rows = Vec::new();

    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| ReadError::Number {
                    line: index + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, ReadError>>()?;

        if row.len() != columns {
            return Err(ReadError::ColumnCount {
                line: index + 1,
                expected: columns,
                found: row.len(),
            });
        }

        rows.push(row);
    }

    Ok(rows)
}
