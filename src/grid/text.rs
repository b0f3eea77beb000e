use std::fmt::Write as _;
use std::path::Path;

use crate::error::GridError;

use super::board::{Cell, Grid};

pub const DELIMITER: &str = ", ";
pub const UNKNOWN_TOKEN: &str = "_";

pub fn parse_grid_str(s: &str) -> Result<Grid, GridError> {
    let mut rows = Vec::new();
    for (i, tokens) in split_rows(s).into_iter().enumerate() {
        let mut row = Vec::with_capacity(tokens.len());
        for (j, token) in tokens.into_iter().enumerate() {
            row.push(parse_cell(token, i, j)?);
        }
        rows.push(row);
    }
    Grid::new(rows)
}

pub fn read_grid<P: AsRef<Path>>(path: P) -> Result<Grid, GridError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| GridError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_grid_str(&text)
}

pub fn format_grid(grid: &Grid) -> String {
    format_rows((0..grid.rows()).map(|i| grid.row_cells(i).iter().map(|&c| cell_token(c))))
}

pub fn write_grid<P: AsRef<Path>>(path: P, grid: &Grid) -> Result<(), GridError> {
    write_text(path.as_ref(), &format_grid(grid))
}

pub fn cell_token(cell: Cell) -> String {
    match cell {
        Cell::Clue(k) => k.to_string(),
        Cell::Unknown => UNKNOWN_TOKEN.to_string(),
    }
}

/// Splits text into rows of trimmed tokens. Blank lines are skipped so a
/// trailing newline or an empty last line does not add a row.
pub(crate) fn split_rows(s: &str) -> Vec<Vec<&str>> {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split(',').map(str::trim).collect())
        .collect()
}

pub(crate) fn format_rows<R, T>(rows: R) -> String
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut out = String::new();
    for row in rows {
        let mut first = true;
        for token in row {
            if !first {
                out.push_str(DELIMITER);
            }
            first = false;
            let _ = write!(out, "{}", token.as_ref());
        }
        out.push('\n');
    }
    out
}

pub(crate) fn write_text(path: &Path, text: &str) -> Result<(), GridError> {
    std::fs::write(path, text).map_err(|source| GridError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn parse_cell(token: &str, row: usize, col: usize) -> Result<Cell, GridError> {
    if token == UNKNOWN_TOKEN {
        return Ok(Cell::Unknown);
    }
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GridError::BadToken {
            row,
            col,
            token: token.to_string(),
        });
    }
    match token.parse::<u8>() {
        Ok(k) => Ok(Cell::Clue(k)),
        Err(_) => Err(GridError::ClueOutOfRange {
            row,
            col,
            clue: token.to_string(),
        }),
    }
}
