use std::path::Path;

use crate::cnf::cnf::Lit;
use crate::error::GridError;

use super::board::{Cell, Grid, MAX_CLUE, neighbors_within};
use super::text::{format_rows, split_rows, write_text};
use super::vars::VarMap;

pub const TRAP_TOKEN: &str = "T";
pub const GEM_TOKEN: &str = "G";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Clue(u8),
    Trap,
    Gem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedGrid {
    rows: usize,
    cols: usize,
    marks: Vec<Mark>,
}

/// Maps a model back onto the grid. Clue cells keep their digit; an unknown
/// cell is a trap iff its variable appears as a positive literal.
pub fn interpret_model(grid: &Grid, vars: &VarMap, model: &[Lit]) -> SolvedGrid {
    let cols = grid.cols();
    let mut traps = vec![false; grid.len()];
    for lit in model.iter().filter(|l| l.sign) {
        let slot = vars
            .coord(lit.var)
            .filter(|&(_, j)| j < cols)
            .and_then(|(i, j)| traps.get_mut(i * cols + j));
        if let Some(slot) = slot {
            *slot = true;
        }
    }

    let marks = grid
        .cells()
        .map(|((i, j), cell)| match cell {
            Cell::Clue(k) => Mark::Clue(k),
            Cell::Unknown if traps[i * cols + j] => Mark::Trap,
            Cell::Unknown => Mark::Gem,
        })
        .collect();

    SolvedGrid {
        rows: grid.rows(),
        cols,
        marks,
    }
}

impl SolvedGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Mark> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.marks[row * self.cols + col])
    }

    pub fn num_traps(&self) -> usize {
        self.marks.iter().filter(|&&m| m == Mark::Trap).count()
    }

    /// True when every clue sees exactly its count of trap neighbors.
    pub fn is_consistent(&self) -> bool {
        for i in 0..self.rows {
            for j in 0..self.cols {
                let Some(Mark::Clue(k)) = self.get(i, j) else {
                    continue;
                };
                let traps = neighbors_within(self.rows, self.cols, i, j)
                    .filter(|&(x, y)| self.get(x, y) == Some(Mark::Trap))
                    .count();
                if traps != k as usize {
                    return false;
                }
            }
        }
        true
    }

    /// True when clue cells line up with `puzzle` and unknowns were filled.
    pub fn completes(&self, puzzle: &Grid) -> bool {
        if puzzle.rows() != self.rows || puzzle.cols() != self.cols {
            return false;
        }
        puzzle.cells().all(|((i, j), cell)| match (cell, self.get(i, j)) {
            (Cell::Clue(k), Some(Mark::Clue(m))) => k == m,
            (Cell::Unknown, Some(Mark::Trap | Mark::Gem)) => true,
            _ => false,
        })
    }

    pub fn format(&self) -> String {
        format_rows(self.marks.chunks(self.cols).map(|row| row.iter().map(|&m| mark_token(m))))
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), GridError> {
        write_text(path.as_ref(), &self.format())
    }
}

pub fn mark_token(mark: Mark) -> String {
    match mark {
        Mark::Clue(k) => k.to_string(),
        Mark::Trap => TRAP_TOKEN.to_string(),
        Mark::Gem => GEM_TOKEN.to_string(),
    }
}

pub fn parse_solved_str(s: &str) -> Result<SolvedGrid, GridError> {
    let rows = split_rows(s);
    let Some(first) = rows.first() else {
        return Err(GridError::Empty);
    };
    let cols = first.len();
    let mut marks = Vec::with_capacity(rows.len() * cols);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != cols {
            return Err(GridError::Ragged {
                row: i,
                expected: cols,
                found: row.len(),
            });
        }
        for (j, &token) in row.iter().enumerate() {
            let mark = match token {
                TRAP_TOKEN => Mark::Trap,
                GEM_TOKEN => Mark::Gem,
                _ => match token.parse::<u8>() {
                    Ok(k) if k <= MAX_CLUE => Mark::Clue(k),
                    _ => {
                        return Err(GridError::BadToken {
                            row: i,
                            col: j,
                            token: token.to_string(),
                        });
                    }
                },
            };
            marks.push(mark);
        }
    }
    Ok(SolvedGrid {
        rows: rows.len(),
        cols,
        marks,
    })
}

pub fn read_solved<P: AsRef<Path>>(path: P) -> Result<SolvedGrid, GridError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| GridError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_solved_str(&text)
}
