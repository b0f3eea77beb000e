use crate::error::GridError;

pub const MAX_CLUE: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Clue(u8),
    Unknown,
}

impl Cell {
    pub fn clue(self) -> Option<u8> {
        match self {
            Cell::Clue(k) => Some(k),
            Cell::Unknown => None,
        }
    }

    pub fn is_clue(self) -> bool {
        matches!(self, Cell::Clue(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid from rows of cells, rejecting empty, ragged or
    /// out-of-range input.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let Some(first) = rows.first() else {
            return Err(GridError::Empty);
        };
        let cols = first.len();
        if cols == 0 {
            return Err(GridError::NoColumns);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::Ragged {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            for (j, &cell) in row.iter().enumerate() {
                if let Cell::Clue(k) = cell {
                    if k > MAX_CLUE {
                        return Err(GridError::ClueOutOfRange {
                            row: i,
                            col: j,
                            clue: k.to_string(),
                        });
                    }
                }
                cells.push(cell);
            }
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    /// Row-major iteration over `((row, col), cell)`.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &cell)| ((idx / cols, idx % cols), cell))
    }

    pub fn row_cells(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn neighbors(&self, row: usize, col: usize) -> Neighbors {
        neighbors_within(self.rows, self.cols, row, col)
    }

    pub fn num_clues(&self) -> usize {
        self.cells.iter().filter(|c| c.is_clue()).count()
    }

    pub fn num_unknowns(&self) -> usize {
        self.cells.len() - self.num_clues()
    }
}

pub fn neighbors_within(rows: usize, cols: usize, row: usize, col: usize) -> Neighbors {
    Neighbors {
        center: (row, col),
        rows,
        cols,
        step: 0,
    }
}

/// In-bounds cells of the 3x3 block around `center`, excluding the center,
/// in row-major order.
#[derive(Debug, Clone)]
pub struct Neighbors {
    center: (usize, usize),
    rows: usize,
    cols: usize,
    step: usize,
}

impl Iterator for Neighbors {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.step < 9 {
            let step = self.step;
            self.step += 1;
            if step == 4 {
                continue;
            }
            let (i, j) = self.center;
            let (Some(x), Some(y)) = ((i + step / 3).checked_sub(1), (j + step % 3).checked_sub(1))
            else {
                continue;
            };
            if x < self.rows && y < self.cols {
                return Some((x, y));
            }
        }
        None
    }
}
