use anyhow::{Result, bail};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::cnf::cnf::Lit;
use crate::cnf::gem::encode_grid;
use crate::count::bounded::has_unique_model;
use crate::grid::board::{Cell, Grid, neighbors_within};
use crate::grid::solution::{SolvedGrid, interpret_model};
use crate::grid::vars::VarMap;
use crate::solver::{Backend, ModelSolver};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateOptions {
    pub rows: usize,
    pub cols: usize,
    /// Clue cells to blank out; `None` hides a fifth of the grid.
    pub hide: Option<usize>,
    pub trap_probability: f64,
    pub seed: u64,
    pub max_attempts: usize,
    pub max_hide_attempts: usize,
    pub backend: Backend,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            hide: None,
            trap_probability: 0.2,
            seed: 0,
            max_attempts: 50,
            max_hide_attempts: 10,
            backend: Backend::Varisat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub grid: Grid,
    pub solution: SolvedGrid,
    pub traps: usize,
    pub attempts: usize,
}

/// Generates a puzzle whose clues admit exactly one trap layout.
pub fn generate(opts: &GenerateOptions) -> Result<Puzzle> {
    if opts.rows == 0 || opts.cols == 0 {
        bail!("grid must be at least 1x1, got {}x{}", opts.rows, opts.cols);
    }
    if !(0.0..=1.0).contains(&opts.trap_probability) {
        bail!(
            "trap probability must be in [0,1], got {}",
            opts.trap_probability
        );
    }
    if opts.max_attempts == 0 || opts.max_hide_attempts == 0 {
        bail!("attempt limits must be >= 1");
    }

    let hide = opts.hide.unwrap_or(opts.rows * opts.cols / 5);
    let mut rng = ChaCha8Rng::seed_from_u64(opts.seed);
    let mut solver = opts.backend.build();

    for attempt in 1..=opts.max_attempts {
        let traps = (0..opts.rows * opts.cols)
            .map(|_| rng.random::<f64>() < opts.trap_probability)
            .collect::<Vec<_>>();
        let full = clue_layout(opts.rows, opts.cols, &traps);
        let clue_cells = full
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_clue())
            .map(|(idx, _)| idx)
            .collect::<Vec<_>>();
        if clue_cells.is_empty() {
            debug!(attempt, "layout has no clues, retrying");
            continue;
        }

        let base = to_grid(opts.cols, full.clone())?;
        if !is_unique(solver.as_mut(), &base)? {
            debug!(attempt, "full layout is ambiguous, retrying");
            continue;
        }

        let amount = hide.min(clue_cells.len());
        for hide_attempt in 1..=opts.max_hide_attempts {
            let mut cells = full.clone();
            for idx in pick(&mut rng, &clue_cells, amount) {
                cells[idx] = Cell::Unknown;
            }
            let grid = to_grid(opts.cols, cells)?;
            if !is_unique(solver.as_mut(), &grid)? {
                debug!(attempt, hide_attempt, "hidden layout is ambiguous");
                continue;
            }

            let vars = VarMap::for_grid(&grid);
            let model = vars
                .iter()
                .map(|(_, v)| Lit::new(v, traps[v as usize - 1]))
                .collect::<Vec<_>>();
            let solution = interpret_model(&grid, &vars, &model);
            info!(
                rows = opts.rows,
                cols = opts.cols,
                attempt,
                hide_attempt,
                hidden = amount,
                "generated puzzle"
            );
            return Ok(Puzzle {
                grid,
                solution,
                traps: traps.iter().filter(|&&t| t).count(),
                attempts: attempt,
            });
        }
        warn!(attempt, "no hide pattern kept the puzzle unique");
    }

    bail!(
        "failed to generate a uniquely solvable puzzle after {} attempts",
        opts.max_attempts
    )
}

/// Trap cells and cells with no adjacent trap become unknowns; every other
/// cell shows its trap count.
pub fn clue_layout(rows: usize, cols: usize, traps: &[bool]) -> Vec<Cell> {
    (0..rows * cols)
        .map(|idx| {
            if traps[idx] {
                return Cell::Unknown;
            }
            let count = neighbors_within(rows, cols, idx / cols, idx % cols)
                .filter(|&(x, y)| traps[x * cols + y])
                .count();
            match count {
                0 => Cell::Unknown,
                k => Cell::Clue(k as u8),
            }
        })
        .collect()
}

fn to_grid(cols: usize, cells: Vec<Cell>) -> Result<Grid> {
    let rows = cells.chunks(cols).map(<[Cell]>::to_vec).collect();
    Ok(Grid::new(rows)?)
}

fn is_unique(solver: &mut dyn ModelSolver, grid: &Grid) -> Result<bool> {
    let vars = VarMap::for_grid(grid);
    let cnf = encode_grid(grid, &vars)?;
    let order = vars.ordered_vars();
    let projection = vars
        .iter()
        .filter(|&((i, j), _)| grid.get(i, j) == Some(Cell::Unknown))
        .map(|(_, v)| v)
        .collect::<Vec<_>>();
    has_unique_model(solver, &cnf, &order, &projection)
}

/// `amount` distinct entries of `from`, by partial Fisher-Yates.
fn pick(rng: &mut ChaCha8Rng, from: &[usize], amount: usize) -> Vec<usize> {
    let mut pool = from.to_vec();
    let amount = amount.min(pool.len());
    for i in 0..amount {
        let j = rng.random_range(i..pool.len());
        pool.swap(i, j);
    }
    pool.truncate(amount);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_returns_distinct_members() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let from = [2, 4, 6, 8, 10];
        let mut got = pick(&mut rng, &from, 3);
        assert_eq!(got.len(), 3);
        got.sort_unstable();
        got.dedup();
        assert_eq!(got.len(), 3);
        assert!(got.iter().all(|x| from.contains(x)));
    }
}
