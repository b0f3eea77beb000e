use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use crate::cnf::cnf::Cnf;
use crate::cnf::gem::encode_grid;
use crate::grid::board::Grid;
use crate::grid::solution::{SolvedGrid, interpret_model};
use crate::grid::vars::VarMap;
use crate::sat::backtrack::SatResult;
use crate::solver::{Backend, ModelSolver, SolverStats};

/// A grid together with its variables and formula, ready for any backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub grid: Grid,
    pub vars: VarMap,
    pub cnf: Cnf,
    pub order: Vec<u32>,
}

impl Encoded {
    pub fn new(grid: Grid) -> Result<Self> {
        let vars = VarMap::for_grid(&grid);
        let cnf = encode_grid(&grid, &vars).context("failed to encode grid")?;
        let order = vars.ordered_vars();
        Ok(Self {
            grid,
            vars,
            cnf,
            order,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    pub backend: &'static str,
    pub solved: Option<SolvedGrid>,
    pub vars: u32,
    pub clauses: usize,
    pub stats: SolverStats,
    pub wall_ms: u128,
}

pub fn solve_encoded(enc: &Encoded, solver: &mut dyn ModelSolver) -> Result<SolveReport> {
    let start = Instant::now();
    let res = solver.solve(&enc.cnf, &enc.order)?;
    let wall_ms = start.elapsed().as_millis();

    let solved = match res {
        SatResult::Sat(model) => Some(interpret_model(&enc.grid, &enc.vars, &model)),
        SatResult::Unsat => None,
    };
    info!(
        backend = solver.backend_name(),
        sat = solved.is_some(),
        wall_ms,
        "solve finished"
    );
    Ok(SolveReport {
        backend: solver.backend_name(),
        solved,
        vars: enc.cnf.num_vars,
        clauses: enc.cnf.len(),
        stats: solver.stats(),
        wall_ms,
    })
}

/// Encodes `grid` and solves it with `backend`; `None` means no trap layout
/// satisfies the clues.
pub fn solve_grid(grid: &Grid, backend: Backend) -> Result<Option<SolvedGrid>> {
    let enc = Encoded::new(grid.clone())?;
    let mut solver = backend.build();
    Ok(solve_encoded(&enc, solver.as_mut())?.solved)
}
