use crate::cnf::cnf::Cnf;
use crate::error::SolveError;
use crate::sat::backtrack::{Backtracker, SatResult, solve_split};
use crate::solver::{ModelSolver, SolverStats, check_formula};

#[derive(Debug, Clone, Default)]
pub struct BacktrackingSolver {
    split: bool,
    stats: SolverStats,
}

impl BacktrackingSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches the two subtrees of the first variable in parallel.
    pub fn split() -> Self {
        Self {
            split: true,
            stats: SolverStats::default(),
        }
    }
}

impl ModelSolver for BacktrackingSolver {
    fn solve(&mut self, cnf: &Cnf, order: &[u32]) -> Result<SatResult, SolveError> {
        check_formula(cnf, order)?;
        self.stats.solve_calls += 1;

        let (res, search) = if self.split {
            solve_split(cnf, order)
        } else {
            let mut bt = Backtracker::new(cnf, order);
            let res = bt.run();
            (res, bt.stats())
        };
        self.stats.decisions += search.decisions;
        self.stats.pruned += search.pruned;
        Ok(res)
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &'static str {
        if self.split { "backtracking-split" } else { "backtracking" }
    }
}
