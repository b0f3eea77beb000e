use crate::cnf::cnf::Cnf;
use crate::error::SolveError;
use crate::sat::backtrack::SatResult;
use crate::sat::brute;
use crate::solver::{ModelSolver, SolverStats, check_formula};

#[derive(Debug, Clone, Default)]
pub struct BruteForceSolver {
    stats: SolverStats,
}

impl BruteForceSolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModelSolver for BruteForceSolver {
    fn solve(&mut self, cnf: &Cnf, order: &[u32]) -> Result<SatResult, SolveError> {
        check_formula(cnf, order)?;
        self.stats.solve_calls += 1;
        brute::solve(cnf, order)
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &'static str {
        "brute"
    }
}
