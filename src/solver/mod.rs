pub mod backtrack_backend;
pub mod brute_backend;
pub mod varisat;

use anyhow::{Result, bail};

use crate::cnf::cnf::Cnf;
use crate::error::SolveError;
use crate::sat::backtrack::SatResult;

use self::backtrack_backend::BacktrackingSolver;
use self::brute_backend::BruteForceSolver;
use self::varisat::VarisatSolver;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub solve_calls: usize,
    pub decisions: usize,
    pub pruned: usize,
}

/// A complete solver: returns a model over exactly the variables of
/// `order`, in that order, or `Unsat`.
pub trait ModelSolver {
    fn solve(&mut self, cnf: &Cnf, order: &[u32]) -> Result<SatResult, SolveError>;
    fn stats(&self) -> SolverStats;
    fn backend_name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Backtracking,
    BruteForce,
    Varisat,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Backtracking, Backend::BruteForce, Backend::Varisat];

    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "backtracking" | "backtrack" => Ok(Backend::Backtracking),
            "brute" | "bruteforce" => Ok(Backend::BruteForce),
            "varisat" => Ok(Backend::Varisat),
            _ => bail!(
                "unknown backend '{}', expected backtracking|brute|varisat",
                name
            ),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Backend::Backtracking => "backtracking",
            Backend::BruteForce => "brute",
            Backend::Varisat => "varisat",
        }
    }

    pub fn build(self) -> Box<dyn ModelSolver + Send> {
        match self {
            Backend::Backtracking => Box::new(BacktrackingSolver::new()),
            Backend::BruteForce => Box::new(BruteForceSolver::new()),
            Backend::Varisat => Box::new(VarisatSolver::new()),
        }
    }

    /// Like `build`, but with the split search; only the backtracking
    /// backend has one.
    pub fn build_split(self) -> Result<Box<dyn ModelSolver + Send>> {
        match self {
            Backend::Backtracking => Ok(Box::new(BacktrackingSolver::split())),
            other => bail!("--split only applies to backtracking, not {}", other.name()),
        }
    }
}

/// Rejects orders with variable 0 or repeats, and formulas that mention a
/// variable outside the order.
pub fn check_formula(cnf: &Cnf, order: &[u32]) -> Result<(), SolveError> {
    let top = order.iter().copied().max().unwrap_or(0);
    let mut declared = vec![false; top as usize + 1];
    for &v in order {
        if v == 0 {
            return Err(SolveError::ZeroVariable);
        }
        if declared[v as usize] {
            return Err(SolveError::DuplicateVariable(v));
        }
        declared[v as usize] = true;
    }
    for v in cnf.vars_in_clauses() {
        if !declared.get(v as usize).copied().unwrap_or(false) {
            return Err(SolveError::UndeclaredVariable(v));
        }
    }
    Ok(())
}
