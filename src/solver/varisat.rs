use tracing::warn;
use varisat::ExtendFormula;

use crate::cnf::cnf::{Cnf, Lit};
use crate::error::SolveError;
use crate::sat::backtrack::SatResult;
use crate::solver::{ModelSolver, SolverStats, check_formula};

/// CDCL backend. A fresh varisat instance is built for every call.
#[derive(Debug, Clone, Default)]
pub struct VarisatSolver {
    stats: SolverStats,
}

impl VarisatSolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModelSolver for VarisatSolver {
    fn solve(&mut self, cnf: &Cnf, order: &[u32]) -> Result<SatResult, SolveError> {
        check_formula(cnf, order)?;
        self.stats.solve_calls += 1;

        if cnf.clauses.iter().any(Vec::is_empty) {
            return Ok(SatResult::Unsat);
        }

        let mut inner = varisat::Solver::new();
        let top = order.iter().copied().max().unwrap_or(0);
        let mut vars = vec![None; top as usize + 1];
        for &v in order {
            vars[v as usize] = Some(inner.new_var());
        }

        let to_lit =
            |lit: Lit| vars[lit.var as usize].map(|var| varisat::Lit::from_var(var, lit.sign));
        for clause in &cnf.clauses {
            let lits = clause.iter().filter_map(|&l| to_lit(l)).collect::<Vec<_>>();
            inner.add_clause(&lits);
        }

        let model = match inner.solve() {
            Ok(true) => inner.model().unwrap_or_default(),
            Ok(false) => return Ok(SatResult::Unsat),
            Err(e) => {
                warn!(error = %e, "varisat failed");
                return Err(SolveError::BackendFailed {
                    backend: "varisat",
                    reason: e.to_string(),
                });
            }
        };

        let mut values = vec![false; inner_width(&model)];
        for lit in &model {
            values[lit.var().index()] = lit.is_positive();
        }
        let out = order
            .iter()
            .map(|&v| {
                let value = vars[v as usize]
                    .and_then(|var| values.get(var.index()).copied())
                    .unwrap_or(false);
                Lit::new(v, value)
            })
            .collect();
        Ok(SatResult::Sat(out))
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &'static str {
        "varisat"
    }
}

fn inner_width(model: &[varisat::Lit]) -> usize {
    model.iter().map(|l| l.var().index() + 1).max().unwrap_or(0)
}
