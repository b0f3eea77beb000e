use anyhow::{Result, bail};

use crate::cnf::cnf::{Cnf, Lit};
use crate::sat::backtrack::SatResult;
use crate::solver::ModelSolver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedCount {
    pub count: usize,
    pub hit_cap: bool,
}

/// Counts models projected onto `projection`, stopping once more than `cap`
/// have been seen. Each model found is excluded with a blocking clause over
/// the projection before the next call.
pub fn projected_count_bounded<S: ModelSolver + ?Sized>(
    solver: &mut S,
    cnf: &Cnf,
    order: &[u32],
    projection: &[u32],
    cap: usize,
) -> Result<BoundedCount> {
    if projection.iter().any(|&v| v == 0) {
        bail!("projection contains variable 0");
    }
    if let Some(&v) = projection.iter().find(|v| !order.contains(v)) {
        bail!("projection variable {} is not in the variable order", v);
    }

    let mut work = cnf.clone();
    let mut count = 0usize;

    loop {
        let model = match solver.solve(&work, order)? {
            SatResult::Unsat => {
                return Ok(BoundedCount {
                    count,
                    hit_cap: false,
                });
            }
            SatResult::Sat(model) => model,
        };

        count += 1;
        if count > cap {
            return Ok(BoundedCount {
                count,
                hit_cap: true,
            });
        }

        // block this projected assignment
        let mut block = Vec::with_capacity(projection.len());
        for &v in projection {
            let val = model
                .iter()
                .find(|l| l.var == v)
                .map(|l| l.sign)
                .ok_or_else(|| anyhow::anyhow!("missing model value for var {}", v))?;
            block.push(Lit::new(v, !val));
        }
        if block.is_empty() {
            // an empty projection has a single projected model
            return Ok(BoundedCount {
                count,
                hit_cap: false,
            });
        }
        work.add_clause(block);
    }
}

/// True when the formula has exactly one model over `projection`.
pub fn has_unique_model<S: ModelSolver + ?Sized>(
    solver: &mut S,
    cnf: &Cnf,
    order: &[u32],
    projection: &[u32],
) -> Result<bool> {
    let res = projected_count_bounded(solver, cnf, order, projection, 1)?;
    Ok(res.count == 1 && !res.hit_cap)
}
