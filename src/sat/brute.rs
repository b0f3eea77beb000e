use crate::cnf::cnf::{Cnf, Lit};
use crate::error::SolveError;

use super::backtrack::SatResult;

pub const MAX_BRUTE_VARS: usize = 32;

/// Tries every assignment of `order`: the first variable is the most
/// significant, and true comes before false for each variable.
pub fn solve(cnf: &Cnf, order: &[u32]) -> Result<SatResult, SolveError> {
    let mut first = None;
    enumerate(cnf, order, |model| {
        first = Some(model);
        false
    })?;
    Ok(match first {
        Some(model) => SatResult::Sat(model),
        None => SatResult::Unsat,
    })
}

/// Every satisfying assignment of `order`, in enumeration order.
pub fn all_models(cnf: &Cnf, order: &[u32]) -> Result<Vec<Vec<Lit>>, SolveError> {
    let mut out = Vec::new();
    enumerate(cnf, order, |model| {
        out.push(model);
        true
    })?;
    Ok(out)
}

/// Feeds each model to `visit` until it returns false.
fn enumerate<F>(cnf: &Cnf, order: &[u32], mut visit: F) -> Result<(), SolveError>
where
    F: FnMut(Vec<Lit>) -> bool,
{
    let n = order.len();
    if n > MAX_BRUTE_VARS {
        return Err(SolveError::TooManyVariables {
            n,
            max: MAX_BRUTE_VARS,
        });
    }

    let top = order.iter().copied().max().unwrap_or(0).max(cnf.num_vars);
    let mut assignment = vec![None; top as usize + 1];

    for mask in 0..(1u64 << n) {
        for (i, &v) in order.iter().enumerate() {
            // a clear bit means true
            assignment[v as usize] = Some((mask >> (n - 1 - i)) & 1 == 0);
        }
        if !cnf.is_satisfied_by(&assignment) {
            continue;
        }
        let model = order
            .iter()
            .map(|&v| Lit::new(v, assignment[v as usize].unwrap_or(false)))
            .collect();
        if !visit(model) {
            break;
        }
    }
    Ok(())
}
