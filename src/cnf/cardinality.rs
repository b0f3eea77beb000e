use crate::error::EncodingError;

use super::cnf::{Cnf, Lit};

/// Lazy lexicographic enumeration of the `r`-element index subsets of
/// `0..n`. Holds one subset at a time; clone it to restart.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    idx: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, r: usize) -> Self {
        Self {
            n,
            idx: (0..r).collect(),
            done: r > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let out = self.idx.clone();

        let r = self.idx.len();
        let bump = (0..r).rev().find(|&i| self.idx[i] < self.n - r + i);
        match bump {
            Some(i) => {
                self.idx[i] += 1;
                for j in i + 1..r {
                    self.idx[j] = self.idx[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(out)
    }
}

/// Appends clauses forcing exactly `k` of `vars` true.
///
/// Nothing is appended when `k > vars.len()`.
pub fn exactly_k(cnf: &mut Cnf, vars: &[u32], k: usize) -> Result<(), EncodingError> {
    let n = vars.len();
    if k > n {
        return Err(EncodingError::InvalidCardinality { k, n });
    }

    if k == 0 {
        for &v in vars {
            cnf.add_clause(vec![Lit::neg_of(v)]);
        }
        return Ok(());
    }
    if k == n {
        for &v in vars {
            cnf.add_clause(vec![Lit::pos(v)]);
        }
        return Ok(());
    }

    at_least_k(cnf, vars, k)?;
    at_most_k(cnf, vars, k);
    Ok(())
}

/// Every `n-k+1` subset gets a positive clause, so at most `n-k` are false.
pub fn at_least_k(cnf: &mut Cnf, vars: &[u32], k: usize) -> Result<(), EncodingError> {
    let n = vars.len();
    if k > n {
        return Err(EncodingError::InvalidCardinality { k, n });
    }
    for subset in Combinations::new(n, n - k + 1) {
        cnf.add_clause(subset.into_iter().map(|i| Lit::pos(vars[i])).collect());
    }
    Ok(())
}

/// Every `k+1` subset gets a negative clause, so at most `k` are true.
pub fn at_most_k(cnf: &mut Cnf, vars: &[u32], k: usize) {
    for subset in Combinations::new(vars.len(), k + 1) {
        cnf.add_clause(subset.into_iter().map(|i| Lit::neg_of(vars[i])).collect());
    }
}
