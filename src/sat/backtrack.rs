use std::ops::{Deref, DerefMut};

use tracing::debug;

use crate::cnf::cnf::{Cnf, Lit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatResult {
    /// One literal per variable, in the caller's order.
    Sat(Vec<Lit>),
    Unsat,
}

impl SatResult {
    pub fn model(&self) -> Option<&[Lit]> {
        match self {
            SatResult::Sat(m) => Some(m),
            SatResult::Unsat => None,
        }
    }

    pub fn is_sat(&self) -> bool {
        matches!(self, SatResult::Sat(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub decisions: usize,
    pub pruned: usize,
}

impl SearchStats {
    fn absorb(&mut self, other: SearchStats) {
        self.decisions += other.decisions;
        self.pruned += other.pruned;
    }
}

/// Depth-first search over a fixed variable order, true before false,
/// pruning only on clauses that are fully assigned and false.
#[derive(Debug)]
pub struct Backtracker<'a> {
    cnf: &'a Cnf,
    order: &'a [u32],
    assignment: Vec<Option<bool>>,
    stats: SearchStats,
}

impl<'a> Backtracker<'a> {
    pub fn new(cnf: &'a Cnf, order: &'a [u32]) -> Self {
        Self {
            cnf,
            order,
            assignment: vec![None; assignment_width(cnf, order)],
            stats: SearchStats::default(),
        }
    }

    pub fn run(&mut self) -> SatResult {
        let found = search(
            self.cnf,
            self.order,
            0,
            &mut self.assignment,
            &mut self.stats,
        );
        debug!(
            vars = self.order.len(),
            clauses = self.cnf.len(),
            decisions = self.stats.decisions,
            pruned = self.stats.pruned,
            sat = found.is_some(),
            "backtracking search finished"
        );
        match found {
            Some(model) => SatResult::Sat(model),
            None => SatResult::Unsat,
        }
    }

    /// The working assignment; every entry is `None` outside of `run`.
    pub fn assignment(&self) -> &[Option<bool>] {
        &self.assignment
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

pub fn solve(cnf: &Cnf, order: &[u32]) -> SatResult {
    Backtracker::new(cnf, order).run()
}

/// Runs the two subtrees of the first variable on separate threads.
///
/// The true subtree wins whenever it has a model, so the result is the same
/// as `solve`.
pub fn solve_split(cnf: &Cnf, order: &[u32]) -> (SatResult, SearchStats) {
    let Some(&first) = order.first() else {
        let mut bt = Backtracker::new(cnf, order);
        let res = bt.run();
        return (res, bt.stats());
    };

    let (on_true, on_false) = std::thread::scope(|s| {
        let t = s.spawn(|| subtree(cnf, order, first, true));
        let f = s.spawn(|| subtree(cnf, order, first, false));
        (join(t), join(f))
    });

    let mut stats = on_true.1;
    stats.absorb(on_false.1);
    let res = match (on_true.0, on_false.0) {
        (Some(m), _) | (None, Some(m)) => SatResult::Sat(m),
        (None, None) => SatResult::Unsat,
    };
    debug!(
        decisions = stats.decisions,
        pruned = stats.pruned,
        sat = res.is_sat(),
        "split search finished"
    );
    (res, stats)
}

fn subtree(cnf: &Cnf, order: &[u32], first: u32, value: bool) -> (Option<Vec<Lit>>, SearchStats) {
    let mut assignment = vec![None; assignment_width(cnf, order)];
    let mut stats = SearchStats {
        decisions: 1,
        pruned: 0,
    };
    assignment[first as usize] = Some(value);
    if !cnf.is_partially_valid(&assignment) {
        stats.pruned += 1;
        return (None, stats);
    }
    let found = search(cnf, order, 1, &mut assignment, &mut stats);
    (found, stats)
}

fn join<T>(handle: std::thread::ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(v) => v,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Decides `order[start..]` depth first with an explicit frame per level,
/// so deep orders never grow the call stack.
fn search(
    cnf: &Cnf,
    order: &[u32],
    start: usize,
    assignment: &mut [Option<bool>],
    stats: &mut SearchStats,
) -> Option<Vec<Lit>> {
    let mut trail = Trail::new(assignment, &order[start.min(order.len())..]);
    if start >= order.len() {
        return cnf
            .is_satisfied_by(&trail)
            .then(|| model_of(order, &trail));
    }

    // frames[d] is the next value to try for order[start + d]
    let mut frames = vec![Branch::True];
    while let Some(&branch) = frames.last() {
        let depth = start + frames.len() - 1;
        let var = order[depth] as usize;
        let value = match branch {
            Branch::True => true,
            Branch::False => false,
            Branch::Done => {
                trail[var] = None;
                frames.pop();
                continue;
            }
        };
        if let Some(top) = frames.last_mut() {
            *top = branch.next();
        }

        stats.decisions += 1;
        trail[var] = Some(value);
        if !cnf.is_partially_valid(&trail) {
            stats.pruned += 1;
            continue;
        }
        if depth + 1 == order.len() {
            if cnf.is_satisfied_by(&trail) {
                return Some(model_of(order, &trail));
            }
            continue;
        }
        frames.push(Branch::True);
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    True,
    False,
    Done,
}

impl Branch {
    fn next(self) -> Self {
        match self {
            Branch::True => Branch::False,
            Branch::False | Branch::Done => Branch::Done,
        }
    }
}

fn model_of(order: &[u32], assignment: &[Option<bool>]) -> Vec<Lit> {
    order
        .iter()
        .map(|&v| Lit::new(v, assignment[v as usize].unwrap_or(false)))
        .collect()
}

fn assignment_width(cnf: &Cnf, order: &[u32]) -> usize {
    let top = order
        .iter()
        .copied()
        .chain(cnf.vars_in_clauses())
        .max()
        .unwrap_or(0)
        .max(cnf.num_vars);
    top as usize + 1
}

/// The variables a search may decide. Dropping the trail clears all of them,
/// so every exit leaves the assignment as it was found.
struct Trail<'s> {
    assignment: &'s mut [Option<bool>],
    vars: &'s [u32],
}

impl<'s> Trail<'s> {
    fn new(assignment: &'s mut [Option<bool>], vars: &'s [u32]) -> Self {
        Self { assignment, vars }
    }
}

impl Deref for Trail<'_> {
    type Target = [Option<bool>];

    fn deref(&self) -> &Self::Target {
        &*self.assignment
    }
}

impl DerefMut for Trail<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.assignment
    }
}

impl Drop for Trail<'_> {
    fn drop(&mut self) {
        for &v in self.vars {
            self.assignment[v as usize] = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_clears_only_its_vars() {
        let mut assignment = vec![None, Some(true), None, None];
        {
            let mut trail = Trail::new(&mut assignment, &[2, 3]);
            trail[2] = Some(false);
            trail[3] = Some(true);
        }
        assert_eq!(assignment, vec![None, Some(true), None, None]);
    }

    #[test]
    fn search_restores_on_early_success() {
        let mut cnf = Cnf::new(3);
        cnf.add_clause(vec![Lit::neg_of(2)]);
        let order = [1, 2, 3];
        let mut assignment = vec![None; 4];
        let mut stats = SearchStats::default();
        let found = search(&cnf, &order, 0, &mut assignment, &mut stats);
        assert_eq!(found, Some(vec![Lit::pos(1), Lit::neg_of(2), Lit::pos(3)]));
        assert!(assignment.iter().all(Option::is_none));
        assert_eq!(stats.decisions, 4);
        assert_eq!(stats.pruned, 1);
    }

    #[test]
    fn branch_order_is_true_then_false() {
        assert_eq!(Branch::True.next(), Branch::False);
        assert_eq!(Branch::False.next(), Branch::Done);
    }
}
