use tracing::{debug, trace, warn};

use crate::error::EncodingError;
use crate::grid::board::{Cell, Grid, MAX_CLUE};
use crate::grid::vars::VarMap;

use super::cardinality::exactly_k;
use super::cnf::{Cnf, Lit};

/// Encodes the puzzle: a variable is true iff its cell is a trap.
///
/// Clue cells are pinned to false first; each clue then gets an exactly-k
/// block over all of its neighbors, clue neighbors included. A clue larger
/// than its neighborhood yields an empty clause rather than an error.
pub fn encode_grid(grid: &Grid, vars: &VarMap) -> Result<Cnf, EncodingError> {
    if vars.len() != grid.len() {
        return Err(EncodingError::VarMapMismatch {
            mapped: vars.len(),
            cells: grid.len(),
        });
    }

    let mut cnf = Cnf::new(vars.len() as u32);

    // clue cells are never traps
    for ((i, j), cell) in grid.cells() {
        if cell.is_clue() {
            cnf.add_clause(vec![Lit::neg_of(var_at(vars, i, j)?)]);
        }
    }

    for ((i, j), cell) in grid.cells() {
        let Cell::Clue(k) = cell else {
            continue;
        };
        if k > MAX_CLUE {
            return Err(EncodingError::ClueOutOfRange {
                row: i,
                col: j,
                clue: k,
            });
        }

        let neighbor_vars = grid
            .neighbors(i, j)
            .map(|(x, y)| var_at(vars, x, y))
            .collect::<Result<Vec<_>, _>>()?;

        if k as usize > neighbor_vars.len() {
            warn!(
                row = i,
                col = j,
                clue = k,
                neighbors = neighbor_vars.len(),
                "clue exceeds its neighborhood, puzzle is unsatisfiable"
            );
            cnf.add_clause(Vec::new());
            continue;
        }

        let before = cnf.len();
        exactly_k(&mut cnf, &neighbor_vars, k as usize)?;
        trace!(
            row = i,
            col = j,
            clue = k,
            neighbors = neighbor_vars.len(),
            clauses = cnf.len() - before,
            "encoded clue"
        );
    }

    debug!(
        vars = cnf.num_vars,
        clauses = cnf.len(),
        clues = grid.num_clues(),
        "encoded grid"
    );
    Ok(cnf)
}

fn var_at(vars: &VarMap, row: usize, col: usize) -> Result<u32, EncodingError> {
    vars.var(row, col)
        .ok_or(EncodingError::MissingVariable { row, col })
}
