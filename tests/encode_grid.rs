use std::collections::BTreeSet;

use gemhunter::cnf::cnf::Lit;
use gemhunter::cnf::gem::encode_grid;
use gemhunter::grid::board::{Cell, Grid};
use gemhunter::grid::text::parse_grid_str;
use gemhunter::grid::vars::VarMap;
use gemhunter::sat::backtrack::{SatResult, solve};
use gemhunter::sat::brute::all_models;

#[test]
fn clue_cells_are_pinned_false() {
    let grid = parse_grid_str("1, _\n_, 2\n").expect("parse");
    let vars = VarMap::for_grid(&grid);
    let cnf = encode_grid(&grid, &vars).expect("encode");
    assert_eq!(cnf.clauses[0], vec![Lit::neg_of(1)]);
    assert_eq!(cnf.clauses[1], vec![Lit::neg_of(4)]);
}

#[test]
fn lone_zero_clue_only_pins_itself() {
    let grid = parse_grid_str("0").expect("parse");
    let vars = VarMap::for_grid(&grid);
    let cnf = encode_grid(&grid, &vars).expect("encode");
    assert_eq!(cnf.clauses, vec![vec![Lit::neg_of(1)]]);
    assert_eq!(solve(&cnf, &vars.ordered_vars()), SatResult::Sat(vec![Lit::neg_of(1)]));
}

#[test]
fn oversized_clue_encodes_to_unsat() {
    let grid = parse_grid_str("8, _\n_, _\n").expect("parse");
    let vars = VarMap::for_grid(&grid);
    let cnf = encode_grid(&grid, &vars).expect("oversized clue is not an encoding error");
    assert!(cnf.clauses.iter().any(Vec::is_empty));
    assert_eq!(solve(&cnf, &vars.ordered_vars()), SatResult::Unsat);
}

#[test]
fn mismatched_var_map_is_rejected() {
    let small = parse_grid_str("1, _").expect("parse");
    let big = parse_grid_str("1, _\n_, _").expect("parse");
    let vars = VarMap::for_grid(&small);
    assert!(encode_grid(&big, &vars).is_err());
}

#[test]
fn encoder_does_not_touch_its_inputs() {
    let grid = parse_grid_str("1, _, 1\n_, 2, _\n").expect("parse");
    let vars = VarMap::for_grid(&grid);
    let (g0, v0) = (grid.clone(), vars.clone());
    let _ = encode_grid(&grid, &vars).expect("encode");
    assert_eq!(grid, g0);
    assert_eq!(vars, v0);
}

/// Labelings of the unknown cells that satisfy every clue, found by
/// counting neighbors directly.
fn direct_labelings(grid: &Grid) -> BTreeSet<Vec<bool>> {
    let unknowns = grid
        .cells()
        .filter(|(_, c)| *c == Cell::Unknown)
        .map(|(coord, _)| coord)
        .collect::<Vec<_>>();
    let mut out = BTreeSet::new();
    for bits in 0..(1u32 << unknowns.len()) {
        let trap = |x: usize, y: usize| {
            unknowns
                .iter()
                .position(|&c| c == (x, y))
                .map(|i| (bits >> i) & 1 == 1)
                .unwrap_or(false)
        };
        let ok = grid.cells().all(|((i, j), cell)| match cell {
            Cell::Clue(k) => grid.neighbors(i, j).filter(|&(x, y)| trap(x, y)).count() == k as usize,
            Cell::Unknown => true,
        });
        if ok {
            out.insert((0..unknowns.len()).map(|i| (bits >> i) & 1 == 1).collect());
        }
    }
    out
}

fn encoded_labelings(grid: &Grid) -> BTreeSet<Vec<bool>> {
    let vars = VarMap::for_grid(grid);
    let cnf = encode_grid(grid, &vars).expect("encode");
    let models = all_models(&cnf, &vars.ordered_vars()).expect("enumerate");
    models
        .into_iter()
        .map(|model| {
            grid.cells()
                .zip(model)
                .filter_map(|((_, cell), lit)| match cell {
                    Cell::Clue(_) => {
                        assert!(!lit.sign, "clue cell {} labeled as trap", lit.var);
                        None
                    }
                    Cell::Unknown => Some(lit.sign),
                })
                .collect()
        })
        .collect()
}

#[test]
fn encoding_matches_direct_enumeration() {
    let grids = [
        "1, _\n_, _\n",
        "_, 0, _\n",
        "_, 2, _\n_, _, 1\n",
        "1, _, 1\n_, 2, _\n1, _, _\n",
        "_, _, _\n_, 3, _\n_, _, _\n",
        "2, _, 2\n_, _, _\n",
        "8, _\n_, _\n",
    ];
    for src in grids {
        let grid = parse_grid_str(src).expect("parse");
        assert_eq!(
            encoded_labelings(&grid),
            direct_labelings(&grid),
            "grid:\n{src}"
        );
    }
}
