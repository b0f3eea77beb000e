use gemhunter::cnf::cnf::Lit;
use gemhunter::error::GridError;
use gemhunter::grid::board::{Cell, Grid};
use gemhunter::grid::solution::{interpret_model, parse_solved_str};
use gemhunter::grid::text::{format_grid, parse_grid_str};
use gemhunter::grid::vars::VarMap;

fn blank(rows: usize, cols: usize) -> Grid {
    Grid::new(vec![vec![Cell::Unknown; cols]; rows]).expect("grid")
}

#[test]
fn corner_center_and_lone_cell_neighborhoods() {
    let g = blank(3, 3);
    assert_eq!(
        g.neighbors(0, 0).collect::<Vec<_>>(),
        vec![(0, 1), (1, 0), (1, 1)]
    );
    assert_eq!(g.neighbors(1, 1).count(), 8);
    assert!(!g.neighbors(1, 1).any(|c| c == (1, 1)));
    assert_eq!(blank(1, 1).neighbors(0, 0).count(), 0);
}

#[test]
fn neighborhood_is_symmetric() {
    let g = blank(4, 5);
    for ((i, j), _) in g.cells() {
        for (x, y) in g.neighbors(i, j) {
            assert!(g.neighbors(x, y).any(|c| c == (i, j)));
        }
    }
}

#[test]
fn grid_construction_validates_shape_and_clues() {
    let ragged = Grid::new(vec![vec![Cell::Unknown; 2], vec![Cell::Unknown; 3]]);
    assert!(matches!(
        ragged,
        Err(GridError::Ragged {
            row: 1,
            expected: 2,
            found: 3
        })
    ));

    match Grid::new(vec![vec![Cell::Clue(9)]]) {
        Err(GridError::ClueOutOfRange { clue, .. }) => assert_eq!(clue, "9"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn var_ids_are_row_major_and_dense() {
    let vars = VarMap::for_grid(&blank(2, 3));
    assert_eq!(vars.ordered_vars(), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(vars.var(0, 0), Some(1));
    assert_eq!(vars.var(1, 0), Some(4));
    assert_eq!(vars.var(1, 2), Some(6));
    assert_eq!(vars.var(2, 0), None);
}

#[test]
fn coord_inverts_var() {
    let vars = VarMap::for_grid(&blank(3, 4));
    for ((i, j), v) in vars.iter() {
        assert_eq!(vars.coord(v), Some((i, j)));
    }
    assert_eq!(vars.coord(0), None);
    assert_eq!(vars.coord(13), None);
}

#[test]
fn model_maps_back_through_var_coords() {
    let grid = parse_grid_str("_, 1, _\n").expect("parse");
    let vars = VarMap::for_grid(&grid);
    let model = [Lit::pos(1), Lit::neg_of(2), Lit::neg_of(3)];
    let solved = interpret_model(&grid, &vars, &model);
    assert_eq!(solved.format(), "T, 1, G\n");

    // ids the map does not know leave cells as gems
    let stray = interpret_model(&grid, &vars, &[Lit::pos(9)]);
    assert_eq!(stray.format(), "G, 1, G\n");
}

#[test]
fn parses_clues_and_unknowns() {
    let grid = parse_grid_str("1, _\n_, 3\n").expect("parse");
    assert_eq!(grid.rows(), 2);
    assert_eq!(grid.cols(), 2);
    assert_eq!(grid.get(0, 0), Some(Cell::Clue(1)));
    assert_eq!(grid.get(0, 1), Some(Cell::Unknown));
    assert_eq!(grid.get(1, 1), Some(Cell::Clue(3)));
    assert_eq!(format_grid(&grid), "1, _\n_, 3\n");
}

#[test]
fn solved_marks_are_not_puzzle_tokens() {
    assert!(parse_grid_str("T, G").is_err());
    assert!(parse_solved_str("1, _").is_err());
}

#[test]
fn oversized_clue_keeps_its_text() {
    match parse_grid_str("12, _") {
        Err(GridError::ClueOutOfRange { row: 0, col: 0, clue }) => assert_eq!(clue, "12"),
        other => panic!("unexpected {other:?}"),
    }
    let err = parse_grid_str("_, 300").expect_err("out of range");
    assert!(matches!(
        &err,
        GridError::ClueOutOfRange { row: 0, col: 1, clue } if clue == "300"
    ));
    assert!(err.to_string().contains("clue 300"));
}

#[test]
fn consistency_counts_trap_neighbors() {
    let ok = parse_solved_str("1, T\nG, G").expect("parse");
    assert!(ok.is_consistent());
    let bad = parse_solved_str("2, T\nG, G").expect("parse");
    assert!(!bad.is_consistent());
}
