use std::fs;
use std::path::PathBuf;

use gemhunter::error::GridError;
use gemhunter::grid::board::Cell;
use gemhunter::grid::solution::{Mark, read_solved};
use gemhunter::grid::text::{format_grid, parse_grid_str, read_grid, write_grid};
use gemhunter::solve::solve_grid;
use gemhunter::solver::Backend;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gemhunter-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[test]
fn puzzle_file_round_trip() {
    let dir = scratch_dir("roundtrip");
    let path = dir.join("input_1.txt");
    fs::write(&path, "1, _, 1\n_, 2, _\n\n").expect("write input");

    let grid = read_grid(&path).expect("read");
    assert_eq!(grid.rows(), 2);
    assert_eq!(grid.cols(), 3);
    assert_eq!(grid.get(1, 1), Some(Cell::Clue(2)));
    assert_eq!(grid.get(0, 1), Some(Cell::Unknown));

    let copy = dir.join("copy.txt");
    write_grid(&copy, &grid).expect("write");
    assert_eq!(fs::read_to_string(&copy).expect("read back"), "1, _, 1\n_, 2, _\n");
    assert_eq!(read_grid(&copy).expect("reread"), grid);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn solved_grid_written_and_read_back() {
    let dir = scratch_dir("solved");
    let grid = parse_grid_str("1, _\n_, _\n").expect("parse");
    let solved = solve_grid(&grid, Backend::Backtracking)
        .expect("solve")
        .expect("satisfiable");

    let out = dir.join("output_1.txt");
    solved.write(&out).expect("write");
    assert_eq!(fs::read_to_string(&out).expect("read"), "1, T\nG, G\n");

    let back = read_solved(&out).expect("read solved");
    assert_eq!(back, solved);
    assert_eq!(back.get(0, 0), Some(Mark::Clue(1)));
    assert_eq!(back.get(0, 1), Some(Mark::Trap));
    assert!(back.completes(&grid));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn tolerates_loose_spacing() {
    let grid = parse_grid_str("  2 ,_,  _\n_ , _ ,1  \n").expect("parse");
    assert_eq!(format_grid(&grid), "2, _, _\n_, _, 1\n");
}

#[test]
fn missing_file_reports_path() {
    let err = read_grid("/nonexistent/gemhunter/input.txt").expect_err("missing");
    assert!(matches!(err, GridError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/gemhunter/input.txt"));
}

#[test]
fn malformed_puzzles_are_rejected() {
    assert!(matches!(parse_grid_str(""), Err(GridError::Empty)));
    assert!(matches!(
        parse_grid_str("1, _\n_\n"),
        Err(GridError::Ragged { row: 1, .. })
    ));
    assert!(matches!(
        parse_grid_str("1, x\n"),
        Err(GridError::BadToken { row: 0, col: 1, .. })
    ));
    assert!(matches!(
        parse_grid_str("9, _\n"),
        Err(GridError::ClueOutOfRange { row: 0, col: 0, .. })
    ));
}
