use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use gemhunter::bench::{BenchRow, CompareConfig, compare_file, rows_agree};
use gemhunter::cnf::dimacs::to_dimacs_with_comments;
use gemhunter::generate::{GenerateOptions, generate};
use gemhunter::grid::solution::read_solved;
use gemhunter::grid::text::{format_grid, read_grid, write_grid};
use gemhunter::solve::{Encoded, solve_encoded};
use gemhunter::solver::Backend;

#[derive(Debug, Parser)]
#[command(name = "gemhunter")]
#[command(about = "Gem Hunter puzzle solver via CNF encoding")]
struct Cli {
    /// -v for info, -vv for debug logging on stderr
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    Solve {
        path: String,
        #[arg(long, default_value = "backtracking")]
        backend: String,
        #[arg(long)]
        out: Option<String>,
        #[arg(long, default_value_t = false)]
        split: bool,
    },
    Compare {
        path: String,
        #[arg(long, default_value = "varisat,backtracking,brute")]
        backends: String,
        #[arg(long = "timeout_ms", default_value_t = 30000)]
        timeout_ms: u64,
    },
    Cnf {
        path: String,
        #[arg(long)]
        emit: String,
    },
    Gen {
        #[arg(long, default_value_t = 5)]
        rows: usize,
        #[arg(long)]
        cols: Option<usize>,
        #[arg(long)]
        hide: Option<usize>,
        #[arg(long, default_value_t = 0.2)]
        p: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: String,
        #[arg(long)]
        solution_out: Option<String>,
        #[arg(long, default_value = "varisat")]
        backend: String,
        #[arg(long, default_value_t = 50)]
        attempts: usize,
    },
    Check {
        puzzle: String,
        solved: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Cmd::Solve {
            path,
            backend,
            out,
            split,
        } => solve_cmd(&path, &backend, out.as_deref(), split)?,
        Cmd::Compare {
            path,
            backends,
            timeout_ms,
        } => compare_cmd(&path, &backends, timeout_ms)?,
        Cmd::Cnf { path, emit } => cnf_cmd(&path, &emit)?,
        Cmd::Gen {
            rows,
            cols,
            hide,
            p,
            seed,
            out,
            solution_out,
            backend,
            attempts,
        } => {
            let opts = GenerateOptions {
                rows,
                cols: cols.unwrap_or(rows),
                hide,
                trap_probability: p,
                seed,
                max_attempts: attempts,
                backend: Backend::from_name(&backend)?,
                ..GenerateOptions::default()
            };
            gen_cmd(&opts, &out, solution_out.as_deref())?
        }
        Cmd::Check { puzzle, solved } => check_cmd(&puzzle, &solved)?,
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &str) -> Result<Encoded> {
    let grid = read_grid(path).with_context(|| format!("failed to load puzzle '{}'", path))?;
    Encoded::new(grid)
}

fn solve_cmd(path: &str, backend: &str, out: Option<&str>, split: bool) -> Result<()> {
    let enc = load(path)?;
    let backend = Backend::from_name(backend)?;
    let mut solver = if split {
        backend.build_split()?
    } else {
        backend.build()
    };
    let report = solve_encoded(&enc, solver.as_mut())?;

    println!(
        "backend={} vars={} clauses={} decisions={} pruned={} wall_ms={}",
        report.backend,
        report.vars,
        report.clauses,
        report.stats.decisions,
        report.stats.pruned,
        report.wall_ms
    );
    match report.solved {
        Some(solved) => {
            print!("{}", solved.format());
            if let Some(out) = out {
                solved.write(out)?;
                println!("wrote {}", out);
            }
        }
        None => println!("no solution"),
    }
    Ok(())
}

fn compare_cmd(path: &str, backends: &str, timeout_ms: u64) -> Result<()> {
    let backends = backends
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Backend::from_name)
        .collect::<Result<Vec<_>>>()?;
    if backends.is_empty() {
        bail!("no backends given");
    }
    let cfg = CompareConfig {
        backends,
        timeout: Duration::from_millis(timeout_ms),
    };
    let rows = compare_file(Path::new(path), &cfg);
    println!("{}", BenchRow::csv_header());
    for row in &rows {
        println!("{}", row.to_csv_line());
    }
    if !rows_agree(&rows) {
        bail!("backends disagree on satisfiability");
    }
    Ok(())
}

fn cnf_cmd(path: &str, emit: &str) -> Result<()> {
    let enc = load(path)?;
    let comments = vec![
        format!("gem hunter {}x{}", enc.grid.rows(), enc.grid.cols()),
        "variable i*cols+j+1 is true iff cell (i, j) is a trap".to_string(),
    ];
    std::fs::write(emit, to_dimacs_with_comments(&enc.cnf, &comments))
        .with_context(|| format!("failed to write '{}'", emit))?;
    println!(
        "vars={} clauses={} clues={} unknowns={} max_width={}",
        enc.cnf.num_vars,
        enc.cnf.len(),
        enc.grid.num_clues(),
        enc.grid.num_unknowns(),
        enc.cnf.max_clause_width()
    );
    Ok(())
}

fn gen_cmd(opts: &GenerateOptions, out: &str, solution_out: Option<&str>) -> Result<()> {
    let puzzle = generate(opts)?;
    write_grid(out, &puzzle.grid)?;
    print!("{}", format_grid(&puzzle.grid));
    println!(
        "GEN: wrote {} | {}x{} traps={} attempts={}",
        out,
        opts.rows,
        opts.cols,
        puzzle.traps,
        puzzle.attempts
    );
    if let Some(sol) = solution_out {
        puzzle.solution.write(sol)?;
        println!("GEN: wrote solution {}", sol);
    }
    Ok(())
}

fn check_cmd(puzzle: &str, solved: &str) -> Result<()> {
    let grid = read_grid(puzzle)?;
    let solved = read_solved(solved)?;
    if !solved.completes(&grid) {
        bail!("solved grid does not match the puzzle's clues or shape");
    }
    if !solved.is_consistent() {
        bail!("solved grid violates at least one clue");
    }
    println!("CHECK: OK traps={}", solved.num_traps());
    Ok(())
}
