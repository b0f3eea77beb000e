use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::grid::text::read_grid;
use crate::solve::{Encoded, solve_encoded};
use crate::solver::Backend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareConfig {
    pub backends: Vec<Backend>,
    pub timeout: Duration,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            backends: vec![Backend::Varisat, Backend::Backtracking, Backend::BruteForce],
            timeout: Duration::from_millis(30_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchRow {
    pub path: String,
    pub status: String,
    pub backend: String,
    pub wall_ms: Option<u128>,
    pub cells: Option<usize>,
    pub unknowns: Option<usize>,
    pub cnf_vars: Option<u32>,
    pub cnf_clauses: Option<usize>,
    pub traps: Option<usize>,
    pub decisions: Option<usize>,
    pub pruned: Option<usize>,
}

impl BenchRow {
    pub fn csv_header() -> &'static str {
        "path,status,backend,wall_ms,cells,unknowns,cnf_vars,cnf_clauses,traps,decisions,pruned"
    }

    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{}",
            esc_csv(&self.path),
            self.status,
            self.backend,
            opt_u128(self.wall_ms),
            opt_usize(self.cells),
            opt_usize(self.unknowns),
            opt_u32(self.cnf_vars),
            opt_usize(self.cnf_clauses),
            opt_usize(self.traps),
            opt_usize(self.decisions),
            opt_usize(self.pruned),
        )
    }

    fn empty(path: &str, backend: Backend, status: &str) -> Self {
        Self {
            path: path.to_string(),
            status: status.to_string(),
            backend: backend.name().to_string(),
            wall_ms: None,
            cells: None,
            unknowns: None,
            cnf_vars: None,
            cnf_clauses: None,
            traps: None,
            decisions: None,
            pruned: None,
        }
    }
}

/// Runs `backend` on a worker thread and gives up after `timeout`. A
/// timed-out worker is left to finish on its own.
pub fn run_one(label: &str, enc: &Encoded, backend: Backend, timeout: Duration) -> BenchRow {
    let start = Instant::now();
    let (tx, rx) = mpsc::channel();
    let work = enc.clone();
    let path = label.to_string();

    std::thread::spawn(move || {
        let row = run_one_inner(&path, &work, backend);
        let _ = tx.send(row);
    });

    match rx.recv_timeout(timeout) {
        Ok(mut row) => {
            row.wall_ms = Some(start.elapsed().as_millis());
            row
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            warn!(path = label, backend = backend.name(), "solver timed out");
            let mut row = BenchRow::empty(label, backend, "timeout");
            row.wall_ms = Some(start.elapsed().as_millis());
            row
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            let mut row = BenchRow::empty(label, backend, "internal_error");
            row.wall_ms = Some(start.elapsed().as_millis());
            row
        }
    }
}

fn run_one_inner(path: &str, enc: &Encoded, backend: Backend) -> BenchRow {
    let mut row = BenchRow::empty(path, backend, "ok");
    row.cells = Some(enc.grid.len());
    row.unknowns = Some(enc.grid.num_unknowns());
    row.cnf_vars = Some(enc.cnf.num_vars);
    row.cnf_clauses = Some(enc.cnf.len());

    let mut solver = backend.build();
    let report = match solve_encoded(enc, solver.as_mut()) {
        Ok(v) => v,
        Err(e) => {
            warn!(path, backend = backend.name(), error = %e, "solver failed");
            row.status = "internal_error".to_string();
            return row;
        }
    };

    row.decisions = Some(report.stats.decisions);
    row.pruned = Some(report.stats.pruned);
    match report.solved {
        Some(solved) => {
            row.status = "sat".to_string();
            row.traps = Some(solved.num_traps());
        }
        None => row.status = "unsat".to_string(),
    }
    row
}

/// Every backend in `cfg` on the puzzle at `path`, in order.
pub fn compare_file(path: &Path, cfg: &CompareConfig) -> Vec<BenchRow> {
    let label = path.to_string_lossy().to_string();
    let enc = match read_grid(path)
        .map_err(anyhow::Error::from)
        .and_then(Encoded::new)
    {
        Ok(v) => v,
        Err(e) => {
            warn!(path = %label, error = %e, "failed to load puzzle");
            return cfg
                .backends
                .iter()
                .map(|&b| BenchRow::empty(&label, b, "parse_error"))
                .collect();
        }
    };
    cfg.backends
        .iter()
        .map(|&b| run_one(&label, &enc, b, cfg.timeout))
        .collect()
}

/// False when two finished backends disagree on satisfiability.
pub fn rows_agree(rows: &[BenchRow]) -> bool {
    let mut seen = None;
    for row in rows {
        let sat = match row.status.as_str() {
            "sat" => true,
            "unsat" => false,
            _ => continue,
        };
        match seen {
            None => seen = Some(sat),
            Some(prev) if prev != sat => return false,
            Some(_) => {}
        }
    }
    true
}

pub fn run_dataset(
    dir: &Path,
    cfg: &CompareConfig,
    csv_path: &Path,
    progress: bool,
) -> std::io::Result<Vec<BenchRow>> {
    let paths = discover_paths(dir)?;
    let mut csv = File::create(csv_path)?;
    writeln!(csv, "{}", BenchRow::csv_header())?;
    csv.flush()?;

    let mut rows = Vec::new();
    for path in paths {
        let file_rows = compare_file(&path, cfg);
        if !rows_agree(&file_rows) {
            warn!(path = %path.display(), "backends disagree");
        }
        for row in file_rows {
            if progress {
                println!(
                    "path={} backend={} status={} wall_ms={}",
                    row.path,
                    row.backend,
                    row.status,
                    row.wall_ms.unwrap_or_default()
                );
            }
            writeln!(csv, "{}", row.to_csv_line())?;
            csv.flush()?;
            rows.push(row);
        }
    }

    Ok(rows)
}

fn discover_paths(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut out = Vec::<PathBuf>::new();
    collect_paths(dir, &mut out)?;
    out.sort();
    Ok(out)
}

fn collect_paths(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let p = entry.path();
        if p.is_dir() {
            collect_paths(&p, out)?;
            continue;
        }
        if is_puzzle_file(&p) {
            out.push(p);
        }
    }
    Ok(())
}

// solved grids and generator solutions share the extension
fn is_puzzle_file(path: &Path) -> bool {
    let ext = path.extension().and_then(|x| x.to_str()).unwrap_or("");
    let stem = path.file_stem().and_then(|x| x.to_str()).unwrap_or("");
    ext == "txt" && stem.starts_with("input")
}

fn opt_usize(v: Option<usize>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}
fn opt_u32(v: Option<u32>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}
fn opt_u128(v: Option<u128>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn esc_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
