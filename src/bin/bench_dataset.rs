use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;

use gemhunter::bench::{CompareConfig, run_dataset};
use gemhunter::solver::Backend;

#[derive(Debug, Parser)]
#[command(name = "bench_dataset")]
struct Cli {
    #[arg(long)]
    dir: String,
    #[arg(long, default_value = "varisat,backtracking")]
    backends: String,
    #[arg(long = "timeout_ms", default_value_t = 30000)]
    timeout_ms: u64,
    #[arg(long)]
    csv: String,
    #[arg(long, default_value_t = false)]
    progress: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    run_from_args(&cli)
}

fn run_from_args(cli: &Cli) -> Result<()> {
    let backends = parse_backends(&cli.backends)?;
    let cfg = CompareConfig {
        backends,
        timeout: Duration::from_millis(cli.timeout_ms),
    };
    let rows = run_dataset(
        &PathBuf::from(&cli.dir),
        &cfg,
        &PathBuf::from(&cli.csv),
        cli.progress,
    )?;
    println!("rows={}", rows.len());
    Ok(())
}

fn parse_backends(s: &str) -> Result<Vec<Backend>> {
    let out = s
        .split(',')
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(Backend::from_name)
        .collect::<Result<Vec<_>>>()?;
    if out.is_empty() {
        bail!("no backends given, expected a list like varisat,backtracking");
    }
    Ok(out)
}
