//! Command-line entry point for corpus analysis.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cgrank_core::metrics::eigenvector::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use cgrank_core::pipeline::{run_analysis, AnalysisOptions};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "cgrank: per-artefact method-importance metrics over sharded call graphs"
)]
struct Cli {
    /// Corpus root holding one directory per artefact (group_name_version).
    #[arg(long)]
    input_dir: PathBuf,

    /// Destination root; one directory per analyzed artefact coordinate.
    #[arg(long)]
    output_dir: PathBuf,

    /// Worker threads for the artefact pool (0 = rayon default).
    #[arg(long, default_value_t = 0)]
    workers: usize,

    /// Eigenvector power-iteration convergence tolerance.
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Eigenvector power-iteration budget.
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Print the run report as JSON to stdout.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let options = AnalysisOptions {
        workers: cli.workers,
        tolerance: cli.tolerance,
        max_iterations: cli.max_iterations,
    };

    let report = run_analysis(&cli.input_dir, &cli.output_dir, &options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        info!(
            discovered = report.discovered,
            analyzed = report.analyzed,
            skipped = report.skipped,
            failed = report.failed,
            "run finished"
        );
    }
    Ok(())
}
