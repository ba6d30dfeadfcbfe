//! Per-artefact analysis orchestration with Rayon-based parallelism.
//!
//! Every artefact directory is one independent unit of work: resolve
//! identities, build the merged graph, derive the three metric rankings,
//! persist. Workers share nothing mutable; a failing artefact is recorded
//! and never aborts its siblings.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::corpus::filesystem::{self, CALLGRAPH_FILE, URIS_FILE};
use crate::corpus::graph::{parse_edges, CallGraph};
use crate::corpus::resolver::resolve;
use crate::errors::{CgrankError, CgrankResult};
use crate::metrics::degree::degree_centrality;
use crate::metrics::dependents::dependent_fractions;
use crate::metrics::eigenvector::{
    eigenvector_centrality, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
use crate::metrics::normalize::{min_max_normalize, rank_descending};
use crate::models::ArtefactCoordinate;
use crate::output::{
    write_ranking, DEGREE_FILE, DEPENDENT_PERCENTAGE_FILE, EIGENVECTOR_FILE,
};

// ---------------------------------------------------------------------------
// Options and run reporting
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct AnalysisOptions {
    /// Worker threads for the artefact pool; 0 lets rayon pick.
    pub workers: usize,
    /// Eigenvector power-iteration convergence tolerance.
    pub tolerance: f64,
    /// Eigenvector power-iteration budget.
    pub max_iterations: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            workers: 0,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtefactStatus {
    Analyzed,
    Skipped,
    Failed,
}

/// Result of one artefact's unit of work.
#[derive(Clone, Debug, Serialize)]
pub struct ArtefactOutcome {
    pub directory: String,
    pub coordinate: Option<String>,
    pub status: ArtefactStatus,
    /// Failure message, or a per-metric note on an otherwise analyzed
    /// artefact (eigenvector non-convergence).
    pub detail: Option<String>,
    pub elapsed_ms: i64,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub discovered: usize,
    pub analyzed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub elapsed_ms: i64,
    pub outcomes: Vec<ArtefactOutcome>,
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Analyze every artefact directory under `input_root`, writing per-artefact
/// metric files under `output_root`.
pub fn run_analysis(
    input_root: &Path,
    output_root: &Path,
    options: &AnalysisOptions,
) -> CgrankResult<RunReport> {
    let started = Instant::now();
    let artefact_dirs = filesystem::discover_artefact_dirs(input_root)?;
    info!(artefacts = artefact_dirs.len(), "starting corpus analysis");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers)
        .build();

    let outcomes: Vec<ArtefactOutcome> = match pool {
        Ok(pool) => pool.install(|| {
            artefact_dirs
                .par_iter()
                .map(|dir| process_artefact(dir, output_root, options))
                .collect()
        }),
        Err(_) => {
            // Fallback to sequential
            artefact_dirs
                .iter()
                .map(|dir| process_artefact(dir, output_root, options))
                .collect()
        }
    };

    let count = |status: ArtefactStatus| outcomes.iter().filter(|o| o.status == status).count();
    let report = RunReport {
        discovered: artefact_dirs.len(),
        analyzed: count(ArtefactStatus::Analyzed),
        skipped: count(ArtefactStatus::Skipped),
        failed: count(ArtefactStatus::Failed),
        elapsed_ms: started.elapsed().as_millis() as i64,
        outcomes,
    };
    info!(
        analyzed = report.analyzed,
        skipped = report.skipped,
        failed = report.failed,
        elapsed_ms = report.elapsed_ms,
        "corpus analysis complete"
    );
    Ok(report)
}

/// Outcome of the fallible portion of one unit of work.
enum ArtefactAnalysis {
    Skipped {
        coordinate: String,
    },
    Completed {
        coordinate: String,
        eigenvector_error: Option<String>,
    },
}

fn process_artefact(
    artefact_dir: &Path,
    output_root: &Path,
    options: &AnalysisOptions,
) -> ArtefactOutcome {
    let started = Instant::now();
    let directory = artefact_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| artefact_dir.display().to_string());

    let analysis = analyze_artefact(artefact_dir, &directory, output_root, options);
    let elapsed_ms = started.elapsed().as_millis() as i64;

    match analysis {
        Ok(ArtefactAnalysis::Skipped { coordinate }) => {
            debug!(artefact = %coordinate, "no analyzable methods, skipping");
            ArtefactOutcome {
                directory,
                coordinate: Some(coordinate),
                status: ArtefactStatus::Skipped,
                detail: None,
                elapsed_ms,
            }
        }
        Ok(ArtefactAnalysis::Completed {
            coordinate,
            eigenvector_error,
        }) => {
            info!(artefact = %coordinate, elapsed_ms, "analyzed artefact");
            ArtefactOutcome {
                directory,
                coordinate: Some(coordinate),
                status: ArtefactStatus::Analyzed,
                detail: eigenvector_error,
                elapsed_ms,
            }
        }
        Err(error) => {
            warn!(directory = %directory, "artefact analysis failed: {error}");
            ArtefactOutcome {
                directory,
                coordinate: None,
                status: ArtefactStatus::Failed,
                detail: Some(error.to_string()),
                elapsed_ms,
            }
        }
    }
}

fn analyze_artefact(
    artefact_dir: &Path,
    directory: &str,
    output_root: &Path,
    options: &AnalysisOptions,
) -> CgrankResult<ArtefactAnalysis> {
    let coordinate = ArtefactCoordinate::from_directory_name(directory)?;
    let canonical = coordinate.canonical();

    let uri_text =
        filesystem::read_concatenated(&filesystem::shard_files(artefact_dir, URIS_FILE))?;
    let index = resolve(&uri_text, &coordinate);
    if index.has_no_owned_methods() {
        return Ok(ArtefactAnalysis::Skipped {
            coordinate: canonical,
        });
    }

    let edge_text =
        filesystem::read_concatenated(&filesystem::shard_files(artefact_dir, CALLGRAPH_FILE))?;
    let edges = parse_edges(&edge_text)?;
    let graph = CallGraph::from_edges(&edges);

    // Idempotent, and safe under concurrent creation by sibling workers.
    let out_dir = output_root.join(&canonical);
    std::fs::create_dir_all(&out_dir)?;

    let degree = degree_centrality(&graph);
    write_ranking(
        &out_dir.join(DEGREE_FILE),
        &min_max_normalize(rank_descending(&degree, &index.owned_ids)),
    )?;

    // Non-convergence is fatal for this metric only; the remaining outputs
    // are still produced.
    let eigenvector_error =
        match eigenvector_centrality(&graph, options.tolerance, options.max_iterations) {
            Ok(scores) => {
                write_ranking(
                    &out_dir.join(EIGENVECTOR_FILE),
                    &min_max_normalize(rank_descending(&scores, &index.owned_ids)),
                )?;
                None
            }
            Err(error @ CgrankError::NonConvergence { .. }) => {
                warn!(artefact = %canonical, "{error}");
                Some(error.to_string())
            }
            Err(error) => return Err(error),
        };

    write_ranking(
        &out_dir.join(DEPENDENT_PERCENTAGE_FILE),
        &dependent_fractions(&edges, &index, &coordinate),
    )?;

    Ok(ArtefactAnalysis::Completed {
        coordinate: canonical,
        eigenvector_error,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
