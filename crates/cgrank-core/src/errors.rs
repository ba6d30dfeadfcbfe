//! Error types for the cgrank core library.

/// Top-level error enum for the cgrank core library.
///
/// Every variant is scoped to a single artefact's analysis run; the
/// orchestrator records the failure and moves on to sibling artefacts.
#[derive(Debug, thiserror::Error)]
pub enum CgrankError {
    #[error("Malformed edge record: {0:?}")]
    MalformedEdge(String),

    #[error("Malformed artefact directory name: {0:?}")]
    MalformedArtefactDir(String),

    #[error("Eigenvector centrality did not converge within {iterations} iterations")]
    NonConvergence { iterations: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CgrankResult<T> = Result<T, CgrankError>;
