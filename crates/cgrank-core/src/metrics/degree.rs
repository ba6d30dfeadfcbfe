//! Degree centrality over the merged call graph.

use std::collections::HashMap;

use crate::corpus::graph::CallGraph;
use crate::models::MethodId;

/// Structural degree centrality for every node in the graph: the fraction of
/// all other nodes directly connected to it, `degree(v) / (|V| - 1)`.
///
/// Degree counts distinct neighbors in the symmetrized view, so a
/// reciprocal call pair contributes one neighbor and scores stay inside
/// [0, 1]. Defined as 0 for every node when `|V| <= 1` to avoid the zero
/// denominator. Exact, no iteration.
pub fn degree_centrality(graph: &CallGraph) -> HashMap<MethodId, f64> {
    let node_count = graph.node_count();
    if node_count <= 1 {
        return graph.nodes().map(|id| (id, 0.0)).collect();
    }

    let denominator = (node_count - 1) as f64;
    graph
        .nodes()
        .map(|id| (id, graph.undirected_degree(id) as f64 / denominator))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
