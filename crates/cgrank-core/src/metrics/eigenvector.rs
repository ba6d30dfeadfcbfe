//! Eigenvector centrality via power iteration.
//!
//! The graph is symmetrized for this computation: an edge in either
//! direction links the two nodes, mutual influence mattering more than
//! direction. The iteration is shifted (A + I: same eigenvectors, but
//! convergent on bipartite components where the bare multiply oscillates
//! between two accumulation points). Nodes outside the dominant structural
//! component decay toward 0 and are reported as such, not special-cased.

use std::collections::{HashMap, HashSet};

use crate::corpus::graph::CallGraph;
use crate::errors::{CgrankError, CgrankResult};
use crate::models::MethodId;

pub const DEFAULT_TOLERANCE: f64 = 1e-6;
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Compute eigenvector centrality for every node of the graph.
///
/// Power iteration from a uniform positive vector, L2-renormalized each
/// step, stopping once the L1 change falls below `|V| * tolerance`.
/// Exceeding `max_iterations` is fatal for the caller's eigenvector output;
/// no approximate result is returned.
pub fn eigenvector_centrality(
    graph: &CallGraph,
    tolerance: f64,
    max_iterations: usize,
) -> CgrankResult<HashMap<MethodId, f64>> {
    let node_count = graph.node_count();
    if node_count == 0 {
        return Ok(HashMap::new());
    }

    // Dense index over a sorted node list so float accumulation order is
    // reproducible run to run.
    let mut ids: Vec<MethodId> = graph.nodes().collect();
    ids.sort_unstable();
    let index: HashMap<MethodId, usize> = ids
        .iter()
        .enumerate()
        .map(|(position, &id)| (id, position))
        .collect();

    let adjacency = symmetrized_adjacency(graph, &ids, &index);

    let uniform = 1.0 / (node_count as f64).sqrt();
    let mut scores = vec![uniform; node_count];

    for _ in 0..max_iterations {
        // score'(v) = score(v) + sum of score(u) over symmetrized neighbors.
        let mut next = scores.clone();
        for (node, neighbors) in adjacency.iter().enumerate() {
            for &neighbor in neighbors {
                next[node] += scores[neighbor];
            }
        }

        let norm = next.iter().map(|value| value * value).sum::<f64>().sqrt();
        if norm == 0.0 {
            // A zero vector cannot grow again; every score is 0.
            return Ok(ids.iter().map(|&id| (id, 0.0)).collect());
        }
        for value in &mut next {
            *value /= norm;
        }

        let delta: f64 = next
            .iter()
            .zip(&scores)
            .map(|(new, old)| (new - old).abs())
            .sum();
        scores = next;

        if delta < node_count as f64 * tolerance {
            return Ok(ids.into_iter().zip(scores).collect());
        }
    }

    Err(CgrankError::NonConvergence {
        iterations: max_iterations,
    })
}

/// Deduplicated symmetric adjacency in dense-index space.
fn symmetrized_adjacency(
    graph: &CallGraph,
    ids: &[MethodId],
    index: &HashMap<MethodId, usize>,
) -> Vec<Vec<usize>> {
    let mut linked: Vec<HashSet<usize>> = vec![HashSet::new(); ids.len()];
    for &id in ids {
        let caller = index[&id];
        for callee_id in graph.out_neighbors(id) {
            let callee = index[&callee_id];
            linked[caller].insert(callee);
            linked[callee].insert(caller);
        }
    }
    linked
        .into_iter()
        .map(|neighbors| {
            let mut sorted: Vec<usize> = neighbors.into_iter().collect();
            sorted.sort_unstable();
            sorted
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
