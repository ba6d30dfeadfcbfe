//! Directed call graph assembled from sharded edge-list fragments.
//!
//! The node set is the union of all endpoints seen; parallel edges collapse
//! to a single directed pair. Adjacency is kept in both directions since
//! degree and eigenvector computations traverse edges both ways.

use std::collections::{HashMap, HashSet};

use crate::errors::{CgrankError, CgrankResult};
use crate::models::MethodId;

/// Per-shard header line; shards are concatenated before parsing, so the
/// header can appear anywhere in the stream.
const EDGE_HEADER: &str = "source,target";

/// Parse concatenated `callgraph.csv` text into directed edge pairs.
///
/// Header lines and blank lines are skipped wherever they occur. Any other
/// line that does not parse as two comma-separated integers is fatal for
/// the artefact, never silently dropped.
pub fn parse_edges(edge_text: &str) -> CgrankResult<Vec<(MethodId, MethodId)>> {
    let mut edges = Vec::new();
    for line in edge_text.lines() {
        let record = line.trim();
        if record.is_empty() || record == EDGE_HEADER {
            continue;
        }
        let parsed = record.split_once(',').and_then(|(caller, callee)| {
            let caller = caller.trim().parse::<MethodId>().ok()?;
            let callee = callee.trim().parse::<MethodId>().ok()?;
            Some((caller, callee))
        });
        match parsed {
            Some(edge) => edges.push(edge),
            None => return Err(CgrankError::MalformedEdge(record.to_string())),
        }
    }
    Ok(edges)
}

/// Deduplicated directed call graph over method IDs.
#[derive(Debug, Default)]
pub struct CallGraph {
    out_neighbors: HashMap<MethodId, HashSet<MethodId>>,
    in_neighbors: HashMap<MethodId, HashSet<MethodId>>,
    nodes: HashSet<MethodId>,
}

impl CallGraph {
    pub fn from_edges(edges: &[(MethodId, MethodId)]) -> Self {
        let mut graph = Self::default();
        for &(caller, callee) in edges {
            graph.insert_edge(caller, callee);
        }
        graph
    }

    pub fn insert_edge(&mut self, caller: MethodId, callee: MethodId) {
        self.nodes.insert(caller);
        self.nodes.insert(callee);
        self.out_neighbors.entry(caller).or_default().insert(callee);
        self.in_neighbors.entry(callee).or_default().insert(caller);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = MethodId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn out_degree(&self, node: MethodId) -> usize {
        self.out_neighbors.get(&node).map_or(0, HashSet::len)
    }

    pub fn in_degree(&self, node: MethodId) -> usize {
        self.in_neighbors.get(&node).map_or(0, HashSet::len)
    }

    pub fn out_neighbors(&self, node: MethodId) -> impl Iterator<Item = MethodId> + '_ {
        self.out_neighbors
            .get(&node)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Distinct neighbors of a node in the symmetrized view: an edge in
    /// either direction links the two nodes, and a reciprocal call pair
    /// counts once.
    pub fn undirected_degree(&self, node: MethodId) -> usize {
        let in_set = self.in_neighbors.get(&node);
        let extra_out = self
            .out_neighbors(node)
            .filter(|callee| in_set.map_or(true, |set| !set.contains(callee)));
        in_set.map_or(0, HashSet::len) + extra_out.count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
