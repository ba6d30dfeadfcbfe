//! Distinct-dependent counting across the corpus edge set.
//!
//! A dependent of a target method is an artefact owning at least one method
//! that calls it. Callers may live in any artefact, so this metric reads the
//! full corpus edge set and ID-to-owner mapping, not just the analyzed
//! artefact's own methods.

use std::collections::{HashMap, HashSet};

use crate::corpus::resolver::CorpusIndex;
use crate::models::{ArtefactCoordinate, MethodId, Ranking};

/// Fraction of the corpus's distinct artefacts that call each owned target
/// method, ordered descending by the underlying distinct-dependent count
/// (ties by ascending MethodId).
///
/// Self-calls (caller owned by the target artefact itself) are not
/// dependents. Callers with no known owning coordinate cannot be attributed
/// and are skipped.
pub fn dependent_fractions(
    edges: &[(MethodId, MethodId)],
    index: &CorpusIndex,
    target: &ArtefactCoordinate,
) -> Ranking {
    let mut dependents: HashMap<MethodId, HashSet<&ArtefactCoordinate>> = HashMap::new();

    for &(caller, callee) in edges {
        if !index.owned_ids.contains(&callee) {
            continue;
        }
        let callers = dependents.entry(callee).or_default();
        let Some(owner) = index.owner_by_id.get(&caller) else {
            continue;
        };
        if owner == target {
            continue;
        }
        callers.insert(owner);
    }

    let denominator = index.distinct_coordinates as f64;
    let mut counts: Vec<(MethodId, usize)> = dependents
        .into_iter()
        .map(|(id, callers)| (id, callers.len()))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    counts
        .into_iter()
        .map(|(id, count)| (id, count as f64 / denominator))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
