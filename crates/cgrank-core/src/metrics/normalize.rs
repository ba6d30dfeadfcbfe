//! Restriction, ordering, and min-max rescaling of metric scores.

use std::collections::{HashMap, HashSet};

use crate::models::{MethodId, Ranking};

/// Restrict full-graph scores to a reporting subset and order descending by
/// score, ties broken by ascending MethodId for determinism.
pub fn rank_descending(
    scores: &HashMap<MethodId, f64>,
    subset: &HashSet<MethodId>,
) -> Vec<(MethodId, f64)> {
    let mut ranked: Vec<(MethodId, f64)> = scores
        .iter()
        .filter(|(id, _)| subset.contains(*id))
        .map(|(&id, &score)| (id, score))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    ranked
}

/// Rescale a ranking so the maximum observed value maps to 1.0 and the
/// minimum to 0.0, preserving the established order.
///
/// Degenerate range (max == min, single-entry included): the formula's
/// denominator vanishes, so every value maps to 1.0; all entries are the
/// maximum. An empty ranking stays empty.
pub fn min_max_normalize(ranking: Vec<(MethodId, f64)>) -> Ranking {
    if ranking.is_empty() {
        return Ranking::new();
    }
    let max = ranking
        .iter()
        .map(|(_, score)| *score)
        .fold(f64::NEG_INFINITY, f64::max);
    let min = ranking
        .iter()
        .map(|(_, score)| *score)
        .fold(f64::INFINITY, f64::min);
    let range = max - min;

    ranking
        .into_iter()
        .map(|(id, score)| {
            let normalized = if range == 0.0 {
                1.0
            } else {
                (score - min) / range
            };
            (id, normalized)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(pairs: &[(MethodId, f64)]) -> Vec<(MethodId, f64)> {
        pairs.to_vec()
    }

    #[test]
    fn test_rank_descending_filters_and_sorts() {
        let scores: HashMap<MethodId, f64> =
            [(1, 0.2), (2, 0.9), (3, 0.5), (4, 0.7)].into_iter().collect();
        let subset: HashSet<MethodId> = [1, 2, 3].into_iter().collect();
        let ranked = rank_descending(&scores, &subset);
        assert_eq!(ranked, vec![(2, 0.9), (3, 0.5), (1, 0.2)]);
    }

    #[test]
    fn test_rank_descending_ties_by_ascending_id() {
        let scores: HashMap<MethodId, f64> =
            [(9, 0.5), (2, 0.5), (5, 0.5)].into_iter().collect();
        let subset: HashSet<MethodId> = [9, 2, 5].into_iter().collect();
        let ranked = rank_descending(&scores, &subset);
        assert_eq!(ranked, vec![(2, 0.5), (5, 0.5), (9, 0.5)]);
    }

    #[test]
    fn test_min_max_spans_unit_interval() {
        let normalized = min_max_normalize(ranked(&[(1, 10.0), (2, 5.0), (3, 0.0)]));
        assert_eq!(normalized[&1], 1.0);
        assert_eq!(normalized[&2], 0.5);
        assert_eq!(normalized[&3], 0.0);
    }

    #[test]
    fn test_preserves_producer_order() {
        let normalized = min_max_normalize(ranked(&[(3, 8.0), (1, 4.0), (2, 2.0)]));
        let ids: Vec<MethodId> = normalized.keys().copied().collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_degenerate_range_maps_to_one() {
        let normalized = min_max_normalize(ranked(&[(1, 1.0), (2, 1.0), (3, 1.0)]));
        for id in [1, 2, 3] {
            assert_eq!(normalized[&id], 1.0);
        }
    }

    #[test]
    fn test_single_entry_maps_to_one() {
        let normalized = min_max_normalize(ranked(&[(42, 0.123)]));
        assert_eq!(normalized[&42], 1.0);
    }

    #[test]
    fn test_empty_mapping_stays_empty() {
        assert!(min_max_normalize(Vec::new()).is_empty());
    }

    #[test]
    fn test_three_cycle_degrees_collapse_to_one() {
        // All nodes of a 3-cycle are fully central, so the whole ranking
        // degenerates to the maximum.
        use crate::corpus::graph::CallGraph;
        use crate::metrics::degree::degree_centrality;

        let graph = CallGraph::from_edges(&[(1, 2), (2, 3), (3, 1)]);
        let owned: HashSet<MethodId> = [1, 2, 3].into_iter().collect();
        let normalized = min_max_normalize(rank_descending(&degree_centrality(&graph), &owned));
        assert_eq!(normalized.len(), 3);
        for (_, score) in &normalized {
            assert_eq!(*score, 1.0);
        }
    }

    #[test]
    fn test_idempotent_on_normalized_input() {
        let once = min_max_normalize(ranked(&[(1, 3.0), (2, 2.0), (3, 1.0)]));
        let pairs: Vec<(MethodId, f64)> = once.iter().map(|(&id, &v)| (id, v)).collect();
        let twice = min_max_normalize(pairs);
        assert_eq!(once, twice);
    }
}
