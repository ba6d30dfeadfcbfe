//! Method identity resolution from fasten URI records.
//!
//! URI shards carry one record per line, `id,"fasten://mvn!group:name$version/..."`.
//! The resolver maps every referenced method ID to its owning artefact
//! coordinate and derives the ID subset owned by the artefact under
//! analysis. Ownership is substring containment of the target's canonical
//! coordinate in the URI record, the corpus's established matching rule,
//! kept behind [`uri_matches_coordinate`] so it can be hardened later
//! without touching callers.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ArtefactCoordinate, MethodId};

static URI_RECORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\d+),"?fasten://mvn!([\w.-]+:[\w.-]+\$[\w.-]+)/"#).unwrap()
});

/// Corpus-wide read-only identity data for one analysis run.
///
/// Built once per artefact unit of work and never mutated afterwards; the
/// dependent counter reads it alongside the edge set.
#[derive(Debug, Default)]
pub struct CorpusIndex {
    /// Every method referenced anywhere in the run's URI shards, mapped to
    /// its owning coordinate.
    pub owner_by_id: HashMap<MethodId, ArtefactCoordinate>,
    /// The subset of IDs owned by the artefact under analysis.
    pub owned_ids: HashSet<MethodId>,
    /// Number of distinct coordinates observed across the corpus URI data;
    /// fixed denominator for dependent percentages.
    pub distinct_coordinates: usize,
}

impl CorpusIndex {
    /// No analyzable methods: the target artefact owns no URI record.
    /// Expected for non-JVM-bytecode artefacts in mixed-ecosystem corpora,
    /// not an error.
    pub fn has_no_owned_methods(&self) -> bool {
        self.owned_ids.is_empty()
    }
}

/// The corpus's identity matching rule: a URI record belongs to a
/// coordinate iff it contains the canonical `group:name$version` token as a
/// substring. Accidental substring collisions are a known limitation of the
/// corpus format, reproduced as-is.
pub fn uri_matches_coordinate(uri_record: &str, canonical_coordinate: &str) -> bool {
    uri_record.contains(canonical_coordinate)
}

/// Resolve the concatenated URI shard text against a target artefact.
///
/// Lines that do not match the record grammar are skipped; duplicate records
/// across shards are idempotent. Pure transformation, no side effects.
pub fn resolve(uri_text: &str, target: &ArtefactCoordinate) -> CorpusIndex {
    let target_token = target.canonical();
    let mut index = CorpusIndex::default();
    let mut coordinates: HashSet<ArtefactCoordinate> = HashSet::new();

    for line in uri_text.lines() {
        let Some(caps) = URI_RECORD_RE.captures(line) else {
            continue;
        };
        let Ok(id) = caps[1].parse::<MethodId>() else {
            continue;
        };
        let Some(owner) = ArtefactCoordinate::parse_token(&caps[2]) else {
            continue;
        };

        if uri_matches_coordinate(line, &target_token) {
            index.owned_ids.insert(id);
        }
        coordinates.insert(owner.clone());
        index.owner_by_id.insert(id, owner);
    }

    index.distinct_coordinates = coordinates.len();
    index
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
