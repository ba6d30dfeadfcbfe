//! Cgrank core library: per-artefact method-importance metrics over
//! sharded call-graph corpora.
//!
//! This crate implements the full analysis pipeline: identity resolution of
//! global method IDs to owning artefact coordinates, merged call-graph
//! construction from shard fragments, degree and eigenvector centrality,
//! cross-artefact dependent counting, and min-max normalized rankings
//! persisted per artefact.

pub mod corpus;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod output;
pub mod pipeline;
