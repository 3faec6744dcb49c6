//! The graph store: entities, relations, and observations persisted to one
//! newline-delimited JSON file.
//!
//! Every public operation on [`GraphStore`] loads the whole file, works on the
//! in-memory [`KnowledgeGraph`], and (for mutations) writes it back before
//! returning. No graph state survives between calls.

pub mod entities;
pub mod error;
pub mod observations;
pub mod relations;
pub mod search;
pub mod stats;
pub mod store;
pub mod traversal;
pub mod types;

pub use error::{GraphError, Result};
pub use search::{parse_date, GraphFilter, Pagination};
pub use store::GraphStore;
pub use types::{
    AddedObservations, Entity, GraphPage, GraphStats, KnowledgeGraph, NewEntity,
    ObservationAddition, ObservationDeletion, Relation, RelationTriple, TypeSummary,
};
