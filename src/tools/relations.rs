//! MCP `create_relations` / `delete_relations` tool parameter definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::graph::RelationTriple;

/// Parameters for the `create_relations` MCP tool.
///
/// Idempotent on the (from, to, relationType) triple.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateRelationsParams {
    #[schemars(description = "Relations to create. Existing (from, to, relationType) triples are skipped.")]
    pub relations: Vec<RelationTriple>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteRelationsParams {
    #[schemars(description = "Relations to delete, matched on the full (from, to, relationType) triple")]
    pub relations: Vec<RelationTriple>,
}
