//! MCP `create_entities` / `delete_entities` tool parameter definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::graph::NewEntity;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateEntitiesParams {
    #[schemars(description = "Entities to create. Names that already exist are skipped.")]
    pub entities: Vec<NewEntity>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEntitiesParams {
    #[schemars(description = "Names of entities to delete. Relations touching them are deleted too.")]
    pub entity_names: Vec<String>,
}
