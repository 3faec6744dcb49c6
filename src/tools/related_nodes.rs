//! MCP `get_related_nodes` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetRelatedNodesParams {
    #[schemars(description = "Name of the entity to start from")]
    pub entity_name: String,

    #[schemars(description = "Number of relation hops to follow in either direction. Defaults to 1.")]
    pub depth: Option<usize>,
}
