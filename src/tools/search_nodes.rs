//! MCP `search_nodes` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchNodesParams {
    #[schemars(
        description = "Case-insensitive text matched against entity names, types, and observations"
    )]
    pub query: String,

    #[schemars(description = "Number of entities and relations to skip. Defaults to 0.")]
    pub offset: Option<usize>,

    #[schemars(description = "Maximum number of entities and of relations to return")]
    pub limit: Option<usize>,
}
