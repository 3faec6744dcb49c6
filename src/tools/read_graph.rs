//! MCP `read_graph` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::graph::{self, GraphFilter};

/// Parameters for the `read_graph` MCP tool. Every filter is optional and
/// filters are AND-combined.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadGraphParams {
    #[schemars(description = "Only entities whose entityType is in this list")]
    pub entity_types: Option<Vec<String>>,

    #[schemars(description = "Only relations whose relationType is in this list")]
    pub relation_types: Option<Vec<String>>,

    #[schemars(
        description = "Case-insensitive substring matched against entity name/type/observations and relation from/to/type"
    )]
    pub search_text: Option<String>,

    #[schemars(description = "Inclusive lower bound on updatedAt (RFC 3339 or YYYY-MM-DD)")]
    pub from_date: Option<String>,

    #[schemars(description = "Inclusive upper bound on updatedAt (RFC 3339 or YYYY-MM-DD)")]
    pub to_date: Option<String>,

    #[schemars(description = "Number of entities and relations to skip. Defaults to 0.")]
    pub offset: Option<usize>,

    #[schemars(description = "Maximum number of entities and of relations to return")]
    pub limit: Option<usize>,
}

impl ReadGraphParams {
    /// Build the store filter, parsing the date bounds.
    pub fn filter(&self) -> graph::Result<GraphFilter> {
        Ok(GraphFilter {
            entity_types: self.entity_types.clone(),
            relation_types: self.relation_types.clone(),
            search_text: self.search_text.clone(),
            from_date: self.from_date.as_deref().map(graph::parse_date).transpose()?,
            to_date: self.to_date.as_deref().map(graph::parse_date).transpose()?,
        })
    }
}
