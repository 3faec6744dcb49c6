pub mod entities;
pub mod observations;
pub mod open_nodes;
pub mod read_graph;
pub mod related_nodes;
pub mod relations;
pub mod search_nodes;

use entities::{CreateEntitiesParams, DeleteEntitiesParams};
use observations::{AddObservationsParams, DeleteObservationsParams};
use open_nodes::OpenNodesParams;
use read_graph::ReadGraphParams;
use related_nodes::GetRelatedNodesParams;
use relations::{CreateRelationsParams, DeleteRelationsParams};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use search_nodes::SearchNodesParams;
use serde::Serialize;
use std::sync::{Arc, Mutex};

use crate::config::MemgraphConfig;
use crate::graph::{self, GraphStore, Pagination};

/// The memgraph MCP tool handler. Holds the graph store and config and exposes
/// one tool per graph operation via the `#[tool_router]` macro.
///
/// The store sits behind one mutex, so tool calls run their load-modify-save
/// cycles one at a time.
#[derive(Clone)]
pub struct MemgraphTools {
    tool_router: ToolRouter<Self>,
    store: Arc<Mutex<GraphStore>>,
    config: Arc<MemgraphConfig>,
}

impl MemgraphTools {
    /// Run one store operation on the blocking pool and render its result as JSON.
    async fn run<T, F>(&self, op: &'static str, f: F) -> Result<String, String>
    where
        T: Serialize + Send + 'static,
        F: FnOnce(&GraphStore) -> graph::Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let result = tokio::task::spawn_blocking(move || {
            let store = store
                .lock()
                .map_err(|e| format!("store lock poisoned: {e}"))?;
            f(&store).map_err(|e| format!("{op} failed: {e}"))
        })
        .await
        .map_err(|e| format!("{op} task failed: {e}"))??;

        serde_json::to_string_pretty(&result).map_err(|e| format!("serialization failed: {e}"))
    }

    fn pagination(&self, offset: Option<usize>, limit: Option<usize>) -> Pagination {
        page_window(offset, limit, self.config.query.default_limit)
    }
}

/// Offset defaults to 0; a missing `limit` falls back to the configured default.
fn page_window(
    offset: Option<usize>,
    limit: Option<usize>,
    default_limit: Option<usize>,
) -> Pagination {
    Pagination {
        offset: offset.unwrap_or(0),
        limit: limit.or(default_limit),
    }
}

/// Depth defaults to one hop and never exceeds `max_depth`.
fn traversal_depth(depth: Option<usize>, max_depth: usize) -> usize {
    depth.unwrap_or(1).min(max_depth)
}

fn require_query(query: &str) -> Result<(), String> {
    if query.trim().is_empty() {
        return Err("query must not be empty".into());
    }
    Ok(())
}

fn require_names<'a>(names: impl IntoIterator<Item = &'a str>, field: &str) -> Result<(), String> {
    if names.into_iter().any(|n| n.trim().is_empty()) {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}

#[tool_router]
impl MemgraphTools {
    pub fn new(store: Arc<Mutex<GraphStore>>, config: Arc<MemgraphConfig>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            store,
            config,
        }
    }

    #[tool(description = "Create multiple new entities in the knowledge graph. Entities whose name already exists are skipped; the response lists only the entities actually created.")]
    async fn create_entities(
        &self,
        Parameters(params): Parameters<CreateEntitiesParams>,
    ) -> Result<String, String> {
        require_names(params.entities.iter().map(|e| e.name.as_str()), "entity name")?;
        require_names(
            params.entities.iter().map(|e| e.entity_type.as_str()),
            "entityType",
        )?;
        tracing::info!(count = params.entities.len(), "create_entities called");

        self.run("create_entities", move |store| {
            store.create_entities(params.entities)
        })
        .await
    }

    #[tool(description = "Create multiple new relations between entities. Relations should be in active voice. Existing (from, to, relationType) triples are skipped.")]
    async fn create_relations(
        &self,
        Parameters(params): Parameters<CreateRelationsParams>,
    ) -> Result<String, String> {
        require_names(
            params
                .relations
                .iter()
                .flat_map(|r| [r.from.as_str(), r.to.as_str(), r.relation_type.as_str()]),
            "relation from/to/relationType",
        )?;
        tracing::info!(count = params.relations.len(), "create_relations called");

        self.run("create_relations", move |store| {
            store.create_relations(params.relations)
        })
        .await
    }

    #[tool(description = "Add new observations to existing entities. Fails if an entity does not exist. Returns the observations actually added per entity.")]
    async fn add_observations(
        &self,
        Parameters(params): Parameters<AddObservationsParams>,
    ) -> Result<String, String> {
        require_names(
            params.observations.iter().map(|o| o.entity_name.as_str()),
            "entityName",
        )?;
        tracing::info!(count = params.observations.len(), "add_observations called");

        self.run("add_observations", move |store| {
            store.add_observations(params.observations)
        })
        .await
    }

    #[tool(description = "Delete entities and every relation that references them.")]
    async fn delete_entities(
        &self,
        Parameters(params): Parameters<DeleteEntitiesParams>,
    ) -> Result<String, String> {
        tracing::info!(count = params.entity_names.len(), "delete_entities called");

        self.run("delete_entities", move |store| {
            store
                .delete_entities(&params.entity_names)
                .map(|()| serde_json::json!({"status": "ok", "message": "Entities deleted successfully"}))
        })
        .await
    }

    #[tool(description = "Delete specific observations from entities. Unknown entities and observations are ignored.")]
    async fn delete_observations(
        &self,
        Parameters(params): Parameters<DeleteObservationsParams>,
    ) -> Result<String, String> {
        tracing::info!(count = params.deletions.len(), "delete_observations called");

        self.run("delete_observations", move |store| {
            store
                .delete_observations(params.deletions)
                .map(|()| serde_json::json!({"status": "ok", "message": "Observations deleted successfully"}))
        })
        .await
    }

    #[tool(description = "Delete relations matching the given (from, to, relationType) triples.")]
    async fn delete_relations(
        &self,
        Parameters(params): Parameters<DeleteRelationsParams>,
    ) -> Result<String, String> {
        tracing::info!(count = params.relations.len(), "delete_relations called");

        self.run("delete_relations", move |store| {
            store
                .delete_relations(&params.relations)
                .map(|()| serde_json::json!({"status": "ok", "message": "Relations deleted successfully"}))
        })
        .await
    }

    #[tool(description = "Read the knowledge graph with optional filters (entity/relation types, text, updatedAt date range) and pagination. Entities and relations share one offset/limit window.")]
    async fn read_graph(
        &self,
        Parameters(params): Parameters<ReadGraphParams>,
    ) -> Result<String, String> {
        let filter = params.filter().map_err(|e| e.to_string())?;
        let page = self.pagination(params.offset, params.limit);
        tracing::info!(offset = page.offset, limit = ?page.limit, "read_graph called");

        self.run("read_graph", move |store| store.read_graph(&filter, page))
            .await
    }

    #[tool(description = "Search entities by name, type, or observation text (case-insensitive). Also returns relations that match the query or connect two matching entities.")]
    async fn search_nodes(
        &self,
        Parameters(params): Parameters<SearchNodesParams>,
    ) -> Result<String, String> {
        require_query(&params.query)?;
        let page = self.pagination(params.offset, params.limit);
        tracing::info!(query = %params.query, "search_nodes called");

        self.run("search_nodes", move |store| {
            store.search_nodes(&params.query, page)
        })
        .await
    }

    #[tool(description = "Retrieve specific entities by name, with the relations between them.")]
    async fn open_nodes(
        &self,
        Parameters(params): Parameters<OpenNodesParams>,
    ) -> Result<String, String> {
        tracing::info!(count = params.names.len(), "open_nodes called");

        self.run("open_nodes", move |store| store.open_nodes(&params.names))
            .await
    }

    #[tool(description = "Get entities and relations within a number of hops of an entity, following relations in both directions.")]
    async fn get_related_nodes(
        &self,
        Parameters(params): Parameters<GetRelatedNodesParams>,
    ) -> Result<String, String> {
        require_names([params.entity_name.as_str()], "entityName")?;
        let depth = traversal_depth(params.depth, self.config.query.max_depth);
        tracing::info!(entity = %params.entity_name, depth, "get_related_nodes called");

        self.run("get_related_nodes", move |store| {
            store.get_related_nodes(&params.entity_name, depth)
        })
        .await
    }

    #[tool(description = "Get knowledge graph statistics: entity, relation, and observation counts and the last update time.")]
    async fn get_graph_stats(&self) -> Result<String, String> {
        tracing::info!("get_graph_stats called");
        self.run("get_graph_stats", |store| store.get_graph_stats())
            .await
    }

    #[tool(description = "List the distinct entity types in the graph with how many entities have each.")]
    async fn get_entity_types(&self) -> Result<String, String> {
        tracing::info!("get_entity_types called");
        self.run("get_entity_types", |store| store.entity_types())
            .await
    }

    #[tool(description = "List the distinct relation types in the graph with how many relations have each.")]
    async fn get_relation_types(&self) -> Result<String, String> {
        tracing::info!("get_relation_types called");
        self.run("get_relation_types", |store| store.relation_types())
            .await
    }
}

#[tool_handler]
impl ServerHandler for MemgraphTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "memgraph is a knowledge graph memory server. Use create_entities and \
                 create_relations to record knowledge, add_observations to extend it, and \
                 search_nodes, open_nodes, or get_related_nodes to recall it."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
