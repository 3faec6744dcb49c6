//! Bounded breadth-first expansion around one entity.

use std::collections::HashSet;

use super::error::Result;
use super::store::GraphStore;
use super::types::KnowledgeGraph;

/// Names reachable from `start` in at most `depth` hops, ignoring edge direction.
///
/// Dangling relation endpoints are walked like any other name. Each level scans
/// the relation list once, so the work is bounded by `depth * relations`.
pub(crate) fn reachable<'a>(graph: &'a KnowledgeGraph, start: &'a str, depth: usize) -> HashSet<&'a str> {
    let mut visited: HashSet<&str> = HashSet::from([start]);
    let mut frontier: HashSet<&str> = HashSet::from([start]);

    for _ in 0..depth {
        if frontier.is_empty() {
            break;
        }
        let mut next = HashSet::new();
        for relation in &graph.relations {
            let (from, to) = (relation.from.as_str(), relation.to.as_str());
            if frontier.contains(from) && visited.insert(to) {
                next.insert(to);
            }
            if frontier.contains(to) && visited.insert(from) {
                next.insert(from);
            }
        }
        frontier = next;
    }
    visited
}

/// Subgraph of every visited entity that exists, plus every relation whose both
/// endpoints were visited. At `depth = 0` no relation is followed, so none is
/// returned, self-loops on `start` included.
pub(crate) fn related_subgraph(graph: &KnowledgeGraph, start: &str, depth: usize) -> KnowledgeGraph {
    let visited = reachable(graph, start, depth);
    if depth == 0 {
        return KnowledgeGraph {
            entities: graph
                .entities
                .iter()
                .filter(|e| e.name == start)
                .cloned()
                .collect(),
            relations: Vec::new(),
        };
    }
    KnowledgeGraph {
        entities: graph
            .entities
            .iter()
            .filter(|e| visited.contains(e.name.as_str()))
            .cloned()
            .collect(),
        relations: graph
            .relations
            .iter()
            .filter(|r| visited.contains(r.from.as_str()) && visited.contains(r.to.as_str()))
            .cloned()
            .collect(),
    }
}

impl GraphStore {
    /// Everything within `depth` hops of `name`. `depth = 0` yields only the
    /// starting entity and no relations.
    pub fn get_related_nodes(&self, name: &str, depth: usize) -> Result<KnowledgeGraph> {
        let graph = self.load()?;
        let related = related_subgraph(&graph, name, depth);
        tracing::debug!(
            start = name,
            depth,
            entities = related.entities.len(),
            relations = related.relations.len(),
            "related nodes collected"
        );
        Ok(related)
    }
}
