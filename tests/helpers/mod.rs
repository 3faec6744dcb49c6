#![allow(dead_code)]

use memgraph::graph::{GraphStore, NewEntity, RelationTriple};
use tempfile::TempDir;

/// A store backed by `memory.jsonl` inside a fresh temp dir. Keep the `TempDir`
/// alive for the duration of the test.
pub fn test_store() -> (TempDir, GraphStore) {
    let dir = TempDir::new().unwrap();
    let store = GraphStore::new(dir.path().join("memory.jsonl"));
    (dir, store)
}

pub fn entity(name: &str, entity_type: &str, observations: &[&str]) -> NewEntity {
    NewEntity {
        name: name.to_string(),
        entity_type: entity_type.to_string(),
        observations: observations.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn relation(from: &str, to: &str, relation_type: &str) -> RelationTriple {
    RelationTriple {
        from: from.to_string(),
        to: to.to_string(),
        relation_type: relation_type.to_string(),
    }
}

/// Sorted entity names, for order-insensitive assertions.
pub fn entity_names(entities: &[memgraph::graph::Entity]) -> Vec<String> {
    let mut names: Vec<String> = entities.iter().map(|e| e.name.clone()).collect();
    names.sort();
    names
}

/// Build the linear chain `A -> B -> C`.
pub fn chain_store() -> (TempDir, GraphStore) {
    let (dir, store) = test_store();
    store
        .create_entities(vec![
            entity("A", "node", &[]),
            entity("B", "node", &[]),
            entity("C", "node", &[]),
        ])
        .unwrap();
    store
        .create_relations(vec![relation("A", "B", "next"), relation("B", "C", "next")])
        .unwrap();
    (dir, store)
}
