use std::collections::BTreeMap;

use super::error::Result;
use super::store::GraphStore;
use super::types::{self, GraphStats, KnowledgeGraph, TypeSummary};

/// Aggregate counts and the latest `updatedAt` across all records.
pub(crate) fn graph_stats(graph: &KnowledgeGraph) -> GraphStats {
    let last_updated = graph
        .entities
        .iter()
        .map(|e| e.updated_at)
        .chain(graph.relations.iter().map(|r| r.updated_at))
        .max();

    GraphStats {
        entity_count: graph.entities.len(),
        relation_count: graph.relations.len(),
        observation_count: graph.entities.iter().map(|e| e.observations.len()).sum(),
        entity_type_count: count_types(graph.entities.iter().map(|e| e.entity_type.as_str())).len(),
        relation_type_count: count_types(graph.relations.iter().map(|r| r.relation_type.as_str()))
            .len(),
        last_updated: last_updated
            .map(|ts| types::format_timestamp(&ts))
            .unwrap_or_else(|| "N/A".to_string()),
    }
}

fn count_types<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<TypeSummary> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(type_name, count)| TypeSummary {
            type_name: type_name.to_string(),
            count,
        })
        .collect()
}

impl GraphStore {
    pub fn get_graph_stats(&self) -> Result<GraphStats> {
        let graph = self.load()?;
        Ok(graph_stats(&graph))
    }

    /// Distinct entity types with their entity counts, sorted by type.
    pub fn entity_types(&self) -> Result<Vec<TypeSummary>> {
        let graph = self.load()?;
        Ok(count_types(graph.entities.iter().map(|e| e.entity_type.as_str())))
    }

    /// Distinct relation types with their relation counts, sorted by type.
    pub fn relation_types(&self) -> Result<Vec<TypeSummary>> {
        let graph = self.load()?;
        Ok(count_types(graph.relations.iter().map(|r| r.relation_type.as_str())))
    }
}
