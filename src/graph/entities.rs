//! Entity creation and cascading deletion.

use std::collections::HashSet;

use super::error::Result;
use super::store::GraphStore;
use super::types::{self, Entity, NewEntity};

impl GraphStore {
    /// Create every candidate whose name is not already taken.
    ///
    /// Names already in the graph, or repeated earlier in the same batch, are
    /// silently skipped. All records created in one call share one timestamp.
    /// Returns only the newly created entities; the file is untouched when that
    /// list is empty.
    pub fn create_entities(&self, candidates: Vec<NewEntity>) -> Result<Vec<Entity>> {
        let mut graph = self.load()?;
        let requested = candidates.len();

        let mut taken: HashSet<String> = graph.entities.iter().map(|e| e.name.clone()).collect();
        let now = types::now();
        let created: Vec<Entity> = candidates
            .into_iter()
            .filter(|c| taken.insert(c.name.clone()))
            .map(|c| Entity::new(c, now))
            .collect();

        if created.is_empty() {
            tracing::debug!(requested, "create_entities: all candidates already exist");
            return Ok(created);
        }

        graph.entities.extend(created.iter().cloned());
        self.save(&graph)?;

        tracing::info!(
            requested,
            created = created.len(),
            "entities created"
        );
        Ok(created)
    }

    /// Delete entities by name, along with every relation touching them.
    ///
    /// Unknown names are ignored. Always rewrites the file.
    pub fn delete_entities(&self, names: &[String]) -> Result<()> {
        let mut graph = self.load()?;
        let doomed: HashSet<&str> = names.iter().map(String::as_str).collect();

        let entities_before = graph.entities.len();
        let relations_before = graph.relations.len();
        graph.entities.retain(|e| !doomed.contains(e.name.as_str()));
        graph
            .relations
            .retain(|r| !doomed.contains(r.from.as_str()) && !doomed.contains(r.to.as_str()));

        self.save(&graph)?;

        tracing::info!(
            entities = entities_before - graph.entities.len(),
            relations = relations_before - graph.relations.len(),
            "entities deleted"
        );
        Ok(())
    }
}
