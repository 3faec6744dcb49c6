//! Relation creation and deletion.
//!
//! Relations are unique on the ordered `(from, to, relationType)` triple and are
//! never updated in place. Endpoints are entity names and are not required to exist.

use std::collections::HashSet;

use super::error::Result;
use super::store::GraphStore;
use super::types::{self, Relation, RelationTriple};

impl GraphStore {
    /// Create every relation whose triple is not already present.
    ///
    /// Same contract as [`GraphStore::create_entities`]: duplicates are omitted
    /// from the result, one shared timestamp per call, no write when nothing is new.
    pub fn create_relations(&self, candidates: Vec<RelationTriple>) -> Result<Vec<Relation>> {
        let mut graph = self.load()?;
        let requested = candidates.len();

        let mut taken: HashSet<(String, String, String)> = graph
            .relations
            .iter()
            .map(|r| (r.from.clone(), r.to.clone(), r.relation_type.clone()))
            .collect();
        let now = types::now();
        let created: Vec<Relation> = candidates
            .into_iter()
            .filter(|c| taken.insert((c.from.clone(), c.to.clone(), c.relation_type.clone())))
            .map(|c| Relation::new(c, now))
            .collect();

        if created.is_empty() {
            tracing::debug!(requested, "create_relations: all candidates already exist");
            return Ok(created);
        }

        graph.relations.extend(created.iter().cloned());
        self.save(&graph)?;

        tracing::info!(requested, created = created.len(), "relations created");
        Ok(created)
    }

    /// Delete every relation matching one of `triples`. Non-matching input is
    /// ignored. Always rewrites the file.
    pub fn delete_relations(&self, triples: &[RelationTriple]) -> Result<()> {
        let mut graph = self.load()?;
        let doomed: HashSet<(&str, &str, &str)> = triples.iter().map(|t| t.key()).collect();

        let before = graph.relations.len();
        graph.relations.retain(|r| !doomed.contains(&r.key()));

        self.save(&graph)?;

        tracing::info!(relations = before - graph.relations.len(), "relations deleted");
        Ok(())
    }
}
