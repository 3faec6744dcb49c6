//! Observation mutation on existing entities.

use super::error::{GraphError, Result};
use super::store::GraphStore;
use super::types::{self, AddedObservations, ObservationAddition, ObservationDeletion};

impl GraphStore {
    /// Append observations to existing entities.
    ///
    /// Fails with [`GraphError::EntityNotFound`] if any named entity is missing, in
    /// which case nothing is written. Exact duplicates (of stored observations or of
    /// earlier input) are skipped; `updatedAt` moves only for entities that actually
    /// gained an observation.
    pub fn add_observations(
        &self,
        additions: Vec<ObservationAddition>,
    ) -> Result<Vec<AddedObservations>> {
        let mut graph = self.load()?;
        let now = types::now();
        let mut results = Vec::with_capacity(additions.len());

        for addition in additions {
            let entity = graph
                .entities
                .iter_mut()
                .find(|e| e.name == addition.entity_name)
                .ok_or_else(|| GraphError::EntityNotFound(addition.entity_name.clone()))?;

            let mut added = Vec::new();
            for content in addition.contents {
                if !entity.observations.contains(&content) {
                    entity.observations.push(content.clone());
                    added.push(content);
                }
            }
            if !added.is_empty() {
                entity.touch(now);
            }

            results.push(AddedObservations {
                entity_name: addition.entity_name,
                added_observations: added,
            });
        }

        self.save(&graph)?;

        tracing::info!(
            entities = results.len(),
            added = results.iter().map(|r| r.added_observations.len()).sum::<usize>(),
            "observations added"
        );
        Ok(results)
    }

    /// Remove observations by exact match. Missing entities are skipped.
    pub fn delete_observations(&self, deletions: Vec<ObservationDeletion>) -> Result<()> {
        let mut graph = self.load()?;
        let now = types::now();
        let mut removed = 0usize;

        for deletion in deletions {
            let Some(entity) = graph
                .entities
                .iter_mut()
                .find(|e| e.name == deletion.entity_name)
            else {
                continue;
            };

            let before = entity.observations.len();
            entity
                .observations
                .retain(|o| !deletion.observations.contains(o));
            let after = entity.observations.len();
            if after < before {
                entity.touch(now);
                removed += before - after;
            }
        }

        self.save(&graph)?;

        tracing::info!(removed, "observations deleted");
        Ok(())
    }
}
