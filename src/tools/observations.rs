use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::graph::{ObservationAddition, ObservationDeletion};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddObservationsParams {
    #[schemars(description = "Observations to add, grouped by entity name. Every entity must exist.")]
    pub observations: Vec<ObservationAddition>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteObservationsParams {
    #[schemars(description = "Observations to remove, grouped by entity name. Unknown entities are ignored.")]
    pub deletions: Vec<ObservationDeletion>,
}
