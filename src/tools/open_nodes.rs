use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct OpenNodesParams {
    #[schemars(description = "Entity names to retrieve")]
    pub names: Vec<String>,
}
