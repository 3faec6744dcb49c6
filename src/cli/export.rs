use anyhow::Result;

use crate::config::MemgraphConfig;

/// Export the whole graph as pretty JSON to stdout.
pub fn export(config: &MemgraphConfig) -> Result<()> {
    let store = super::open_store(config)?;
    let graph = store.load()?;

    let json = serde_json::to_string_pretty(&graph)?;
    println!("{json}");

    eprintln!(
        "Exported {} entities and {} relations.",
        graph.entities.len(),
        graph.relations.len()
    );
    Ok(())
}
