use anyhow::Result;

use crate::config::MemgraphConfig;

/// Print the named entities and the relations among them.
pub fn inspect(config: &MemgraphConfig, names: &[String]) -> Result<()> {
    let store = super::open_store(config)?;
    let graph = store.open_nodes(names)?;

    for name in names {
        if graph.entity(name).is_none() {
            eprintln!("Entity not found: {name}");
        }
    }

    super::print_graph(&graph.entities, &graph.relations);
    Ok(())
}
