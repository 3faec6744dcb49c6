use anyhow::Result;

use crate::config::MemgraphConfig;

/// Print everything within `depth` hops of `name`.
pub fn related(config: &MemgraphConfig, name: &str, depth: usize) -> Result<()> {
    let store = super::open_store(config)?;
    let depth = depth.min(config.query.max_depth);
    let graph = store.get_related_nodes(name, depth)?;

    println!("Within {depth} hop(s) of {name}:");
    println!();
    super::print_graph(&graph.entities, &graph.relations);
    Ok(())
}
