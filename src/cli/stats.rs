use anyhow::Result;

use crate::config::MemgraphConfig;

/// Display graph statistics in the terminal.
pub fn stats(config: &MemgraphConfig) -> Result<()> {
    let store = super::open_store(config)?;
    let stats = store.get_graph_stats()?;

    println!("Graph Statistics");
    println!("{}", "=".repeat(40));
    println!("  Entities:            {}", stats.entity_count);
    println!("  Relations:           {}", stats.relation_count);
    println!("  Observations:        {}", stats.observation_count);
    println!("  Last updated:        {}", stats.last_updated);
    println!();

    println!("Entity types:");
    for summary in store.entity_types()? {
        println!("  {:<20} {}", summary.type_name, summary.count);
    }
    println!();

    println!("Relation types:");
    for summary in store.relation_types()? {
        println!("  {:<20} {}", summary.type_name, summary.count);
    }
    println!();

    println!("Backing file:          {}", store.path().display());
    Ok(())
}
