use anyhow::{ensure, Result};

use crate::config::MemgraphConfig;
use crate::graph::Pagination;

/// Search the graph and print matching entities and relations.
pub fn search(config: &MemgraphConfig, query: &str, limit: Option<usize>) -> Result<()> {
    ensure!(!query.trim().is_empty(), "query must not be empty");

    let store = super::open_store(config)?;
    let page = store.search_nodes(
        query,
        Pagination {
            offset: 0,
            limit: limit.or(config.query.default_limit),
        },
    )?;

    super::print_graph(&page.entities, &page.relations);
    if page.has_more {
        println!();
        println!("({} total matches, showing first page)", page.total);
    }
    Ok(())
}
