pub mod export;
pub mod inspect;
pub mod related;
pub mod search;
pub mod stats;

use anyhow::Result;

use crate::config::MemgraphConfig;
use crate::graph::{Entity, GraphStore, Relation};

/// Open the store the config points at.
fn open_store(config: &MemgraphConfig) -> Result<GraphStore> {
    Ok(GraphStore::new(config.resolved_memory_path()?))
}

fn print_entity(entity: &Entity) {
    println!("{} [{}]", entity.name, entity.entity_type);
    for obs in &entity.observations {
        println!("    - {obs}");
    }
}

fn print_relation(relation: &Relation) {
    println!(
        "  {} --{}--> {}",
        relation.from, relation.relation_type, relation.to
    );
}

fn print_graph(entities: &[Entity], relations: &[Relation]) {
    println!("Entities ({}):", entities.len());
    for entity in entities {
        print!("  ");
        print_entity(entity);
    }
    println!();
    println!("Relations ({}):", relations.len());
    for relation in relations {
        print_relation(relation);
    }
}
