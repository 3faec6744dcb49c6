mod helpers;

use helpers::{chain_store, entity, entity_names, relation, test_store};
use memgraph::graph::{parse_date, GraphFilter, Pagination};

#[test]
fn related_nodes_respects_depth() {
    let (_dir, store) = chain_store();

    let zero = store.get_related_nodes("A", 0).unwrap();
    assert_eq!(entity_names(&zero.entities), vec!["A"]);
    assert!(zero.relations.is_empty());

    let one = store.get_related_nodes("A", 1).unwrap();
    assert_eq!(entity_names(&one.entities), vec!["A", "B"]);
    assert_eq!(one.relations.len(), 1);
    assert_eq!(one.relations[0].key(), ("A", "B", "next"));

    let two = store.get_related_nodes("A", 2).unwrap();
    assert_eq!(entity_names(&two.entities), vec!["A", "B", "C"]);
    assert_eq!(two.relations.len(), 2);
}

#[test]
fn related_nodes_at_depth_zero_skips_self_loops() {
    let (_dir, store) = test_store();
    store.create_entities(vec![entity("A", "node", &[])]).unwrap();
    store.create_relations(vec![relation("A", "A", "self")]).unwrap();

    let zero = store.get_related_nodes("A", 0).unwrap();
    assert_eq!(entity_names(&zero.entities), vec!["A"]);
    assert!(zero.relations.is_empty());

    let one = store.get_related_nodes("A", 1).unwrap();
    assert_eq!(one.relations.len(), 1);
}

#[test]
fn search_includes_relations_between_matched_entities_only() {
    let (_dir, store) = test_store();
    store
        .create_entities(vec![
            entity("X", "engineer", &[]),
            entity("Y", "engineer", &[]),
            entity("Z", "chef", &[]),
        ])
        .unwrap();
    store
        .create_relations(vec![relation("X", "Y", "knows"), relation("Z", "X", "knows")])
        .unwrap();

    let page = store.search_nodes("ENGINEER", Pagination::default()).unwrap();
    assert_eq!(entity_names(&page.entities), vec!["X", "Y"]);
    assert_eq!(page.relations.len(), 1);
    assert_eq!(page.relations[0].key(), ("X", "Y", "knows"));
}

#[test]
fn search_with_no_match_is_empty() {
    let (_dir, store) = chain_store();
    let page = store.search_nodes("nothing here", Pagination::default()).unwrap();
    assert!(page.entities.is_empty());
    assert!(page.relations.is_empty());
    assert_eq!(page.total, 0);
    assert!(!page.has_more);
}

#[test]
fn read_graph_filters_by_type_and_date() {
    let (_dir, store) = test_store();
    store
        .create_entities(vec![
            entity("Alice", "person", &["writes Rust"]),
            entity("Acme", "company", &[]),
        ])
        .unwrap();
    store
        .create_relations(vec![
            relation("Alice", "Acme", "works_at"),
            relation("Alice", "Bob", "knows"),
        ])
        .unwrap();

    let filter = GraphFilter {
        entity_types: Some(vec!["person".into()]),
        relation_types: Some(vec!["works_at".into()]),
        ..Default::default()
    };
    let page = store.read_graph(&filter, Pagination::default()).unwrap();
    assert_eq!(entity_names(&page.entities), vec!["Alice"]);
    assert_eq!(page.relations.len(), 1);
    assert_eq!(page.total, 1);

    let future = GraphFilter {
        from_date: Some(parse_date("2999-01-01").unwrap()),
        ..Default::default()
    };
    let page = store.read_graph(&future, Pagination::default()).unwrap();
    assert!(page.entities.is_empty());
    assert!(page.relations.is_empty());
}

#[test]
fn read_graph_pagination_reports_more() {
    let (_dir, store) = test_store();
    store
        .create_entities((0..5).map(|i| entity(&format!("E{i}"), "t", &[])).collect())
        .unwrap();
    store.create_relations(vec![relation("E0", "E1", "r")]).unwrap();

    let page = store
        .read_graph(
            &GraphFilter::default(),
            Pagination {
                offset: 0,
                limit: Some(2),
            },
        )
        .unwrap();
    assert_eq!(page.entities.len(), 2);
    assert_eq!(page.relations.len(), 1);
    assert_eq!(page.total, 5);
    assert!(page.has_more);

    let last = store
        .read_graph(
            &GraphFilter::default(),
            Pagination {
                offset: 4,
                limit: Some(2),
            },
        )
        .unwrap();
    assert_eq!(last.entities.len(), 1);
    assert!(last.relations.is_empty());
    assert!(!last.has_more);
}

#[test]
fn open_nodes_returns_relations_among_requested() {
    let (_dir, store) = chain_store();
    let graph = store
        .open_nodes(&["A".to_string(), "B".to_string(), "Nobody".to_string()])
        .unwrap();
    assert_eq!(entity_names(&graph.entities), vec!["A", "B"]);
    assert_eq!(graph.relations.len(), 1);
    assert_eq!(graph.relations[0].key(), ("A", "B", "next"));
}

#[test]
fn stats_count_observations() {
    let (_dir, store) = test_store();
    store
        .create_entities(vec![
            entity("A", "person", &["one", "two"]),
            entity("B", "company", &["three"]),
        ])
        .unwrap();
    store.create_relations(vec![relation("A", "B", "works_at")]).unwrap();

    let stats = store.get_graph_stats().unwrap();
    assert_eq!(stats.entity_count, 2);
    assert_eq!(stats.relation_count, 1);
    assert_eq!(stats.observation_count, 3);
    assert_eq!(stats.entity_type_count, 2);
    assert_ne!(stats.last_updated, "N/A");

    let types = store.entity_types().unwrap();
    let labels: Vec<&str> = types.iter().map(|t| t.type_name.as_str()).collect();
    assert_eq!(labels, vec!["company", "person"]);
}

#[test]
fn stats_on_empty_graph() {
    let (_dir, store) = test_store();
    let stats = store.get_graph_stats().unwrap();
    assert_eq!(stats.entity_count, 0);
    assert_eq!(stats.last_updated, "N/A");
    assert!(store.relation_types().unwrap().is_empty());
}
