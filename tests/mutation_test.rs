mod helpers;

use helpers::{entity, entity_names, relation, test_store};
use memgraph::graph::{GraphError, ObservationAddition, ObservationDeletion};

#[test]
fn creating_same_entity_twice_stores_one() {
    let (_dir, store) = test_store();

    let first = store.create_entities(vec![entity("John", "person", &[])]).unwrap();
    assert_eq!(first.len(), 1);

    let second = store.create_entities(vec![entity("John", "person", &["new"])]).unwrap();
    assert!(second.is_empty());

    let graph = store.load().unwrap();
    assert_eq!(graph.entities.len(), 1);
    assert!(graph.entities[0].observations.is_empty());
}

#[test]
fn partial_batch_returns_only_new_records() {
    let (_dir, store) = test_store();
    store.create_entities(vec![entity("A", "t", &[])]).unwrap();

    let created = store
        .create_entities(vec![entity("A", "t", &[]), entity("B", "t", &[])])
        .unwrap();
    assert_eq!(entity_names(&created), vec!["B"]);
}

#[test]
fn deleting_entity_cascades_to_its_relations() {
    let (_dir, store) = test_store();
    store
        .create_entities(vec![entity("A", "t", &[]), entity("B", "t", &[])])
        .unwrap();
    store.create_relations(vec![relation("A", "B", "knows")]).unwrap();

    store.delete_entities(&["A".to_string()]).unwrap();

    let graph = store.load().unwrap();
    assert_eq!(entity_names(&graph.entities), vec!["B"]);
    assert!(graph.relations.is_empty());
}

#[test]
fn adding_same_observation_twice_is_idempotent() {
    let (_dir, store) = test_store();
    store.create_entities(vec![entity("John", "person", &[])]).unwrap();

    let add = || {
        store.add_observations(vec![ObservationAddition {
            entity_name: "John".into(),
            contents: vec!["likes tea".into()],
        }])
    };

    let first = add().unwrap();
    assert_eq!(first[0].added_observations, vec!["likes tea"]);
    let after_first = store.load().unwrap().entities[0].updated_at;

    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = add().unwrap();
    assert_eq!(second[0].entity_name, "John");
    assert!(second[0].added_observations.is_empty());

    let john = &store.load().unwrap().entities[0];
    assert_eq!(john.observations, vec!["likes tea"]);
    assert_eq!(john.updated_at, after_first);
}

#[test]
fn adding_observation_refreshes_updated_at() {
    let (_dir, store) = test_store();
    store.create_entities(vec![entity("John", "person", &[])]).unwrap();
    let created = store.load().unwrap().entities[0].clone();

    std::thread::sleep(std::time::Duration::from_millis(5));
    store
        .add_observations(vec![ObservationAddition {
            entity_name: "John".into(),
            contents: vec!["runs".into()],
        }])
        .unwrap();

    let john = &store.load().unwrap().entities[0];
    assert!(john.updated_at > created.updated_at);
    assert_eq!(john.created_at, created.created_at);
}

#[test]
fn adding_to_missing_entity_is_not_found() {
    let (_dir, store) = test_store();
    let err = store
        .add_observations(vec![ObservationAddition {
            entity_name: "Ghost".into(),
            contents: vec!["boo".into()],
        }])
        .unwrap_err();
    assert!(matches!(err, GraphError::EntityNotFound(_)));
    assert!(err.to_string().contains("Ghost"));
}

#[test]
fn deleting_observations_from_missing_entity_is_a_no_op() {
    let (_dir, store) = test_store();
    store
        .delete_observations(vec![ObservationDeletion {
            entity_name: "Ghost".into(),
            observations: vec!["boo".into()],
        }])
        .unwrap();
    assert!(store.load().unwrap().entities.is_empty());
}

#[test]
fn deleting_unknown_relation_is_a_no_op() {
    let (_dir, store) = test_store();
    store.create_relations(vec![relation("A", "B", "knows")]).unwrap();
    store
        .delete_relations(&[relation("B", "A", "knows")])
        .unwrap();
    assert_eq!(store.load().unwrap().relations.len(), 1);
}
