//! Load/save of the backing file.
//!
//! The file is newline-delimited JSON, one self-describing record per line tagged
//! `"type": "entity"` or `"type": "relation"`. Every operation loads the whole file,
//! and every mutation rewrites it through a temp file + rename so readers never see
//! a partial write.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{GraphError, Result};
use super::types::{self, Entity, KnowledgeGraph, Relation};

/// Handle to one backing file. Holds no graph state between calls.
#[derive(Debug, Clone)]
pub struct GraphStore {
    path: PathBuf,
}

impl GraphStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole graph. A missing file is an empty graph.
    pub fn load(&self) -> Result<KnowledgeGraph> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no backing file, starting empty");
                return Ok(KnowledgeGraph::default());
            }
            Err(e) => return Err(GraphError::io(&self.path)(e)),
        };

        let graph = decode(&contents, types::now());
        tracing::debug!(
            path = %self.path.display(),
            entities = graph.entities.len(),
            relations = graph.relations.len(),
            "graph loaded"
        );
        Ok(graph)
    }

    /// Replace the backing file with `graph`, entities first then relations.
    pub fn save(&self, graph: &KnowledgeGraph) -> Result<()> {
        let contents = encode(graph)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(GraphError::io(parent))?;
        }

        let tmp_path = self.temp_path();
        {
            let mut file = fs::File::create(&tmp_path).map_err(GraphError::io(&tmp_path))?;
            file.write_all(contents.as_bytes())
                .map_err(GraphError::io(&tmp_path))?;
            file.sync_all().map_err(GraphError::io(&tmp_path))?;
        }

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(GraphError::io(&self.path)(e));
        }

        tracing::debug!(
            path = %self.path.display(),
            entities = graph.entities.len(),
            relations = graph.relations.len(),
            "graph saved"
        );
        Ok(())
    }

    /// Sibling of the backing file, so the final rename stays on one filesystem.
    /// Unique per write so concurrent savers never share a temp file.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "memory".into());
        name.push(format!(".{}.{}.tmp", std::process::id(), types::new_uuid()));
        self.path.with_file_name(name)
    }
}

/// Outgoing record: the tag plus the record's fields, flattened.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Record<'a> {
    Entity(&'a Entity),
    Relation(&'a Relation),
}

/// Incoming entity line. Identity and timestamps are optional for legacy data.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntity {
    uuid: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
    name: String,
    entity_type: String,
    /// Absent or `null` in older files.
    #[serde(default)]
    observations: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRelation {
    uuid: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
    from: String,
    to: String,
    relation_type: String,
}

/// Identity and timestamps after backfilling whatever the stored line lacked.
struct Metadata {
    uuid: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    backfilled: bool,
}

fn backfill(
    uuid: Option<String>,
    created_at: Option<&str>,
    updated_at: Option<&str>,
    now: DateTime<Utc>,
) -> Metadata {
    let parsed_uuid = uuid.filter(|u| !u.is_empty());
    let parsed_created = created_at.and_then(types::parse_timestamp);
    let parsed_updated = updated_at.and_then(types::parse_timestamp);
    let backfilled =
        parsed_uuid.is_none() || parsed_created.is_none() || parsed_updated.is_none();

    let created_at = parsed_created.unwrap_or(now);
    let updated_at = parsed_updated.unwrap_or(now).max(created_at);
    Metadata {
        uuid: parsed_uuid.unwrap_or_else(types::new_uuid),
        created_at,
        updated_at,
        backfilled,
    }
}

/// Parse the file contents, skipping blank lines, unknown tags, and malformed lines.
pub(crate) fn decode(contents: &str, now: DateTime<Utc>) -> KnowledgeGraph {
    let mut graph = KnowledgeGraph::default();
    let mut backfilled = 0usize;

    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: serde_json::Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(line = idx + 1, error = %e, "skipping malformed line");
                continue;
            }
        };

        let tag = value
            .get("type")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_owned();
        match tag.as_str() {
            "entity" => match serde_json::from_value::<StoredEntity>(value) {
                Ok(stored) => {
                    let meta = backfill(
                        stored.uuid,
                        stored.created_at.as_deref(),
                        stored.updated_at.as_deref(),
                        now,
                    );
                    backfilled += usize::from(meta.backfilled);
                    graph.entities.push(Entity {
                        uuid: meta.uuid,
                        created_at: meta.created_at,
                        updated_at: meta.updated_at,
                        name: stored.name,
                        entity_type: stored.entity_type,
                        observations: stored.observations.unwrap_or_default(),
                    });
                }
                Err(e) => tracing::warn!(line = idx + 1, error = %e, "skipping malformed entity"),
            },
            "relation" => match serde_json::from_value::<StoredRelation>(value) {
                Ok(stored) => {
                    let meta = backfill(
                        stored.uuid,
                        stored.created_at.as_deref(),
                        stored.updated_at.as_deref(),
                        now,
                    );
                    backfilled += usize::from(meta.backfilled);
                    graph.relations.push(Relation {
                        uuid: meta.uuid,
                        created_at: meta.created_at,
                        updated_at: meta.updated_at,
                        from: stored.from,
                        to: stored.to,
                        relation_type: stored.relation_type,
                    });
                }
                Err(e) => {
                    tracing::warn!(line = idx + 1, error = %e, "skipping malformed relation")
                }
            },
            other => tracing::debug!(line = idx + 1, tag = other, "dropping record with unknown type"),
        }
    }

    if backfilled > 0 {
        tracing::warn!(
            count = backfilled,
            "backfilled identity/timestamps on legacy records; they persist on next save"
        );
    }
    graph
}

/// One JSON object per line, entities then relations.
pub(crate) fn encode(graph: &KnowledgeGraph) -> Result<String> {
    let mut out = String::new();
    for entity in &graph.entities {
        out.push_str(&serde_json::to_string(&Record::Entity(entity))?);
        out.push('\n');
    }
    for relation in &graph.relations {
        out.push_str(&serde_json::to_string(&Record::Relation(relation))?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::{NewEntity, RelationTriple};

    fn sample_graph() -> KnowledgeGraph {
        let now = types::now();
        KnowledgeGraph {
            entities: vec![Entity::new(
                NewEntity {
                    name: "John".into(),
                    entity_type: "person".into(),
                    observations: vec!["speaks Dutch".into()],
                },
                now,
            )],
            relations: vec![Relation::new(
                RelationTriple {
                    from: "John".into(),
                    to: "Acme".into(),
                    relation_type: "works_at".into(),
                },
                now,
            )],
        }
    }

    #[test]
    fn encode_tags_and_flattens_records() {
        let encoded = encode(&sample_graph()).unwrap();
        let lines: Vec<&str> = encoded.lines().collect();
        assert_eq!(lines.len(), 2);

        let entity: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(entity["type"], "entity");
        assert_eq!(entity["name"], "John");
        assert_eq!(entity["entityType"], "person");

        let relation: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(relation["type"], "relation");
        assert_eq!(relation["relationType"], "works_at");
    }

    #[test]
    fn decode_inverts_encode() {
        let graph = sample_graph();
        let decoded = decode(&encode(&graph).unwrap(), types::now());
        assert_eq!(decoded, graph);
    }

    #[test]
    fn decode_skips_blank_malformed_and_unknown_lines() {
        let contents = concat!(
            "\n",
            "{\"type\":\"entity\",\"name\":\"A\",\"entityType\":\"t\",\"observations\":[]}\n",
            "not json at all\n",
            "   \n",
            "{\"type\":\"widget\",\"name\":\"W\"}\n",
            "{\"type\":\"entity\",\"entityType\":\"missing name\"}\n",
            "{\"type\":\"relation\",\"from\":\"A\",\"to\":\"B\",\"relationType\":\"knows\"}",
        );
        let graph = decode(contents, types::now());
        assert_eq!(graph.entities.len(), 1);
        assert_eq!(graph.entities[0].name, "A");
        assert_eq!(graph.relations.len(), 1);
    }

    #[test]
    fn decode_backfills_legacy_records() {
        let now = types::now();
        let contents = "{\"type\":\"entity\",\"name\":\"A\",\"entityType\":\"t\"}\n";
        let graph = decode(contents, now);
        let entity = &graph.entities[0];
        assert!(!entity.uuid.is_empty());
        assert_eq!(entity.created_at, now);
        assert_eq!(entity.updated_at, now);
        assert!(entity.observations.is_empty());
    }

    #[test]
    fn decode_clamps_updated_before_created() {
        let contents = concat!(
            "{\"type\":\"relation\",\"uuid\":\"r1\",",
            "\"createdAt\":\"2024-05-02T00:00:00.000Z\",\"updatedAt\":\"2024-05-01T00:00:00.000Z\",",
            "\"from\":\"A\",\"to\":\"B\",\"relationType\":\"knows\"}\n",
        );
        let graph = decode(contents, types::now());
        let relation = &graph.relations[0];
        assert_eq!(relation.uuid, "r1");
        assert_eq!(relation.updated_at, relation.created_at);
    }

    #[test]
    fn decode_treats_null_observations_as_empty() {
        let contents =
            "{\"type\":\"entity\",\"name\":\"A\",\"entityType\":\"t\",\"observations\":null}\n";
        let graph = decode(contents, types::now());
        assert_eq!(graph.entities.len(), 1);
        assert_eq!(graph.entities[0].name, "A");
        assert!(graph.entities[0].observations.is_empty());
    }

    #[test]
    fn temp_paths_are_unique_siblings() {
        let store = GraphStore::new("/var/data/memory.jsonl");
        let first = store.temp_path();
        let second = store.temp_path();
        assert_ne!(first, second);
        assert_eq!(first.parent(), store.path().parent());
        let name = first.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("memory.jsonl."));
        assert!(name.ends_with(".tmp"));
    }

    #[test]
    fn empty_graph_encodes_to_empty_string() {
        assert_eq!(encode(&KnowledgeGraph::default()).unwrap(), "");
    }
}
