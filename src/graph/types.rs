//! Core graph type definitions.
//!
//! Defines [`Entity`] (a named node with observations), [`Relation`] (a typed
//! directed edge between entity names), [`KnowledgeGraph`] (the aggregate held in
//! memory for one operation), and the input/result shapes the store operations use.

use chrono::{DateTime, SubsecRound, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Current time truncated to millisecond precision.
///
/// The backing file stores millisecond timestamps, so generated timestamps are
/// truncated up front to keep an in-memory record equal to its reloaded form.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Fresh time-sortable identity for a new record.
pub fn new_uuid() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// RFC 3339 with millisecond precision and a `Z` suffix.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Serde adapter writing timestamps the way the backing file stores them.
pub(crate) mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

/// A named node. `name` is the unique key; `uuid` and timestamps are metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub uuid: String,
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso8601")]
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub entity_type: String,
    pub observations: Vec<String>,
}

impl Entity {
    /// Build a stored entity from a create request. Repeated observations in the
    /// request are kept once, first occurrence wins.
    pub fn new(input: NewEntity, now: DateTime<Utc>) -> Self {
        let mut observations: Vec<String> = Vec::with_capacity(input.observations.len());
        for obs in input.observations {
            if !observations.contains(&obs) {
                observations.push(obs);
            }
        }
        Self {
            uuid: new_uuid(),
            created_at: now,
            updated_at: now,
            name: input.name,
            entity_type: input.entity_type,
            observations,
        }
    }

    /// Refresh `updatedAt`, never moving it backwards.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.updated_at {
            self.updated_at = now;
        }
    }
}

/// A typed directed edge between two entity names. Endpoints may dangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub uuid: String,
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso8601")]
    pub updated_at: DateTime<Utc>,
    pub from: String,
    pub to: String,
    pub relation_type: String,
}

impl Relation {
    pub fn new(input: RelationTriple, now: DateTime<Utc>) -> Self {
        Self {
            uuid: new_uuid(),
            created_at: now,
            updated_at: now,
            from: input.from,
            to: input.to,
            relation_type: input.relation_type,
        }
    }

    /// Uniqueness key: the ordered `(from, to, relationType)` triple.
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.from, &self.to, &self.relation_type)
    }

    /// `true` if `name` is either endpoint.
    pub fn touches(&self, name: &str) -> bool {
        self.from == name || self.to == name
    }
}

/// The whole graph: every entity and every relation in the backing file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
}

impl KnowledgeGraph {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relations.is_empty()
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }
}

/// Candidate entity for `create_entities`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewEntity {
    #[schemars(description = "Unique name of the entity")]
    pub name: String,

    #[schemars(description = "Type label of the entity (e.g. 'person', 'project')")]
    pub entity_type: String,

    #[schemars(description = "Initial observations about the entity")]
    #[serde(default)]
    pub observations: Vec<String>,
}

/// A `(from, to, relationType)` triple, used both to create and to delete relations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationTriple {
    #[schemars(description = "Name of the source entity")]
    pub from: String,

    #[schemars(description = "Name of the target entity")]
    pub to: String,

    #[schemars(description = "Relation label in active voice (e.g. 'works_at')")]
    pub relation_type: String,
}

impl RelationTriple {
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.from, &self.to, &self.relation_type)
    }
}

/// Observations to append to one entity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObservationAddition {
    #[schemars(description = "Name of the entity to add observations to")]
    pub entity_name: String,

    #[schemars(description = "Observation strings to add")]
    pub contents: Vec<String>,
}

/// Observations to remove from one entity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObservationDeletion {
    #[schemars(description = "Name of the entity to remove observations from")]
    pub entity_name: String,

    #[schemars(description = "Observation strings to remove (exact match)")]
    pub observations: Vec<String>,
}

/// Per-entity result of `add_observations`: only what was actually appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedObservations {
    pub entity_name: String,
    pub added_observations: Vec<String>,
}

/// One page of a filtered or searched graph.
///
/// Entities and relations share the same `offset`/`limit` window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphPage {
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
    /// `max(filtered entities, filtered relations)`.
    pub total: usize,
    pub offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    pub has_more: bool,
}

/// Aggregate counts over the whole graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub entity_count: usize,
    pub relation_count: usize,
    pub observation_count: usize,
    pub entity_type_count: usize,
    pub relation_type_count: usize,
    /// Latest `updatedAt` across entities and relations, or `"N/A"` when empty.
    pub last_updated: String,
}

/// How many records carry one type label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSummary {
    #[serde(rename = "type")]
    pub type_name: String,
    pub count: usize,
}
