//! Read paths: filtered listing, free-text search, and lookup by name.
//!
//! Everything here is a full scan over one freshly loaded graph. Entity and
//! relation lists are filtered independently and then paginated with the same
//! `offset`/`limit` pair.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};

use super::error::{GraphError, Result};
use super::store::GraphStore;
use super::types::{self, Entity, GraphPage, KnowledgeGraph, Relation};

/// Optional clauses for [`GraphStore::read_graph`], AND-combined when present.
#[derive(Debug, Clone, Default)]
pub struct GraphFilter {
    pub entity_types: Option<Vec<String>>,
    pub relation_types: Option<Vec<String>>,
    /// Case-insensitive substring.
    pub search_text: Option<String>,
    /// Inclusive lower bound on `updatedAt`.
    pub from_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `updatedAt`.
    pub to_date: Option<DateTime<Utc>>,
}

/// Window applied to both filtered lists. `limit: None` means no limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination {
    pub offset: usize,
    pub limit: Option<usize>,
}

/// Parse a date bound: RFC 3339, or a bare `YYYY-MM-DD` meaning midnight UTC.
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Some(ts) = types::parse_timestamp(raw) {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| GraphError::InvalidDate(raw.to_string()))
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// `needle` must already be lowercase.
fn entity_matches_text(entity: &Entity, needle: &str) -> bool {
    contains_folded(&entity.name, needle)
        || contains_folded(&entity.entity_type, needle)
        || entity
            .observations
            .iter()
            .any(|o| contains_folded(o, needle))
}

/// `needle` must already be lowercase.
fn relation_matches_text(relation: &Relation, needle: &str) -> bool {
    contains_folded(&relation.from, needle)
        || contains_folded(&relation.to, needle)
        || contains_folded(&relation.relation_type, needle)
}

/// Empty type lists are treated as absent.
fn type_allowed(types: Option<&Vec<String>>, value: &str) -> bool {
    match types {
        Some(allowed) if !allowed.is_empty() => allowed.iter().any(|t| t == value),
        _ => true,
    }
}

impl GraphFilter {
    fn in_date_range(&self, updated_at: &DateTime<Utc>) -> bool {
        self.from_date.map_or(true, |from| *updated_at >= from)
            && self.to_date.map_or(true, |to| *updated_at <= to)
    }

    fn needle(&self) -> Option<String> {
        self.search_text
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    fn matches_entity(&self, entity: &Entity, needle: Option<&str>) -> bool {
        type_allowed(self.entity_types.as_ref(), &entity.entity_type)
            && needle.map_or(true, |n| entity_matches_text(entity, n))
            && self.in_date_range(&entity.updated_at)
    }

    fn matches_relation(&self, relation: &Relation, needle: Option<&str>) -> bool {
        type_allowed(self.relation_types.as_ref(), &relation.relation_type)
            && needle.map_or(true, |n| relation_matches_text(relation, n))
            && self.in_date_range(&relation.updated_at)
    }

    /// Apply every clause to a loaded graph.
    pub fn apply(&self, graph: KnowledgeGraph) -> KnowledgeGraph {
        let needle = self.needle();
        let needle = needle.as_deref();
        KnowledgeGraph {
            entities: graph
                .entities
                .into_iter()
                .filter(|e| self.matches_entity(e, needle))
                .collect(),
            relations: graph
                .relations
                .into_iter()
                .filter(|r| self.matches_relation(r, needle))
                .collect(),
        }
    }
}

impl Pagination {
    /// Cut one window out of both lists.
    ///
    /// `total` is the longer list's length; `has_more` is set when either list
    /// has elements past the window.
    pub fn apply(&self, graph: KnowledgeGraph) -> GraphPage {
        let entity_total = graph.entities.len();
        let relation_total = graph.relations.len();
        let end = self
            .limit
            .map_or(usize::MAX, |limit| self.offset.saturating_add(limit));

        let window = |len: usize| self.limit.unwrap_or(len);
        GraphPage {
            entities: graph
                .entities
                .into_iter()
                .skip(self.offset)
                .take(window(entity_total))
                .collect(),
            relations: graph
                .relations
                .into_iter()
                .skip(self.offset)
                .take(window(relation_total))
                .collect(),
            total: entity_total.max(relation_total),
            offset: self.offset,
            limit: self.limit,
            has_more: end < entity_total || end < relation_total,
        }
    }
}

/// Entities matching `query`, plus relations that match it themselves or join
/// two matched entities.
pub(crate) fn search_graph(graph: KnowledgeGraph, query: &str) -> KnowledgeGraph {
    let needle = query.to_lowercase();

    let entities: Vec<Entity> = graph
        .entities
        .into_iter()
        .filter(|e| entity_matches_text(e, &needle))
        .collect();
    let matched: HashSet<&str> = entities.iter().map(|e| e.name.as_str()).collect();

    let relations: Vec<Relation> = graph
        .relations
        .into_iter()
        .filter(|r| {
            relation_matches_text(r, &needle)
                || (matched.contains(r.from.as_str()) && matched.contains(r.to.as_str()))
        })
        .collect();

    KnowledgeGraph {
        entities,
        relations,
    }
}

impl GraphStore {
    /// Filter then paginate the whole graph.
    pub fn read_graph(&self, filter: &GraphFilter, page: Pagination) -> Result<GraphPage> {
        let graph = self.load()?;
        Ok(page.apply(filter.apply(graph)))
    }

    /// Free-text search over entity name/type/observations and relation fields.
    pub fn search_nodes(&self, query: &str, page: Pagination) -> Result<GraphPage> {
        let graph = self.load()?;
        Ok(page.apply(search_graph(graph, query)))
    }

    /// Entities with the given names, plus relations between two of them.
    /// Unknown names are ignored.
    pub fn open_nodes(&self, names: &[String]) -> Result<KnowledgeGraph> {
        let graph = self.load()?;
        let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();

        let entities: Vec<Entity> = graph
            .entities
            .into_iter()
            .filter(|e| wanted.contains(e.name.as_str()))
            .collect();
        let found: HashSet<&str> = entities.iter().map(|e| e.name.as_str()).collect();
        let relations: Vec<Relation> = graph
            .relations
            .into_iter()
            .filter(|r| found.contains(r.from.as_str()) && found.contains(r.to.as_str()))
            .collect();

        Ok(KnowledgeGraph {
            entities,
            relations,
        })
    }
}
