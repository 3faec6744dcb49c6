//! Knowledge graph memory for AI agents, persisted to one JSONL file and served over MCP.
//!
//! The graph holds three kinds of data:
//!
//! | Record | Key | Notes |
//! |--------|-----|-------|
//! | **Entity** | `name` | Typed node carrying a deduplicated list of free-text observations |
//! | **Relation** | `(from, to, relationType)` | Directed typed edge between entity names; may dangle |
//! | **Observation** | exact string, per entity | Appended and removed via dedicated operations |
//!
//! # Architecture
//!
//! - **Storage**: newline-delimited JSON, one tagged record per line, rewritten
//!   atomically (temp file + rename) on every mutation
//! - **Consistency**: every operation reloads the whole file; the MCP handler
//!   serializes operations behind one lock
//! - **Queries**: full scans for filtering, substring search, and bounded
//!   breadth-first traversal
//! - **Transport**: MCP over stdio (primary) or streamable HTTP
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files and environment variables
//! - [`graph`] - The graph store: load/save, mutations, search, traversal, and stats

pub mod config;
pub mod graph;
