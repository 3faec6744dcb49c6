use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MemgraphConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub query: QueryConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub transport: String,
    pub log_level: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub memory_file_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct QueryConfig {
    /// Page size used when a read or search omits `limit`. `None` returns everything.
    pub default_limit: Option<usize>,
    /// Upper bound on `get_related_nodes` depth.
    pub max_depth: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: "stdio".into(),
            log_level: "info".into(),
            host: "127.0.0.1".into(),
            port: 8765,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let memory_file_path = default_memgraph_dir()
            .join("memory.jsonl")
            .to_string_lossy()
            .into_owned();
        Self { memory_file_path }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: None,
            max_depth: 5,
        }
    }
}

/// Returns `~/.memgraph/`, or `./.memgraph/` when no home directory is known.
pub fn default_memgraph_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".memgraph")
}

/// Returns the default config file path: `~/.memgraph/config.toml`
pub fn default_config_path() -> PathBuf {
    default_memgraph_dir().join("config.toml")
}

impl MemgraphConfig {
    /// Load config from the default TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            MemgraphConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (MEMORY_FILE_PATH, MEMGRAPH_LOG_LEVEL, MEMGRAPH_TRANSPORT).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MEMORY_FILE_PATH") {
            if !val.trim().is_empty() {
                self.storage.memory_file_path = val;
            }
        }
        if let Ok(val) = std::env::var("MEMGRAPH_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("MEMGRAPH_TRANSPORT") {
            self.server.transport = val;
        }
    }

    /// Absolute path of the backing file: `~` expanded, relative paths anchored
    /// at the current working directory.
    pub fn resolved_memory_path(&self) -> Result<PathBuf> {
        let path = expand_tilde(&self.storage.memory_file_path);
        if path.is_absolute() {
            return Ok(path);
        }
        let cwd = std::env::current_dir().context("failed to resolve working directory")?;
        Ok(cwd.join(path))
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
