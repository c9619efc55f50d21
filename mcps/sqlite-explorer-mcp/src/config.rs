//! Configuration for SQLite Explorer MCP
//!
//! Sources, highest precedence first:
//! 1. Command line / environment (`--database`, `SQLITE_EXPLORER_DB`, `--row-limit`)
//! 2. A TOML config file (`--config` / `SQLITE_EXPLORER_CONFIG_PATH`, or the first
//!    parseable file among the standard locations)
//! 3. Built-in defaults

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::explorer::DEFAULT_ROW_LIMIT;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "sqlite-explorer-mcp")]
#[command(about = "Read-only SQLite query gateway served over MCP stdio")]
pub struct Cli {
    /// SQLite database file to serve
    #[arg(long, env = "SQLITE_EXPLORER_DB")]
    pub database: Option<PathBuf>,

    /// Explicit config file
    #[arg(long, env = "SQLITE_EXPLORER_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Row cap applied to queries without their own LIMIT
    #[arg(long)]
    pub row_limit: Option<NonZeroU32>,
}

/// SQLite Explorer configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("financial_data.db")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Row cap used when a call does not pass `row_limit`
    #[serde(default = "default_row_limit")]
    pub default_row_limit: NonZeroU32,
}

fn default_row_limit() -> NonZeroU32 {
    DEFAULT_ROW_LIMIT
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_row_limit: default_row_limit(),
        }
    }
}

impl ExplorerConfig {
    /// Build the effective config from parsed command line arguments
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::discover(),
        };

        if let Some(database) = &cli.database {
            config.database.path = database.clone();
        }
        if let Some(limit) = cli.row_limit {
            config.query.default_row_limit = limit;
        }

        config.database.path = std::path::absolute(&config.database.path).with_context(|| {
            format!("Failed to resolve database path {:?}", config.database.path)
        })?;

        Ok(config)
    }

    /// Parse a config file, failing if it cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// First parseable file among the standard locations, else defaults
    fn discover() -> Self {
        for path in Self::candidate_paths() {
            if !path.is_file() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => tracing::warn!("Skipping config {}: {:#}", path.display(), e),
            }
        }

        tracing::info!("Using default configuration");
        Self::default()
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // ~/.binks/sqlite-explorer.toml (project convention)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".binks").join("sqlite-explorer.toml"));
        }

        // ./sqlite-explorer-mcp.toml (local override)
        paths.push(PathBuf::from("sqlite-explorer-mcp.toml"));

        // $XDG_CONFIG_HOME/sqlite-explorer-mcp/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("sqlite-explorer-mcp").join("config.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Only `--config` set; bypasses env fallbacks so exported variables don't leak in
    fn config_only(path: impl Into<PathBuf>) -> Cli {
        Cli {
            database: None,
            config: Some(path.into()),
            row_limit: None,
        }
    }

    #[test]
    fn test_defaults() {
        let config = ExplorerConfig::default();
        assert_eq!(config.database.path, PathBuf::from("financial_data.db"));
        assert_eq!(config.query.default_row_limit.get(), 1000);
    }

    #[test]
    fn test_partial_file() {
        let config: ExplorerConfig = toml::from_str("[database]\npath = \"/srv/data/app.db\"\n").unwrap();
        assert_eq!(config.database.path, PathBuf::from("/srv/data/app.db"));
        assert_eq!(config.query.default_row_limit.get(), 1000);
    }

    #[test]
    fn test_zero_limit_in_file_rejected() {
        assert!(toml::from_str::<ExplorerConfig>("[query]\ndefault_row_limit = 0\n").is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("explorer.toml");
        std::fs::write(
            &file,
            "[database]\npath = \"/srv/from-file.db\"\n[query]\ndefault_row_limit = 50\n",
        )
        .unwrap();
        let from_file = ExplorerConfig::resolve(&config_only(&file)).unwrap();
        assert_eq!(from_file.database.path, PathBuf::from("/srv/from-file.db"));
        assert_eq!(from_file.query.default_row_limit.get(), 50);

        // every flag given explicitly, so env fallbacks cannot apply
        let config_arg = file.to_string_lossy().to_string();
        let parsed = Cli::try_parse_from([
            "sqlite-explorer-mcp",
            "--config",
            config_arg.as_str(),
            "--database",
            "/srv/cli.db",
            "--row-limit",
            "7",
        ])
        .unwrap();
        let overridden = ExplorerConfig::resolve(&parsed).unwrap();
        assert_eq!(overridden.database.path, PathBuf::from("/srv/cli.db"));
        assert_eq!(overridden.query.default_row_limit.get(), 7);
    }

    #[test]
    fn test_relative_path_made_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("explorer.toml");
        std::fs::write(&file, "[database]\npath = \"data/app.db\"\n").unwrap();
        let config = ExplorerConfig::resolve(&config_only(&file)).unwrap();
        assert!(config.database.path.is_absolute());
        assert!(config.database.path.ends_with("data/app.db"));
    }

    #[test]
    fn test_unreadable_explicit_config_fails() {
        let result = ExplorerConfig::resolve(&config_only("/definitely/not/here.toml"));
        assert!(result.is_err());
    }
}
