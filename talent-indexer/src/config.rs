//! Configuration management for the talent indexer

use crate::domain::processors::DescriptionRetention;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Environment variable prefix for overrides, e.g. `TALENT_INDEXER__STORAGE__PATH`
pub const ENV_PREFIX: &str = "TALENT_INDEXER";

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct IndexerConfig {
    #[validate]
    pub storage: RocksDBConfig,
    #[validate]
    pub content: ContentConfig,
    #[validate]
    pub monitoring: MonitoringConfig,
    pub indexer: IndexerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RocksDBConfig {
    pub path: PathBuf,
    pub enable_compression: bool,
    #[validate(range(min = 100, max = 10000))]
    pub max_open_files: i32,
    #[validate(range(min = 1, max = 2048))]
    pub write_buffer_size_mb: usize,
    #[validate(range(min = 2, max = 16))]
    pub max_write_buffer_number: i32,
    #[validate(range(min = 8, max = 4096))]
    pub block_cache_size_mb: usize,
}

/// Where fetched content is resolved from
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding one file per cid
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MonitoringConfig {
    #[validate(length(min = 1))]
    pub log_level: String,
    pub structured_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IndexerSettings {
    /// Policy for descriptions behind a replaced content hash
    pub description_retention: DescriptionRetention,
}

impl Default for RocksDBConfig {
    fn default() -> Self {
        Self {
            path: "./data/rocksdb".into(),
            enable_compression: true,
            max_open_files: 1000,
            write_buffer_size_mb: 64,
            max_write_buffer_number: 4,
            block_cache_size_mb: 128,
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            directory: "./data/ipfs".into(),
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            structured_logging: false,
        }
    }
}

impl IndexerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)?;

        config.check()?;

        Ok(config)
    }

    /// Layer defaults, an optional TOML file and `TALENT_INDEXER__*` env vars
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to assemble configuration")?;
        let config: Self = settings.try_deserialize()?;

        config.check()?;

        Ok(config)
    }

    /// Ensure required directories exist
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.storage.path)?;
        std::fs::create_dir_all(&self.content.directory)?;
        Ok(())
    }

    /// Validate field ranges and cross-field constraints
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        if self.storage.path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Storage path cannot be empty"));
        }
        if self.storage.path == self.content.directory {
            return Err(anyhow::anyhow!(
                "Storage path and content directory must differ"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = IndexerConfig::default();
        assert!(config.check().is_ok());
        assert_eq!(
            config.indexer.description_retention,
            DescriptionRetention::Exclusive
        );
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut config = IndexerConfig::default();
        config.storage.max_open_files = 5;
        assert!(config.check().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: IndexerConfig = toml::from_str(
            r#"
[indexer]
description_retention = "shared"
"#,
        )
        .unwrap();

        assert_eq!(config.indexer.description_retention, DescriptionRetention::Shared);
        assert_eq!(config.storage.max_open_files, 1000);
        assert_eq!(config.monitoring.log_level, "info");
    }
}
