use anyhow::Result;
use talent_indexer::{DescriptionRetention, IndexerConfig};
use tempfile::TempDir;

#[test]
fn test_from_file_reads_every_section() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("indexer.toml");
    std::fs::write(
        &path,
        r#"
[storage]
path = "/var/lib/talent/rocksdb"
enable_compression = false
max_open_files = 500
write_buffer_size_mb = 32
max_write_buffer_number = 3
block_cache_size_mb = 64

[content]
directory = "/var/lib/talent/ipfs"

[monitoring]
log_level = "debug"
structured_logging = true

[indexer]
description_retention = "shared"
"#,
    )?;

    let config = IndexerConfig::from_file(&path)?;

    assert_eq!(config.storage.path.to_str(), Some("/var/lib/talent/rocksdb"));
    assert!(!config.storage.enable_compression);
    assert_eq!(config.storage.max_open_files, 500);
    assert_eq!(config.content.directory.to_str(), Some("/var/lib/talent/ipfs"));
    assert_eq!(config.monitoring.log_level, "debug");
    assert!(config.monitoring.structured_logging);
    assert_eq!(config.indexer.description_retention, DescriptionRetention::Shared);
    Ok(())
}

#[test]
fn test_from_file_rejects_out_of_range_values() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("indexer.toml");
    std::fs::write(&path, "[storage]\nmax_write_buffer_number = 64\n")?;

    assert!(IndexerConfig::from_file(&path).is_err());
    Ok(())
}

#[test]
fn test_from_file_rejects_shared_directories() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("indexer.toml");
    std::fs::write(
        &path,
        "[storage]\npath = \"./data\"\n\n[content]\ndirectory = \"./data\"\n",
    )?;

    let err = IndexerConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("must differ"));
    Ok(())
}

#[test]
fn test_from_file_rejects_unknown_retention() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("indexer.toml");
    std::fs::write(&path, "[indexer]\ndescription_retention = \"forever\"\n")?;

    assert!(IndexerConfig::from_file(&path).is_err());
    Ok(())
}

#[test]
fn test_load_without_file_uses_defaults() -> Result<()> {
    let dir = TempDir::new()?;

    let config = IndexerConfig::load(dir.path().join("absent.toml"))?;

    assert_eq!(config.storage.max_open_files, 1000);
    assert_eq!(config.indexer.description_retention, DescriptionRetention::Exclusive);
    Ok(())
}

#[test]
fn test_ensure_directories_creates_paths() -> Result<()> {
    let dir = TempDir::new()?;
    let mut config = IndexerConfig::default();
    config.storage.path = dir.path().join("db");
    config.content.directory = dir.path().join("content");

    config.ensure_directories()?;

    assert!(config.storage.path.is_dir());
    assert!(config.content.directory.is_dir());
    Ok(())
}
