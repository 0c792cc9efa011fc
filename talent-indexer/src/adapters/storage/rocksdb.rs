//! RocksDB entity store

use crate::config::RocksDBConfig;
use crate::core::{Entity, EntityKind, EntityStore, IndexerError, IndexerResult, StorageError};
use rocksdb::{BlockBasedOptions, Cache, ColumnFamily, ColumnFamilyDescriptor, Options, DB};
use tracing::{debug, info};

/// Column family names, one per entity kind
pub struct ColumnFamilies;

impl ColumnFamilies {
    pub fn for_kind(kind: EntityKind) -> &'static str {
        kind.as_str()
    }

    /// Get all column family names
    pub fn all() -> Vec<&'static str> {
        EntityKind::ALL.iter().map(|kind| kind.as_str()).collect()
    }
}

/// RocksDB client implementing the entity store
pub struct RocksDBClient {
    db: DB,
}

impl RocksDBClient {
    /// Open RocksDB with the specified configuration
    pub fn open(config: &RocksDBConfig) -> IndexerResult<Self> {
        let path = &config.path;

        // Create directory if it doesn't exist
        if !path.exists() {
            std::fs::create_dir_all(path)
                .map_err(|e| IndexerError::Storage(StorageError::RocksDB(e.to_string())))?;
        }

        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_max_open_files(config.max_open_files);
        opts.set_write_buffer_size(config.write_buffer_size_mb * 1024 * 1024);
        opts.set_max_write_buffer_number(config.max_write_buffer_number);

        if config.enable_compression {
            opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
        }

        let cache = Cache::new_lru_cache(config.block_cache_size_mb * 1024 * 1024);
        let mut block_opts = BlockBasedOptions::default();
        block_opts.set_block_cache(&cache);
        opts.set_block_based_table_factory(&block_opts);

        let cfs: Vec<ColumnFamilyDescriptor> = ColumnFamilies::all()
            .into_iter()
            .map(|name| {
                let mut cf_opts = Options::default();
                cf_opts.set_max_write_buffer_number(config.max_write_buffer_number);
                ColumnFamilyDescriptor::new(name, cf_opts)
            })
            .collect();

        let db = DB::open_cf_descriptors(&opts, path, cfs)?;

        info!("RocksDB opened successfully at: {:?}", path);

        Ok(Self { db })
    }

    fn cf(&self, kind: EntityKind) -> IndexerResult<&ColumnFamily> {
        let name = ColumnFamilies::for_kind(kind);
        self.db
            .cf_handle(name)
            .ok_or_else(|| StorageError::ColumnFamilyNotFound(name.to_string()).into())
    }
}

impl EntityStore for RocksDBClient {
    fn load<E: Entity>(&self, id: &str) -> IndexerResult<Option<E>> {
        let cf = self.cf(E::KIND)?;
        match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    fn save<E: Entity>(&self, entity: &E) -> IndexerResult<()> {
        let cf = self.cf(E::KIND)?;
        let serialized = bincode::serialize(entity)?;
        self.db.put_cf(cf, entity.id().as_bytes(), serialized)?;
        debug!("Saved {} {}", E::KIND, entity.id());
        Ok(())
    }

    fn delete<E: Entity>(&self, id: &str) -> IndexerResult<()> {
        let cf = self.cf(E::KIND)?;
        self.db.delete_cf(cf, id.as_bytes())?;
        debug!("Deleted {} {}", E::KIND, id);
        Ok(())
    }

    /// Check if database is healthy (can perform basic operations)
    fn health_check(&self) -> IndexerResult<()> {
        self.db.property_value("rocksdb.stats")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Service, ServiceStatus};
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> RocksDBConfig {
        RocksDBConfig {
            path: dir.path().to_path_buf(),
            enable_compression: false,
            max_open_files: 100,
            write_buffer_size_mb: 16,
            max_write_buffer_number: 2,
            block_cache_size_mb: 32,
        }
    }

    #[test]
    fn test_rocksdb_basic_operations() {
        let temp_dir = TempDir::new().unwrap();
        let db = RocksDBClient::open(&test_config(&temp_dir)).unwrap();

        let mut service = Service::new("42");
        service.cid = Some("QmTest".to_string());
        db.save(&service).unwrap();

        let retrieved: Option<Service> = db.load("42").unwrap();
        assert_eq!(retrieved, Some(service));
        assert_eq!(retrieved.unwrap().status, ServiceStatus::Opened);

        db.delete::<Service>("42").unwrap();
        assert_eq!(db.load::<Service>("42").unwrap(), None);

        // Deleting again is fine
        db.delete::<Service>("42").unwrap();

        assert!(db.health_check().is_ok());
    }
}
