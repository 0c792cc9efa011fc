//! Centralized error types for the talent indexer

use super::types::EntityKind;
use thiserror::Error;

/// Main indexer error type
#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Fetch registration failed for {cid}: {reason}")]
    Fetch { cid: String, reason: String },

    /// A referenced entity that an earlier event should have created is absent.
    #[error("Missing upstream entity {kind} with id {id}")]
    MissingUpstreamEntity { kind: EntityKind, id: String },

    #[error("Missing correlation key '{key}' for content {cid}")]
    MissingCorrelationKey { key: &'static str, cid: String },

    #[error("Malformed content: {0}")]
    MalformedContent(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IndexerError {
    /// Whether this error must stop indexing.
    ///
    /// Correlation and content errors are recovered where they happen; every
    /// other failure means the entity graph can no longer be trusted.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            IndexerError::MissingCorrelationKey { .. } | IndexerError::MalformedContent(_)
        )
    }

    pub fn missing<S: Into<String>>(kind: EntityKind, id: S) -> Self {
        IndexerError::MissingUpstreamEntity {
            kind,
            id: id.into(),
        }
    }
}

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("RocksDB error: {0}")]
    RocksDB(String),

    #[error("Column family not found: {0}")]
    ColumnFamilyNotFound(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Result type alias for indexer operations
pub type IndexerResult<T> = Result<T, IndexerError>;

/// Helper to convert rocksdb errors
impl From<rocksdb::Error> for IndexerError {
    fn from(err: rocksdb::Error) -> Self {
        IndexerError::Storage(StorageError::RocksDB(err.to_string()))
    }
}

/// Helper to convert serialization errors
impl From<bincode::Error> for IndexerError {
    fn from(err: bincode::Error) -> Self {
        IndexerError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for IndexerError {
    fn from(err: serde_json::Error) -> Self {
        IndexerError::Deserialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(IndexerError::missing(EntityKind::Proposal, "1-2").is_fatal());
        assert!(IndexerError::Storage(StorageError::LockPoisoned).is_fatal());
        assert!(!IndexerError::MalformedContent("not an object".into()).is_fatal());
        assert!(!IndexerError::MissingCorrelationKey {
            key: "serviceId",
            cid: "Qm".into()
        }
        .is_fatal());
    }

    #[test]
    fn test_missing_entity_message() {
        let err = IndexerError::missing(EntityKind::User, "7");
        assert_eq!(err.to_string(), "Missing upstream entity User with id 7");
    }
}
