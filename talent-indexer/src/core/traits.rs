//! Core trait abstractions (Ports in Hexagonal Architecture)

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use super::error::IndexerResult;
use super::types::*;

/// A document persisted in the entity store, addressed by kind + id
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// Storage namespace of this entity type
    const KIND: EntityKind;

    /// Primary key
    fn id(&self) -> &str;
}

/// Storage port - load/upsert/delete of entities
///
/// Processors load, modify and save without locking. Event and content
/// handlers sharing a store must run one at a time.
pub trait EntityStore: Send + Sync {
    /// Load an entity by id
    fn load<E: Entity>(&self, id: &str) -> IndexerResult<Option<E>>;

    /// Insert or replace an entity
    fn save<E: Entity>(&self, entity: &E) -> IndexerResult<()>;

    /// Delete an entity; deleting a missing id is a no-op
    fn delete<E: Entity>(&self, id: &str) -> IndexerResult<()>;

    /// Health check
    fn health_check(&self) -> IndexerResult<()> {
        Ok(())
    }
}

/// Fetch subsystem port - registration side
pub trait ContentFetcher: Send + Sync {
    /// Register a fetch; the matching content handler fires once the cid resolves
    fn register_fetch(&self, request: FetchRequest) -> IndexerResult<()>;
}

/// Fetch subsystem port - resolution side
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Resolve a cid to its bytes, `None` if it cannot be found
    async fn resolve(&self, cid: &str) -> IndexerResult<Option<Vec<u8>>>;
}
