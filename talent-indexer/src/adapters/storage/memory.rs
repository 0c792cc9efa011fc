//! In-memory entity store

use crate::core::{Entity, EntityKind, EntityStore, IndexerResult, StorageError};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

type Table = HashMap<(EntityKind, String), Vec<u8>>;

/// Entity store backed by a hash map; used by tests and dry runs
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<Table>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entities of one kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.read()
            .map(|entries| entries.keys().filter(|(k, _)| *k == kind).count())
            .unwrap_or(0)
    }

    fn read(&self) -> IndexerResult<RwLockReadGuard<'_, Table>> {
        self.entries.read().map_err(|_| StorageError::LockPoisoned.into())
    }

    fn write(&self) -> IndexerResult<RwLockWriteGuard<'_, Table>> {
        self.entries.write().map_err(|_| StorageError::LockPoisoned.into())
    }
}

impl EntityStore for InMemoryStore {
    fn load<E: Entity>(&self, id: &str) -> IndexerResult<Option<E>> {
        let entries = self.read()?;
        match entries.get(&(E::KIND, id.to_string())) {
            Some(bytes) => Ok(Some(bincode::deserialize(bytes)?)),
            None => Ok(None),
        }
    }

    fn save<E: Entity>(&self, entity: &E) -> IndexerResult<()> {
        let bytes = bincode::serialize(entity)?;
        self.write()?.insert((E::KIND, entity.id().to_string()), bytes);
        Ok(())
    }

    fn delete<E: Entity>(&self, id: &str) -> IndexerResult<()> {
        self.write()?.remove(&(E::KIND, id.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Platform, User};

    #[test]
    fn test_kinds_do_not_collide() {
        let store = InMemoryStore::new();
        store.save(&User::new("1")).unwrap();
        store.save(&Platform::new("1")).unwrap();

        store.delete::<User>("1").unwrap();

        assert!(store.load::<User>("1").unwrap().is_none());
        assert_eq!(store.load::<Platform>("1").unwrap(), Some(Platform::new("1")));
        assert_eq!(store.count(EntityKind::Platform), 1);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let store = InMemoryStore::new();
        store.delete::<User>("absent").unwrap();
    }
}
