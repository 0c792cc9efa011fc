//! Profile and platform registration processor

use crate::core::{BlockInfo, EntityStore, IndexerResult};
use crate::domain::accessors::{get_or_create_platform, get_or_create_user};
use crate::domain::events::{PlatformMinted, UserMinted};
use crate::domain::ids::address_id;
use crate::domain::models::{Platform, User};
use std::sync::Arc;
use tracing::debug;

/// Processor for the events that bring users and platforms into existence.
///
/// Proposals require both to be indexed beforehand.
pub struct AccountProcessor<S: EntityStore> {
    store: Arc<S>,
}

impl<S: EntityStore> AccountProcessor<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn user_minted(&self, event: &UserMinted, block: BlockInfo) -> IndexerResult<User> {
        let mut user = get_or_create_user(self.store.as_ref(), event.id)?;
        user.address = Some(address_id(&event.address));
        user.handle = Some(event.handle.clone());
        user.created_at = block.timestamp;
        debug!("User {} minted as {}", user.id, event.handle);

        self.store.save(&user)?;
        Ok(user)
    }

    pub fn platform_minted(&self, event: &PlatformMinted, block: BlockInfo) -> IndexerResult<Platform> {
        let mut platform = get_or_create_platform(self.store.as_ref(), event.id)?;
        platform.address = Some(address_id(&event.address));
        platform.name = Some(event.name.clone());
        platform.created_at = block.timestamp;
        debug!("Platform {} minted as {}", platform.id, event.name);

        self.store.save(&platform)?;
        Ok(platform)
    }
}
