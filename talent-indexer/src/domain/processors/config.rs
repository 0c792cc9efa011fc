//! Token allow-list and protocol settings processor

use crate::core::{EntityStore, IndexerResult};
use crate::domain::accessors::{get_or_create_protocol, get_or_create_token};
use crate::domain::events::{AllowedTokenListUpdated, MinCompletionPercentageUpdated};
use crate::domain::models::{Protocol, Token};
use std::sync::Arc;
use tracing::debug;

/// Processor for platform configuration events. None of these carry content.
pub struct ConfigProcessor<S: EntityStore> {
    store: Arc<S>,
}

impl<S: EntityStore> ConfigProcessor<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Upsert a token's allow-list entry
    pub fn allowed_token_list_updated(&self, event: &AllowedTokenListUpdated) -> IndexerResult<Token> {
        let mut token = get_or_create_token(self.store.as_ref(), &event.token_address)?;
        token.allowed = event.status;
        token.minimum_transaction_amount = event.minimum_transaction_amount;
        debug!("Token {} allowed={}", token.id, token.allowed);

        self.store.save(&token)?;
        Ok(token)
    }

    /// Overwrite the protocol singleton's completion threshold
    pub fn min_completion_percentage_updated(
        &self,
        event: &MinCompletionPercentageUpdated,
    ) -> IndexerResult<Protocol> {
        let mut protocol = get_or_create_protocol(self.store.as_ref())?;
        protocol.min_service_completion_percentage = event.min_completion_percentage;

        self.store.save(&protocol)?;
        Ok(protocol)
    }
}
