//! Processor registry for routing events to their handlers

use super::{AccountProcessor, ConfigProcessor, DescriptionRetention, ProposalProcessor, ServiceProcessor};
use crate::core::{ContentFetcher, EntityStore, IndexerResult};
use crate::domain::events::{EventEnvelope, IndexerEvent};
use std::sync::Arc;
use tracing::trace;

/// Registry for all event processors
pub struct ProcessorRegistry<S: EntityStore, F: ContentFetcher> {
    account_processor: AccountProcessor<S>,
    service_processor: ServiceProcessor<S, F>,
    proposal_processor: ProposalProcessor<S, F>,
    config_processor: ConfigProcessor<S>,
}

impl<S: EntityStore, F: ContentFetcher> ProcessorRegistry<S, F> {
    /// Create a new processor registry
    pub fn new(store: Arc<S>, fetcher: Arc<F>, retention: DescriptionRetention) -> Self {
        Self {
            account_processor: AccountProcessor::new(store.clone()),
            service_processor: ServiceProcessor::new(store.clone(), fetcher.clone(), retention),
            proposal_processor: ProposalProcessor::new(store.clone(), fetcher, retention),
            config_processor: ConfigProcessor::new(store),
        }
    }

    /// Route an event to the appropriate processor.
    ///
    /// Events must arrive in log order. Any error returned here is fatal for
    /// the stream.
    pub fn process(&self, envelope: &EventEnvelope) -> IndexerResult<()> {
        let block = envelope.block;
        trace!("Block {}: {}", block.number, envelope.event.name());

        match &envelope.event {
            IndexerEvent::UserMinted(event) => {
                self.account_processor.user_minted(event, block)?;
            }
            IndexerEvent::PlatformMinted(event) => {
                self.account_processor.platform_minted(event, block)?;
            }
            IndexerEvent::ServiceCreated(event) => {
                self.service_processor.created(event, block)?;
            }
            IndexerEvent::ServiceDetailedUpdated(event) => {
                self.service_processor.detailed_updated(event, block)?;
            }
            IndexerEvent::ProposalCreated(event) => {
                self.proposal_processor.created(event, block)?;
            }
            IndexerEvent::ProposalUpdated(event) => {
                self.proposal_processor.updated(event, block)?;
            }
            IndexerEvent::AllowedTokenListUpdated(event) => {
                self.config_processor.allowed_token_list_updated(event)?;
            }
            IndexerEvent::MinCompletionPercentageUpdated(event) => {
                self.config_processor.min_completion_percentage_updated(event)?;
            }
        }

        Ok(())
    }
}
