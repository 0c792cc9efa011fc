//! Proposal event processor

use super::supersede::{supersede, DescriptionRetention};
use crate::core::{
    BlockInfo, ContentFetcher, ContentTemplate, CorrelationContext, EntityStore, FetchRequest,
    IndexerResult,
};
use crate::domain::accessors::{
    get_or_create_proposal, get_or_create_service, get_or_create_token, load_platform, load_proposal,
    load_user,
};
use crate::domain::events::{ProposalCreated, ProposalUpdated};
use crate::domain::ids::{composite_id, description_record_id};
use crate::domain::models::{Proposal, ProposalDescription, ProposalStatus};
use std::sync::Arc;
use tracing::debug;

/// Processor for proposal lifecycle events
pub struct ProposalProcessor<S: EntityStore, F: ContentFetcher> {
    store: Arc<S>,
    fetcher: Arc<F>,
    retention: DescriptionRetention,
}

impl<S: EntityStore, F: ContentFetcher> ProposalProcessor<S, F> {
    /// Create a new proposal processor
    pub fn new(store: Arc<S>, fetcher: Arc<F>, retention: DescriptionRetention) -> Self {
        Self {
            store,
            fetcher,
            retention,
        }
    }

    /// Process a ProposalCreated event.
    ///
    /// The seller and platform must already be indexed.
    pub fn created(&self, event: &ProposalCreated, block: BlockInfo) -> IndexerResult<Proposal> {
        let store = self.store.as_ref();
        let proposal_id = composite_id(&event.service_id.to_string(), &event.owner_id.to_string());
        debug!("Processing ProposalCreated for proposal {}", proposal_id);

        let mut proposal = get_or_create_proposal(store, &proposal_id, event.service_id)?;
        proposal.status = ProposalStatus::Pending;
        proposal.service = get_or_create_service(store, event.service_id)?.id;
        proposal.seller = Some(load_user(store, event.owner_id)?.id);
        proposal.rate_token = Some(get_or_create_token(store, &event.rate_token)?.id);
        proposal.rate_amount = event.rate_amount;
        proposal.platform = Some(load_platform(store, event.platform_id)?.id);
        proposal.expiration_date = event.expiration_date;
        proposal.created_at = block.timestamp;
        proposal.updated_at = block.timestamp;
        proposal.cid = Some(event.data_uri.clone());

        let record_id = self.request_description(&proposal.id, &event.data_uri, block)?;
        proposal.description = Some(record_id);

        store.save(&proposal)?;
        Ok(proposal)
    }

    /// Process a ProposalUpdated event. The proposal must already exist.
    pub fn updated(&self, event: &ProposalUpdated, block: BlockInfo) -> IndexerResult<Proposal> {
        let store = self.store.as_ref();
        let proposal_id = composite_id(&event.service_id.to_string(), &event.owner_id.to_string());
        debug!("Processing ProposalUpdated for proposal {}", proposal_id);

        let mut proposal = load_proposal(store, &proposal_id)?;
        proposal.rate_token = Some(get_or_create_token(store, &event.rate_token)?.id);
        proposal.rate_amount = event.rate_amount;
        proposal.updated_at = block.timestamp;
        proposal.expiration_date = event.expiration_date;
        let old_cid = proposal.cid.replace(event.data_uri.clone());

        if let Some(old_cid) = old_cid {
            supersede::<S, ProposalDescription>(store, &old_cid, &proposal.id, self.retention)?;
        }

        let record_id = self.request_description(&proposal.id, &event.data_uri, block)?;
        proposal.description = Some(record_id);

        store.save(&proposal)?;
        Ok(proposal)
    }

    fn request_description(&self, proposal_id: &str, cid: &str, block: BlockInfo) -> IndexerResult<String> {
        let record_id = description_record_id(cid, block.timestamp);
        let context = CorrelationContext::for_proposal(proposal_id, &record_id);
        self.fetcher
            .register_fetch(FetchRequest::new(ContentTemplate::ProposalData, cid, context))?;
        Ok(record_id)
    }
}
