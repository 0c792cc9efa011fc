//! Content handlers for fetched descriptions
//!
//! Invoked out of band once the fetch subsystem resolves a cid. The owner is
//! recovered from the correlation context registered with the fetch; the
//! record itself is keyed by the cid.

use crate::core::{
    ContentTemplate, CorrelationContext, EntityStore, FetchRequest, IndexerError, IndexerResult,
};
use crate::domain::models::{Description, ProposalDescription, ServiceDescription};
use crate::domain::normalizer::{normalize, NormalizedFields};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Outcome of a content delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery<D> {
    /// Record persisted
    Stored(D),
    /// Correlation key missing, nothing persisted
    Skipped,
}

impl<D> Delivery<D> {
    pub fn stored(self) -> Option<D> {
        match self {
            Delivery::Stored(record) => Some(record),
            Delivery::Skipped => None,
        }
    }
}

/// Processor for fetched description content
pub struct ContentProcessor<S: EntityStore> {
    store: Arc<S>,
}

impl<S: EntityStore> ContentProcessor<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Route a resolved fetch to its handler
    pub fn deliver(&self, request: &FetchRequest, payload: &[u8]) -> IndexerResult<()> {
        match request.template {
            ContentTemplate::ServiceData => {
                self.handle_service_data(payload, &request.cid, &request.context)?;
            }
            ContentTemplate::ProposalData => {
                self.handle_proposal_data(payload, &request.cid, &request.context)?;
            }
        }
        Ok(())
    }

    pub fn handle_service_data(
        &self,
        payload: &[u8],
        cid: &str,
        context: &CorrelationContext,
    ) -> IndexerResult<Delivery<ServiceDescription>> {
        let Some(service_id) = owner_key(context, CorrelationContext::SERVICE_ID, cid) else {
            return Ok(Delivery::Skipped);
        };

        let mut description = self.attach::<ServiceDescription>(cid, service_id)?;
        if let Some(fields) = parse(payload, cid) {
            description.apply(fields);
        }

        self.store.save(&description)?;
        debug!("Stored ServiceDescription {} for service {}", cid, service_id);
        Ok(Delivery::Stored(description))
    }

    pub fn handle_proposal_data(
        &self,
        payload: &[u8],
        cid: &str,
        context: &CorrelationContext,
    ) -> IndexerResult<Delivery<ProposalDescription>> {
        let Some(proposal_id) = owner_key(context, CorrelationContext::PROPOSAL_ID, cid) else {
            return Ok(Delivery::Skipped);
        };

        let mut description = self.attach::<ProposalDescription>(cid, proposal_id)?;
        if let Some(fields) = parse(payload, cid) {
            description.apply(fields);
        }

        self.store.save(&description)?;
        debug!("Stored ProposalDescription {} for proposal {}", cid, proposal_id);
        Ok(Delivery::Stored(description))
    }

    /// Load or start the record for `cid` and add `owner` to it
    fn attach<D: Description>(&self, cid: &str, owner: &str) -> IndexerResult<D> {
        let mut description = self
            .store
            .load::<D>(cid)?
            .unwrap_or_else(|| D::empty(cid));
        description.add_owner(owner);
        Ok(description)
    }
}

fn owner_key<'a>(context: &'a CorrelationContext, key: &'static str, cid: &str) -> Option<&'a str> {
    let owner = context.get(key);
    if owner.is_none() {
        let err = IndexerError::MissingCorrelationKey {
            key,
            cid: cid.to_string(),
        };
        error!("Dropping content delivery: {}", err);
    }
    owner
}

fn parse(payload: &[u8], cid: &str) -> Option<NormalizedFields> {
    match normalize(payload) {
        Ok(fields) => Some(fields),
        Err(e) => {
            warn!("Content {} stored without fields: {}", cid, e);
            None
        }
    }
}
