//! Service event processor

use super::supersede::{supersede, DescriptionRetention};
use crate::core::{
    BlockInfo, ContentFetcher, ContentTemplate, CorrelationContext, EntityStore, FetchRequest,
    IndexerResult,
};
use crate::domain::accessors::{get_or_create_platform, get_or_create_service, get_or_create_user, load_service};
use crate::domain::events::{ServiceCreated, ServiceDetailedUpdated};
use crate::domain::ids::description_record_id;
use crate::domain::models::{Service, ServiceDescription, ServiceStatus};
use std::sync::Arc;
use tracing::debug;

/// Processor for service lifecycle events
pub struct ServiceProcessor<S: EntityStore, F: ContentFetcher> {
    store: Arc<S>,
    fetcher: Arc<F>,
    retention: DescriptionRetention,
}

impl<S: EntityStore, F: ContentFetcher> ServiceProcessor<S, F> {
    /// Create a new service processor
    pub fn new(store: Arc<S>, fetcher: Arc<F>, retention: DescriptionRetention) -> Self {
        Self {
            store,
            fetcher,
            retention,
        }
    }

    /// Process a ServiceCreated event
    pub fn created(&self, event: &ServiceCreated, block: BlockInfo) -> IndexerResult<Service> {
        debug!("Processing ServiceCreated for service {}", event.id);

        let mut service = get_or_create_service(self.store.as_ref(), event.id)?;
        service.created_at = block.timestamp;
        service.updated_at = block.timestamp;
        service.buyer = Some(get_or_create_user(self.store.as_ref(), event.owner_id)?.id);
        service.status = ServiceStatus::Opened;
        service.platform = Some(get_or_create_platform(self.store.as_ref(), event.platform_id)?.id);
        service.cid = Some(event.data_uri.clone());

        let record_id = self.request_description(&service.id, &event.data_uri, block)?;
        service.description = Some(record_id);

        self.store.save(&service)?;
        Ok(service)
    }

    /// Process a ServiceDetailedUpdated event
    pub fn detailed_updated(
        &self,
        event: &ServiceDetailedUpdated,
        block: BlockInfo,
    ) -> IndexerResult<Service> {
        debug!("Processing ServiceDetailedUpdated for service {}", event.id);

        let mut service = load_service(self.store.as_ref(), event.id)?;
        let old_cid = service.cid.replace(event.data_uri.clone());
        service.updated_at = block.timestamp;

        if let Some(old_cid) = old_cid {
            supersede::<S, ServiceDescription>(self.store.as_ref(), &old_cid, &service.id, self.retention)?;
        }

        let record_id = self.request_description(&service.id, &event.data_uri, block)?;
        service.description = Some(record_id);

        self.store.save(&service)?;
        Ok(service)
    }

    /// Register the fetch for `cid`, returning the correlation record id
    fn request_description(&self, service_id: &str, cid: &str, block: BlockInfo) -> IndexerResult<String> {
        let record_id = description_record_id(cid, block.timestamp);
        let context = CorrelationContext::for_service(service_id, &record_id);
        self.fetcher
            .register_fetch(FetchRequest::new(ContentTemplate::ServiceData, cid, context))?;
        Ok(record_id)
    }
}
