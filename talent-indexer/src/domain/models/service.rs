//! Service domain models

use super::Description;
use crate::core::{Entity, EntityKind};
use crate::domain::normalizer::NormalizedFields;
use serde::{Deserialize, Serialize};

/// Service lifecycle status matching the marketplace contract
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    #[default]
    Opened,
    Confirmed,
    Finished,
    Cancelled,
    Uncompleted,
}

/// Service posted by a buyer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Service {
    pub id: String,
    pub status: ServiceStatus,
    pub buyer: Option<String>,
    pub platform: Option<String>,

    /// Latest fetch target
    pub cid: Option<String>,

    /// Correlation record id of the latest fetch (`cid-timestamp`)
    pub description: Option<String>,

    pub created_at: u64,
    pub updated_at: u64,
}

impl Service {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: ServiceStatus::Opened,
            buyer: None,
            platform: None,
            cid: None,
            description: None,
            created_at: 0,
            updated_at: 0,
        }
    }
}

impl Entity for Service {
    const KIND: EntityKind = EntityKind::Service;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Normalized service content, keyed by cid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceDescription {
    pub id: String,

    /// Services referencing this content
    pub services: Vec<String>,

    pub title: Option<String>,
    pub about: Option<String>,
    pub role: Option<String>,
    pub rate_token: Option<String>,
    pub rate_amount: Option<String>,
    pub keywords_raw: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl ServiceDescription {
    /// Copy over whichever fields were parsed; absent ones are left as they are.
    pub fn apply(&mut self, fields: NormalizedFields) {
        if fields.title.is_some() {
            self.title = fields.title;
        }
        if fields.about.is_some() {
            self.about = fields.about;
        }
        if fields.role.is_some() {
            self.role = fields.role;
        }
        if fields.rate_token.is_some() {
            self.rate_token = fields.rate_token;
        }
        if fields.rate_amount.is_some() {
            self.rate_amount = fields.rate_amount;
        }
        if let Some(keywords) = fields.keywords {
            self.keywords_raw = Some(keywords.raw);
            self.keywords = Some(keywords.canonical);
        }
    }
}

impl Entity for ServiceDescription {
    const KIND: EntityKind = EntityKind::ServiceDescription;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Description for ServiceDescription {
    fn empty(cid: &str) -> Self {
        Self {
            id: cid.to_string(),
            services: Vec::new(),
            title: None,
            about: None,
            role: None,
            rate_token: None,
            rate_amount: None,
            keywords_raw: None,
            keywords: None,
        }
    }

    fn owners(&self) -> &[String] {
        &self.services
    }

    fn owners_mut(&mut self) -> &mut Vec<String> {
        &mut self.services
    }
}
