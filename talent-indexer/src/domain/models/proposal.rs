//! Proposal domain models

use super::Description;
use crate::core::{Entity, EntityKind};
use crate::domain::normalizer::NormalizedFields;
use serde::{Deserialize, Serialize};

/// Proposal lifecycle status matching the marketplace contract
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ProposalStatus {
    #[default]
    Pending,
    Validated,
    Rejected,
}

/// Seller's offer on a service, keyed by `serviceId-ownerId`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Proposal {
    pub id: String,
    pub status: ProposalStatus,
    pub service: String,
    pub seller: Option<String>,
    pub rate_token: Option<String>,
    pub rate_amount: u128,
    pub platform: Option<String>,
    pub expiration_date: u64,
    pub cid: Option<String>,
    pub description: Option<String>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Proposal {
    pub fn new(id: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: ProposalStatus::Pending,
            service: service.into(),
            seller: None,
            rate_token: None,
            rate_amount: 0,
            platform: None,
            expiration_date: 0,
            cid: None,
            description: None,
            created_at: 0,
            updated_at: 0,
        }
    }
}

impl Entity for Proposal {
    const KIND: EntityKind = EntityKind::Proposal;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Proposal content, keyed by cid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProposalDescription {
    pub id: String,
    pub proposals: Vec<String>,
    pub about: Option<String>,
}

impl ProposalDescription {
    pub fn apply(&mut self, fields: NormalizedFields) {
        if fields.about.is_some() {
            self.about = fields.about;
        }
    }
}

impl Entity for ProposalDescription {
    const KIND: EntityKind = EntityKind::ProposalDescription;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Description for ProposalDescription {
    fn empty(cid: &str) -> Self {
        Self {
            id: cid.to_string(),
            proposals: Vec::new(),
            about: None,
        }
    }

    fn owners(&self) -> &[String] {
        &self.proposals
    }

    fn owners_mut(&mut self) -> &mut Vec<String> {
        &mut self.proposals
    }
}
