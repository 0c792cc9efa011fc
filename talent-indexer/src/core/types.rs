//! Core domain types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Block information carried by every event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockInfo {
    pub number: u64,
    pub timestamp: u64,
}

impl BlockInfo {
    pub fn new(number: u64, timestamp: u64) -> Self {
        Self { number, timestamp }
    }
}

/// Entity types known to the store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    User,
    Platform,
    Token,
    Protocol,
    Service,
    Proposal,
    ServiceDescription,
    ProposalDescription,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::User,
        EntityKind::Platform,
        EntityKind::Token,
        EntityKind::Protocol,
        EntityKind::Service,
        EntityKind::Proposal,
        EntityKind::ServiceDescription,
        EntityKind::ProposalDescription,
    ];

    /// Storage namespace for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Platform => "platforms",
            EntityKind::Token => "tokens",
            EntityKind::Protocol => "protocols",
            EntityKind::Service => "services",
            EntityKind::Proposal => "proposals",
            EntityKind::ServiceDescription => "service_descriptions",
            EntityKind::ProposalDescription => "proposal_descriptions",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::User => "User",
            EntityKind::Platform => "Platform",
            EntityKind::Token => "Token",
            EntityKind::Protocol => "Protocol",
            EntityKind::Service => "Service",
            EntityKind::Proposal => "Proposal",
            EntityKind::ServiceDescription => "ServiceDescription",
            EntityKind::ProposalDescription => "ProposalDescription",
        };
        write!(f, "{}", name)
    }
}

/// Key-value payload attached to a fetch and echoed back unchanged on delivery.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorrelationContext(BTreeMap<String, String>);

impl CorrelationContext {
    pub const RECORD_ID: &'static str = "id";
    pub const SERVICE_ID: &'static str = "serviceId";
    pub const PROPOSAL_ID: &'static str = "proposalId";

    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a service description fetch
    pub fn for_service(service_id: &str, record_id: &str) -> Self {
        Self::new()
            .with(Self::SERVICE_ID, service_id)
            .with(Self::RECORD_ID, record_id)
    }

    /// Context for a proposal description fetch
    pub fn for_proposal(proposal_id: &str, record_id: &str) -> Self {
        Self::new()
            .with(Self::PROPOSAL_ID, proposal_id)
            .with(Self::RECORD_ID, record_id)
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn record_id(&self) -> Option<&str> {
        self.get(Self::RECORD_ID)
    }
}

/// Which content handler a fetched payload is delivered to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContentTemplate {
    ServiceData,
    ProposalData,
}

impl fmt::Display for ContentTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentTemplate::ServiceData => write!(f, "ServiceData"),
            ContentTemplate::ProposalData => write!(f, "ProposalData"),
        }
    }
}

/// A content fetch registered by an event handler
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetchRequest {
    pub template: ContentTemplate,
    pub cid: String,
    pub context: CorrelationContext,
}

impl FetchRequest {
    pub fn new(template: ContentTemplate, cid: impl Into<String>, context: CorrelationContext) -> Self {
        Self {
            template,
            cid: cid.into(),
            context,
        }
    }
}
