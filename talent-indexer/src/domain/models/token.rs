//! Token allow-list and protocol settings

use crate::core::{Entity, EntityKind};
use serde::{Deserialize, Serialize};

/// Payment token, keyed by lower-case address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub id: String,
    pub allowed: bool,
    pub minimum_transaction_amount: u128,
}

impl Token {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            allowed: false,
            minimum_transaction_amount: 0,
        }
    }
}

impl Entity for Token {
    const KIND: EntityKind = EntityKind::Token;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Protocol-wide settings. There is exactly one, under [`PROTOCOL_ID`](crate::domain::ids::PROTOCOL_ID).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Protocol {
    pub id: String,
    pub min_service_completion_percentage: u64,
}

impl Protocol {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            min_service_completion_percentage: 0,
        }
    }
}

impl Entity for Protocol {
    const KIND: EntityKind = EntityKind::Protocol;

    fn id(&self) -> &str {
        &self.id
    }
}
