//! User and platform models

use crate::core::{Entity, EntityKind};
use serde::{Deserialize, Serialize};

/// Marketplace participant, keyed by profile id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub address: Option<String>,
    pub handle: Option<String>,
    pub created_at: u64,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            address: None,
            handle: None,
            created_at: 0,
        }
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Platform through which services and proposals are posted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Platform {
    pub id: String,
    pub address: Option<String>,
    pub name: Option<String>,
    pub created_at: u64,
}

impl Platform {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            address: None,
            name: None,
            created_at: 0,
        }
    }
}

impl Entity for Platform {
    const KIND: EntityKind = EntityKind::Platform;

    fn id(&self) -> &str {
        &self.id
    }
}
