//! Domain models
//!
//! Entities of the marketplace graph. Each type maps to one storage namespace
//! (see [`EntityKind`](crate::core::EntityKind)).

pub mod account;
pub mod proposal;
pub mod service;
pub mod token;

pub use account::{Platform, User};
pub use proposal::{Proposal, ProposalDescription, ProposalStatus};
pub use service::{Service, ServiceDescription, ServiceStatus};
pub use token::{Protocol, Token};

use crate::core::Entity;

/// A description record keyed by cid and shared by every owner that
/// references the same content.
pub trait Description: Entity {
    /// Empty record for a cid
    fn empty(cid: &str) -> Self;

    /// Owner ids in first-delivery order
    fn owners(&self) -> &[String];

    fn owners_mut(&mut self) -> &mut Vec<String>;

    /// Append an owner unless already present. Returns true if added.
    fn add_owner(&mut self, owner: &str) -> bool {
        if self.owners().iter().any(|o| o == owner) {
            return false;
        }
        self.owners_mut().push(owner.to_string());
        true
    }

    /// Remove an owner. Returns true if it was present.
    fn remove_owner(&mut self, owner: &str) -> bool {
        let owners = self.owners_mut();
        let before = owners.len();
        owners.retain(|o| o != owner);
        owners.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_owner_is_append_if_absent() {
        let mut description = ServiceDescription::empty("QmShared");
        assert!(description.add_owner("1"));
        assert!(description.add_owner("2"));
        assert!(!description.add_owner("1"));
        assert_eq!(description.owners(), ["1", "2"]);
    }

    #[test]
    fn test_remove_owner_keeps_order() {
        let mut description = ProposalDescription::empty("QmShared");
        description.add_owner("1-4");
        description.add_owner("2-4");
        description.add_owner("3-4");
        assert!(description.remove_owner("2-4"));
        assert!(!description.remove_owner("2-4"));
        assert_eq!(description.owners(), ["1-4", "3-4"]);
    }
}
