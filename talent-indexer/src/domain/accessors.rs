//! Get-or-create and load helpers for every entity type
//!
//! `get_or_create_*` returns a fresh, unsaved entity on a miss so the caller
//! can fill in fields and persist once. `load_*` is for entities an earlier
//! event must have created; a miss there is an ordering bug upstream and
//! surfaces as [`IndexerError::MissingUpstreamEntity`].

use crate::core::{Entity, EntityStore, IndexerError, IndexerResult};
use crate::domain::ids::{address_id, PROTOCOL_ID};
use crate::domain::models::{Platform, Proposal, Protocol, Service, Token, User};

fn require<S: EntityStore, E: Entity>(store: &S, id: &str) -> IndexerResult<E> {
    store
        .load::<E>(id)
        .and_then(|entity| entity.ok_or_else(|| IndexerError::missing(E::KIND, id)))
}

pub fn get_or_create_user<S: EntityStore>(store: &S, owner_id: u64) -> IndexerResult<User> {
    let id = owner_id.to_string();
    Ok(store.load::<User>(&id)?.unwrap_or_else(|| User::new(id)))
}

pub fn load_user<S: EntityStore>(store: &S, owner_id: u64) -> IndexerResult<User> {
    require(store, &owner_id.to_string())
}

pub fn get_or_create_platform<S: EntityStore>(store: &S, platform_id: u64) -> IndexerResult<Platform> {
    let id = platform_id.to_string();
    Ok(store.load::<Platform>(&id)?.unwrap_or_else(|| Platform::new(id)))
}

pub fn load_platform<S: EntityStore>(store: &S, platform_id: u64) -> IndexerResult<Platform> {
    require(store, &platform_id.to_string())
}

pub fn get_or_create_token<S: EntityStore>(store: &S, address: &str) -> IndexerResult<Token> {
    let id = address_id(address);
    Ok(store.load::<Token>(&id)?.unwrap_or_else(|| Token::new(id)))
}

pub fn get_or_create_protocol<S: EntityStore>(store: &S) -> IndexerResult<Protocol> {
    Ok(store
        .load::<Protocol>(PROTOCOL_ID)?
        .unwrap_or_else(|| Protocol::new(PROTOCOL_ID)))
}

pub fn get_or_create_service<S: EntityStore>(store: &S, service_id: u64) -> IndexerResult<Service> {
    let id = service_id.to_string();
    Ok(store.load::<Service>(&id)?.unwrap_or_else(|| Service::new(id)))
}

pub fn load_service<S: EntityStore>(store: &S, service_id: u64) -> IndexerResult<Service> {
    require(store, &service_id.to_string())
}

pub fn get_or_create_proposal<S: EntityStore>(
    store: &S,
    proposal_id: &str,
    service_id: u64,
) -> IndexerResult<Proposal> {
    Ok(store
        .load::<Proposal>(proposal_id)?
        .unwrap_or_else(|| Proposal::new(proposal_id, service_id.to_string())))
}

pub fn load_proposal<S: EntityStore>(store: &S, proposal_id: &str) -> IndexerResult<Proposal> {
    require(store, proposal_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryStore;
    use crate::core::EntityKind;

    #[test]
    fn test_get_or_create_does_not_persist() {
        let store = InMemoryStore::new();

        let user = get_or_create_user(&store, 5).unwrap();
        assert_eq!(user.id, "5");
        assert_eq!(store.count(EntityKind::User), 0);

        let token = get_or_create_token(&store, "0xABC").unwrap();
        assert_eq!(token.id, "0xabc");
        assert!(!token.allowed);
        assert_eq!(token.minimum_transaction_amount, 0);
        assert_eq!(store.count(EntityKind::Token), 0);
    }

    #[test]
    fn test_get_or_create_returns_stored_entity() {
        let store = InMemoryStore::new();
        let mut token = Token::new("0xabc");
        token.allowed = true;
        store.save(&token).unwrap();

        let loaded = get_or_create_token(&store, "0xAbC").unwrap();
        assert!(loaded.allowed);
    }

    #[test]
    fn test_load_missing_is_fatal() {
        let store = InMemoryStore::new();

        let err = load_user(&store, 9).unwrap_err();
        assert!(matches!(
            err,
            IndexerError::MissingUpstreamEntity { kind: EntityKind::User, ref id } if id == "9"
        ));
        assert!(err.is_fatal());

        assert!(load_proposal(&store, "1-9").is_err());
        assert!(load_platform(&store, 1).is_err());
        assert!(load_service(&store, 1).is_err());
    }

    #[test]
    fn test_protocol_singleton_key() {
        let store = InMemoryStore::new();
        let protocol = get_or_create_protocol(&store).unwrap();
        assert_eq!(protocol.id, PROTOCOL_ID);
        assert_eq!(protocol.min_service_completion_percentage, 0);
    }

    #[test]
    fn test_new_proposal_references_service() {
        let store = InMemoryStore::new();
        let proposal = get_or_create_proposal(&store, "4-2", 4).unwrap();
        assert_eq!(proposal.service, "4");
    }
}
