//! Decoded marketplace contract events

use crate::core::BlockInfo;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Profile id minted for a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserMinted {
    pub id: u64,
    pub address: String,
    pub handle: String,
}

/// Platform id minted for a platform owner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformMinted {
    pub id: u64,
    pub address: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCreated {
    pub id: u64,
    pub owner_id: u64,
    pub platform_id: u64,
    pub data_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetailedUpdated {
    pub id: u64,
    pub data_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProposalCreated {
    pub service_id: u64,
    pub owner_id: u64,
    pub data_uri: String,
    pub rate_token: String,
    pub rate_amount: u128,
    pub platform_id: u64,
    pub expiration_date: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProposalUpdated {
    pub service_id: u64,
    pub owner_id: u64,
    pub data_uri: String,
    pub rate_token: String,
    pub rate_amount: u128,
    pub expiration_date: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AllowedTokenListUpdated {
    pub token_address: String,
    pub status: bool,
    pub minimum_transaction_amount: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MinCompletionPercentageUpdated {
    pub min_completion_percentage: u64,
}

/// Any event the indexer handles.
///
/// Written as `{"type":"<Name>","params":{...}}`. Decoding accepts the two
/// keys in either order and keeps full u128 precision in `params`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", content = "params")]
pub enum IndexerEvent {
    UserMinted(UserMinted),
    PlatformMinted(PlatformMinted),
    ServiceCreated(ServiceCreated),
    ServiceDetailedUpdated(ServiceDetailedUpdated),
    ProposalCreated(ProposalCreated),
    ProposalUpdated(ProposalUpdated),
    AllowedTokenListUpdated(AllowedTokenListUpdated),
    MinCompletionPercentageUpdated(MinCompletionPercentageUpdated),
}

const EVENT_NAMES: &[&str] = &[
    "UserMinted",
    "PlatformMinted",
    "ServiceCreated",
    "ServiceDetailedUpdated",
    "ProposalCreated",
    "ProposalUpdated",
    "AllowedTokenListUpdated",
    "MinCompletionPercentageUpdated",
];

/// Wire shape before the params are typed. `params` is held as raw JSON
/// text so amounts never pass through serde's buffered content.
#[derive(Deserialize)]
struct TaggedEvent {
    #[serde(rename = "type")]
    name: String,
    params: Box<RawValue>,
}

fn params<T: DeserializeOwned>(raw: &RawValue) -> serde_json::Result<T> {
    serde_json::from_str(raw.get())
}

impl<'de> Deserialize<'de> for IndexerEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tagged = TaggedEvent::deserialize(deserializer)?;
        let raw = tagged.params.as_ref();

        let event = match tagged.name.as_str() {
            "UserMinted" => params(raw).map(IndexerEvent::UserMinted),
            "PlatformMinted" => params(raw).map(IndexerEvent::PlatformMinted),
            "ServiceCreated" => params(raw).map(IndexerEvent::ServiceCreated),
            "ServiceDetailedUpdated" => params(raw).map(IndexerEvent::ServiceDetailedUpdated),
            "ProposalCreated" => params(raw).map(IndexerEvent::ProposalCreated),
            "ProposalUpdated" => params(raw).map(IndexerEvent::ProposalUpdated),
            "AllowedTokenListUpdated" => params(raw).map(IndexerEvent::AllowedTokenListUpdated),
            "MinCompletionPercentageUpdated" => {
                params(raw).map(IndexerEvent::MinCompletionPercentageUpdated)
            }
            other => return Err(de::Error::unknown_variant(other, EVENT_NAMES)),
        };
        event.map_err(|e| de::Error::custom(format!("{} params: {}", tagged.name, e)))
    }
}

impl IndexerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            IndexerEvent::UserMinted(_) => "UserMinted",
            IndexerEvent::PlatformMinted(_) => "PlatformMinted",
            IndexerEvent::ServiceCreated(_) => "ServiceCreated",
            IndexerEvent::ServiceDetailedUpdated(_) => "ServiceDetailedUpdated",
            IndexerEvent::ProposalCreated(_) => "ProposalCreated",
            IndexerEvent::ProposalUpdated(_) => "ProposalUpdated",
            IndexerEvent::AllowedTokenListUpdated(_) => "AllowedTokenListUpdated",
            IndexerEvent::MinCompletionPercentageUpdated(_) => "MinCompletionPercentageUpdated",
        }
    }
}

/// An event together with the block it was emitted in.
///
/// One envelope per line in replay files:
/// `{"block":{"number":1,"timestamp":1700000000},"event":{"type":"ServiceCreated","params":{...}}}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventEnvelope {
    pub block: BlockInfo,
    pub event: IndexerEvent,
}

impl EventEnvelope {
    pub fn new(block: BlockInfo, event: IndexerEvent) -> Self {
        Self { block, event }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_from_json_line() {
        let line = r#"{"block":{"number":10,"timestamp":1700000000},"event":{"type":"ProposalCreated","params":{"serviceId":1,"ownerId":2,"dataUri":"QmP","rateToken":"0x00","rateAmount":250,"platformId":1,"expirationDate":1800000000}}}"#;

        let envelope: EventEnvelope = serde_json::from_str(line).unwrap();
        assert_eq!(envelope.block, BlockInfo::new(10, 1_700_000_000));
        assert_eq!(envelope.event.name(), "ProposalCreated");
        match envelope.event {
            IndexerEvent::ProposalCreated(event) => {
                assert_eq!(event.service_id, 1);
                assert_eq!(event.owner_id, 2);
                assert_eq!(event.rate_amount, 250);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_amount_beyond_u64() {
        let line = r#"{"block":{"number":3,"timestamp":9},"event":{"type":"AllowedTokenListUpdated","params":{"tokenAddress":"0xAA","status":true,"minimumTransactionAmount":100000000000000000000}}}"#;

        let envelope: EventEnvelope = serde_json::from_str(line).unwrap();
        match envelope.event {
            IndexerEvent::AllowedTokenListUpdated(event) => {
                assert_eq!(event.minimum_transaction_amount, 100_000_000_000_000_000_000u128);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_params_before_type() {
        let line = r#"{"event":{"params":{"tokenAddress":"0xAA","status":true,"minimumTransactionAmount":100000000000000000000},"type":"AllowedTokenListUpdated"},"block":{"timestamp":9,"number":3}}"#;

        let envelope: EventEnvelope = serde_json::from_str(line).unwrap();
        assert_eq!(envelope.block, BlockInfo::new(3, 9));
        match envelope.event {
            IndexerEvent::AllowedTokenListUpdated(event) => {
                assert!(event.status);
                assert_eq!(event.minimum_transaction_amount, 100_000_000_000_000_000_000u128);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_written_envelope_reads_back() {
        let envelope = EventEnvelope::new(
            BlockInfo::new(7, 70),
            IndexerEvent::ProposalUpdated(ProposalUpdated {
                service_id: 1,
                owner_id: 2,
                data_uri: "QmP".to_string(),
                rate_token: "0x00".to_string(),
                rate_amount: u128::MAX,
                expiration_date: 100,
            }),
        );

        let line = serde_json::to_string(&envelope).unwrap();
        assert_eq!(serde_json::from_str::<EventEnvelope>(&line).unwrap(), envelope);
    }

    #[test]
    fn test_bad_params_are_rejected() {
        let line = r#"{"block":{"number":1,"timestamp":1},"event":{"params":{"id":"one"},"type":"ServiceDetailedUpdated"}}"#;
        assert!(serde_json::from_str::<EventEnvelope>(line).is_err());
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let line = r#"{"block":{"number":1,"timestamp":1},"event":{"type":"ServiceCancelled","params":{"id":1}}}"#;
        assert!(serde_json::from_str::<EventEnvelope>(line).is_err());
    }
}
