//! Deterministic identifiers derived from event parameters

/// Key of the protocol singleton
pub const PROTOCOL_ID: &str = "1";

const SEPARATOR: char = '-';

/// Join two element ids, e.g. `(serviceId, ownerId)` for a proposal.
///
/// Elements are decimal strings, which never contain the separator, so
/// distinct ordered pairs always map to distinct ids.
pub fn composite_id(a: &str, b: &str) -> String {
    let mut id = String::with_capacity(a.len() + b.len() + 1);
    id.push_str(a);
    id.push(SEPARATOR);
    id.push_str(b);
    id
}

/// Id of the description record a fetch is correlated with
pub fn description_record_id(cid: &str, timestamp: u64) -> String {
    composite_id(cid, &timestamp.to_string())
}

/// Addresses are stored as lower-case hex; token ids are their address
pub fn address_id(address: &str) -> String {
    address.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_composite_id_is_deterministic() {
        assert_eq!(composite_id("12", "7"), "12-7");
        assert_eq!(composite_id("12", "7"), composite_id("12", "7"));
    }

    #[test]
    fn test_composite_id_distinct_pairs() {
        let mut seen = HashSet::new();
        for service in 0..40u64 {
            for owner in 0..40u64 {
                let id = composite_id(&service.to_string(), &owner.to_string());
                assert!(seen.insert(id), "collision for ({service}, {owner})");
            }
        }
        // Order matters
        assert_ne!(composite_id("1", "12"), composite_id("12", "1"));
        assert_ne!(composite_id("11", "2"), composite_id("1", "12"));
    }

    #[test]
    fn test_description_record_id() {
        assert_eq!(
            description_record_id("QmXyz", 1_700_000_000),
            "QmXyz-1700000000"
        );
    }

    #[test]
    fn test_address_id_lowercases() {
        assert_eq!(
            address_id("0xAbCDef0000000000000000000000000000000001"),
            "0xabcdef0000000000000000000000000000000001"
        );
    }
}
