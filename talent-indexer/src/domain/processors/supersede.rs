//! Retiring the description behind a replaced content hash

use crate::core::{EntityStore, IndexerResult};
use crate::domain::models::Description;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What happens to the old description when its owner moves to a new cid.
///
/// A description is keyed by cid, so two owners publishing identical content
/// share one record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionRetention {
    /// Delete the old record outright, including for any other owner that
    /// still references the same cid.
    #[default]
    Exclusive,
    /// Drop only the updating owner's back-reference; delete the record once
    /// nobody references it.
    Shared,
}

/// Retire `owner`'s claim on the description keyed by `old_cid`.
///
/// A record that was never delivered is a no-op.
pub fn supersede<S, D>(
    store: &S,
    old_cid: &str,
    owner: &str,
    retention: DescriptionRetention,
) -> IndexerResult<()>
where
    S: EntityStore,
    D: Description,
{
    match retention {
        DescriptionRetention::Exclusive => {
            debug!("Removing {} {}", D::KIND, old_cid);
            store.delete::<D>(old_cid)
        }
        DescriptionRetention::Shared => {
            let Some(mut description) = store.load::<D>(old_cid)? else {
                return Ok(());
            };
            description.remove_owner(owner);
            if description.owners().is_empty() {
                debug!("Removing {} {}, no owners left", D::KIND, old_cid);
                store.delete::<D>(old_cid)
            } else {
                debug!(
                    "Keeping {} {} for {} remaining owner(s)",
                    D::KIND,
                    old_cid,
                    description.owners().len()
                );
                store.save(&description)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryStore;
    use crate::domain::models::ServiceDescription;

    fn shared_record(store: &InMemoryStore) {
        let mut description = ServiceDescription::empty("QmOld");
        description.add_owner("1");
        description.add_owner("2");
        store.save(&description).unwrap();
    }

    #[test]
    fn test_exclusive_deletes_for_everyone() {
        let store = InMemoryStore::new();
        shared_record(&store);

        supersede::<_, ServiceDescription>(&store, "QmOld", "1", DescriptionRetention::Exclusive)
            .unwrap();

        assert!(store.load::<ServiceDescription>("QmOld").unwrap().is_none());
    }

    #[test]
    fn test_shared_keeps_other_owners() {
        let store = InMemoryStore::new();
        shared_record(&store);

        supersede::<_, ServiceDescription>(&store, "QmOld", "1", DescriptionRetention::Shared)
            .unwrap();
        let kept = store.load::<ServiceDescription>("QmOld").unwrap().unwrap();
        assert_eq!(kept.services, vec!["2".to_string()]);

        supersede::<_, ServiceDescription>(&store, "QmOld", "2", DescriptionRetention::Shared)
            .unwrap();
        assert!(store.load::<ServiceDescription>("QmOld").unwrap().is_none());
    }

    #[test]
    fn test_missing_record_is_noop() {
        let store = InMemoryStore::new();
        for retention in [DescriptionRetention::Exclusive, DescriptionRetention::Shared] {
            supersede::<_, ServiceDescription>(&store, "QmNever", "1", retention).unwrap();
        }
    }
}
