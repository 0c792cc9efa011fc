//! Fetcher that only records registrations

use crate::core::{ContentFetcher, FetchRequest, IndexerResult, StorageError};
use std::sync::Mutex;

/// Keeps every registered request so callers can deliver them by hand
#[derive(Debug, Default)]
pub struct RecordingFetcher {
    requests: Mutex<Vec<FetchRequest>>,
}

impl RecordingFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests registered so far
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Most recent request for `cid`
    pub fn last_for(&self, cid: &str) -> Option<FetchRequest> {
        self.requests().into_iter().rev().find(|r| r.cid == cid)
    }
}

impl ContentFetcher for RecordingFetcher {
    fn register_fetch(&self, request: FetchRequest) -> IndexerResult<()> {
        self.requests
            .lock()
            .map_err(|_| StorageError::LockPoisoned)?
            .push(request);
        Ok(())
    }
}
