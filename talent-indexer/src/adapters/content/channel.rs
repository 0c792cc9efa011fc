//! Fetch registration over a tokio channel

use crate::core::{ContentFetcher, FetchRequest, IndexerError, IndexerResult};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// Hands fetch requests to the content worker task.
///
/// Unbounded so that registering never blocks an event handler.
#[derive(Debug, Clone)]
pub struct ChannelFetcher {
    sender: UnboundedSender<FetchRequest>,
}

impl ChannelFetcher {
    /// Create a fetcher and the receiver the worker drains
    pub fn new() -> (Self, UnboundedReceiver<FetchRequest>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ContentFetcher for ChannelFetcher {
    fn register_fetch(&self, request: FetchRequest) -> IndexerResult<()> {
        debug!("Registering {} fetch for {}", request.template, request.cid);
        let cid = request.cid.clone();
        self.sender.send(request).map_err(|_| IndexerError::Fetch {
            cid,
            reason: "content worker has shut down".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ContentTemplate, CorrelationContext};

    #[tokio::test]
    async fn test_requests_arrive_in_order() {
        let (fetcher, mut receiver) = ChannelFetcher::new();
        for cid in ["QmA", "QmB"] {
            fetcher
                .register_fetch(FetchRequest::new(
                    ContentTemplate::ServiceData,
                    cid,
                    CorrelationContext::for_service("1", cid),
                ))
                .unwrap();
        }

        assert_eq!(receiver.recv().await.unwrap().cid, "QmA");
        assert_eq!(receiver.recv().await.unwrap().cid, "QmB");
    }

    #[test]
    fn test_closed_worker_is_an_error() {
        let (fetcher, receiver) = ChannelFetcher::new();
        drop(receiver);

        let err = fetcher
            .register_fetch(FetchRequest::new(
                ContentTemplate::ProposalData,
                "QmGone",
                CorrelationContext::for_proposal("1-1", "QmGone-1"),
            ))
            .unwrap_err();
        assert!(matches!(err, IndexerError::Fetch { ref cid, .. } if cid == "QmGone"));
    }
}
