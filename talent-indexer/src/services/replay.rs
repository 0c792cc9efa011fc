//! Replay of a recorded event stream through the indexing pipeline
//!
//! Events are read from a JSON-lines file and handled in order. Fetch
//! registrations flow over a channel to the content worker, which is drained
//! on the same task after every event, so description records are never
//! read-modified-written by two handlers at once.

use crate::adapters::content::ChannelFetcher;
use crate::core::{ContentSource, EntityStore, FetchRequest, IndexerError, IndexerResult};
use crate::domain::events::EventEnvelope;
use crate::domain::processors::{ContentProcessor, DescriptionRetention, ProcessorRegistry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info, warn};

/// Counters kept by the content worker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub delivered: u64,
    pub unresolved: u64,
}

/// Result of a full replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: u64,
    pub content: WorkerStats,
}

/// Decoded events of a JSON-lines file, in file order. Blank lines are skipped.
pub struct EventLines {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_number: u64,
}

impl EventLines {
    pub async fn open(path: &Path) -> IndexerResult<Self> {
        let file = File::open(path).await.map_err(|e| {
            anyhow::Error::new(e).context(format!("Failed to open events file {}", path.display()))
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            line_number: 0,
        })
    }

    /// Next event, `None` at end of file
    pub async fn next_event(&mut self) -> IndexerResult<Option<EventEnvelope>> {
        while let Some(line) = self.lines.next_line().await.map_err(|e| {
            anyhow::Error::new(e).context(format!("Failed to read {}", self.path.display()))
        })? {
            self.line_number += 1;
            if line.trim().is_empty() {
                continue;
            }

            let envelope = serde_json::from_str(&line).map_err(|e| {
                IndexerError::Deserialization(format!("line {}: {}", self.line_number, e))
            })?;
            return Ok(Some(envelope));
        }
        Ok(None)
    }
}

/// Resolves registered fetches and hands their payloads to the content handlers
pub struct ContentWorker<S: EntityStore, C: ContentSource> {
    source: Arc<C>,
    processor: ContentProcessor<S>,
    stats: WorkerStats,
}

impl<S: EntityStore, C: ContentSource> ContentWorker<S, C> {
    pub fn new(source: Arc<C>, processor: ContentProcessor<S>) -> Self {
        Self {
            source,
            processor,
            stats: WorkerStats::default(),
        }
    }

    pub fn stats(&self) -> WorkerStats {
        self.stats
    }

    /// Resolve and deliver one request.
    ///
    /// An unresolvable cid is logged and dropped. A fatal delivery error is
    /// returned and must stop indexing.
    pub async fn handle(&mut self, request: FetchRequest) -> IndexerResult<()> {
        let payload = match self.source.resolve(&request.cid).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                warn!("Content {} unavailable, {} not delivered", request.cid, request.template);
                self.stats.unresolved += 1;
                return Ok(());
            }
            Err(e) => {
                warn!("Fetching {} failed: {}", request.cid, e);
                self.stats.unresolved += 1;
                return Ok(());
            }
        };

        match self.processor.deliver(&request, &payload) {
            Ok(()) => {
                debug!("Delivered {} for {}", request.template, request.cid);
                self.stats.delivered += 1;
                Ok(())
            }
            Err(e) if e.is_fatal() => {
                error!("Delivering {} for {} failed: {}", request.template, request.cid, e);
                Err(e)
            }
            Err(e) => {
                warn!("Delivering {} for {} skipped: {}", request.template, request.cid, e);
                Ok(())
            }
        }
    }

    /// Handle every request queued so far, returning how many were taken
    pub async fn drain(&mut self, receiver: &mut UnboundedReceiver<FetchRequest>) -> IndexerResult<usize> {
        let mut handled = 0;
        while let Ok(request) = receiver.try_recv() {
            self.handle(request).await?;
            handled += 1;
        }
        Ok(handled)
    }
}

/// Replay `events` against `store`, resolving content from `source`.
///
/// Content registered by an event is delivered before the next event is
/// handled. A fatal error from either side stops the replay.
pub async fn run_replay<S, C>(
    store: Arc<S>,
    source: Arc<C>,
    events: &Path,
    retention: DescriptionRetention,
) -> IndexerResult<ReplaySummary>
where
    S: EntityStore,
    C: ContentSource,
{
    let (fetcher, mut receiver) = ChannelFetcher::new();
    let registry = ProcessorRegistry::new(store.clone(), Arc::new(fetcher), retention);
    let mut worker = ContentWorker::new(source, ContentProcessor::new(store));
    let mut lines = EventLines::open(events).await?;
    let mut processed = 0u64;

    while let Some(envelope) = lines.next_event().await? {
        if let Err(e) = registry.process(&envelope) {
            error!(
                "{} in block {} failed: {}",
                envelope.event.name(),
                envelope.block.number,
                e
            );
            return Err(e);
        }
        processed += 1;
        worker.drain(&mut receiver).await?;
    }

    let content = worker.stats();
    info!("Replayed {} events from {}", processed, events.display());
    info!(
        "Content: {} delivered, {} unresolved",
        content.delivered, content.unresolved
    );

    Ok(ReplaySummary {
        events: processed,
        content,
    })
}
