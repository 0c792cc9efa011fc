//! Application services
//!
//! Wiring between the ports and the domain processors.

pub mod replay;

pub use replay::{run_replay, ContentWorker, EventLines, ReplaySummary, WorkerStats};
