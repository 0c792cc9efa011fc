//! Domain layer - business logic and domain models
//!
//! This layer contains the core business logic of the indexer,
//! independent of infrastructure concerns like databases or fetchers.

pub mod accessors;
pub mod events;
pub mod ids;
pub mod models;
pub mod normalizer;
pub mod processors;

// Re-export commonly used items
pub use events::{EventEnvelope, IndexerEvent};
pub use models::*;
