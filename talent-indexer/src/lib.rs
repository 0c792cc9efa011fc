//! Talent Marketplace Indexer Library
//!
//! Maps marketplace contract events (services, proposals, token allow-list
//! and protocol settings) onto an entity graph, and enriches services and
//! proposals with description content fetched by IPFS cid.
//!
//! - [`domain::processors::ProcessorRegistry`] handles events in log order
//! - [`domain::processors::ContentProcessor`] handles fetched content
//! - [`adapters`] provides RocksDB/in-memory stores and fetch plumbing
//! - [`services::run_replay`] wires everything for a recorded event stream

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod services;

// Re-export commonly used types
pub use crate::config::IndexerConfig;
pub use crate::core::{IndexerError, IndexerResult};
pub use crate::domain::processors::{ContentProcessor, DescriptionRetention, ProcessorRegistry};
