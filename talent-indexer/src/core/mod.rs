//! Core domain abstractions and types
//!
//! This module contains the foundational types, traits, and error definitions
//! that form the core of the indexer's domain model. It's designed to be
//! independent of any specific infrastructure concerns.

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items
pub use error::{IndexerError, IndexerResult, StorageError};
pub use traits::{ContentFetcher, ContentSource, Entity, EntityStore};
pub use types::{BlockInfo, ContentTemplate, CorrelationContext, EntityKind, FetchRequest};
