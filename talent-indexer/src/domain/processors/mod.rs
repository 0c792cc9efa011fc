//! Domain processors
//!
//! Event processors derive and update entities from decoded events and
//! register content fetches; the content processor turns fetched payloads
//! into description records.

mod account;
mod config;
mod content;
mod proposal;
mod registry;
mod service;
mod supersede;

pub use account::AccountProcessor;
pub use config::ConfigProcessor;
pub use content::{ContentProcessor, Delivery};
pub use proposal::ProposalProcessor;
pub use registry::ProcessorRegistry;
pub use service::ServiceProcessor;
pub use supersede::{supersede, DescriptionRetention};
