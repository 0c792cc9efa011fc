//! Content fetch adapters
//!
//! Registration goes through a [`ContentFetcher`](crate::core::ContentFetcher),
//! resolution through a [`ContentSource`](crate::core::ContentSource).

pub mod channel;
pub mod local;
pub mod recording;

pub use channel::ChannelFetcher;
pub use local::LocalContentSource;
pub use recording::RecordingFetcher;
