//! Infrastructure adapters
//!
//! Implementations of the core ports: entity stores and the two sides of the
//! content fetch subsystem.

pub mod content;
pub mod storage;
