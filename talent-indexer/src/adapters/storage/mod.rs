//! Storage adapters
//!
//! Both adapters encode entities with bincode and address them by
//! entity kind + id.

pub mod memory;
pub mod rocksdb;

pub use memory::InMemoryStore;
pub use rocksdb::{ColumnFamilies, RocksDBClient};
