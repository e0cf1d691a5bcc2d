//! Durable key-value storage for the Freshen client.
//!
//! Values are opaque strings (callers store serialized JSON). Two backends:
//! a directory of files for real hosts, and an in-memory map.

pub mod local;
pub mod memory;
pub mod traits;

pub use local::LocalKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use traits::{KeyValueStore, StorageError, StorageResult};
