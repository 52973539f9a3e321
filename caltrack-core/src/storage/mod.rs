//! Persistence of the application state as a single serialized record.

mod error;
mod kv;
mod state_store;

pub use error::StoreError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use state_store::{StateStore, CORRUPT_SUFFIX, STATE_KEY};
