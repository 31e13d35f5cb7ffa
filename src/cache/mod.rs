//! Local cache for GET responses
//!
//! Entries are fresh for the configured stale time (5 minutes by default).
//! Mutations drop their scope; logout drops everything.

pub mod key;
pub mod storage;

pub use key::{QueryKey, cache_key};
pub use storage::{CacheStats, CacheStorage, ClearStats};
