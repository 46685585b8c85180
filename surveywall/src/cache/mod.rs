//! Persistent key/value cache with expiry-by-age reads.

mod store;

pub use store::FileStore;
