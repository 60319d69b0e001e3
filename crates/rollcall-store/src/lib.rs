//! Persistent key-value storage for Rollcall.
//!
//! The portal keeps two entries across reloads: the raw bearer token and
//! the serialized user identity. This crate defines the [`Store`] trait
//! they live behind, plus two implementations:
//!
//! - [`MemoryStore`] — in-process map; used in tests and short-lived tools.
//! - [`FileStore`] — a JSON file with write-through persistence; the
//!   reload-durable equivalent of browser local storage.
//!
//! All operations are synchronous. There is no transaction support beyond
//! single-key atomicity; the session layer is the only writer of the token
//! and identity entries and always writes or removes them together.

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Store key for the raw bearer token string.
pub const TOKEN_KEY: &str = "token";

/// Store key for the JSON-serialized user identity.
pub const USER_KEY: &str = "user";

/// A synchronous, reload-durable key-value store.
///
/// Implementations take `&self` and provide their own interior mutability,
/// so a single store instance can be shared between the session manager
/// and the API client.
pub trait Store: Send + Sync + 'static {
    /// Reads the value for `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
