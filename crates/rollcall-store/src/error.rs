//! Error types for the storage layer.

/// Errors that can occur while reading or writing the store.
///
/// [`MemoryStore`](crate::MemoryStore) never produces these;
/// [`FileStore`](crate::FileStore) can hit I/O and encoding failures.
/// The session layer degrades both to "key absent" rather than
/// propagating them.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not contain a valid JSON object.
    #[error("store file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
