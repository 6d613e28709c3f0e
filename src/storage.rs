//! Storage
//!
//! Durable string key/value storage for cart collections and session flags.
//! Values are raw text so that corrupt entries can be read back and discarded
//! by the caller instead of failing at the storage layer.

use thiserror::Error;

pub mod file;
pub mod memory;
pub mod session;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use session::{AGE_VERIFIED_KEY, AGE_VERIFIED_MARKER, AgeGate};

/// Errors raised by the file-backed store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading, writing or deleting an entry failed.
    #[error("storage I/O failed for key {key:?}: {source}")]
    Io {
        /// Entry key
        key: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// The key cannot be mapped to a storage location.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}

/// A string key/value store.
pub trait KeyValueStore {
    /// Error raised by the backing store
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Delete the value stored under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be deleted.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    type Error = S::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        (**self).remove(key)
    }
}
