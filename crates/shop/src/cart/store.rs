//! Cart persistence stores.
//!
//! The cart persists as a single named slot of text (the serialized
//! ledger). Reads happen once at startup; every ledger mutation writes the
//! slot in full. Writes are fire-and-forget from the ledger's point of
//! view: failures are logged and the session continues.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

/// Errors that can occur reading or writing the cart slot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// In-memory slot lock poisoned.
    #[error("store lock poisoned")]
    Poisoned,
}

/// A single named slot of text holding the serialized cart.
pub trait CartStore {
    /// Read the slot. `Ok(None)` means the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the slot exists but cannot be read.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replace the slot contents.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the slot cannot be written.
    fn save(&self, blob: &str) -> Result<(), StoreError>;
}

// =============================================================================
// File store
// =============================================================================

/// Cart slot backed by a single file on disk.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    path: PathBuf,
}

impl FileCartStore {
    /// Create a store persisting to the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStore for FileCartStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, blob: &str) -> Result<(), StoreError> {
        std::fs::write(&self.path, blob).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

// =============================================================================
// Memory store
// =============================================================================

/// Cart slot held in memory. Used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    slot: Mutex<Option<String>>,
}

impl MemoryCartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with slot contents.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(blob.into())),
        }
    }

    /// Current slot contents, for assertions.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the slot lock is poisoned.
    pub fn snapshot(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.lock().map_err(|_| StoreError::Poisoned)?.clone())
    }
}

impl CartStore for MemoryCartStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        self.snapshot()
    }

    fn save(&self, blob: &str) -> Result<(), StoreError> {
        *self.slot.lock().map_err(|_| StoreError::Poisoned)? = Some(blob.to_string());
        Ok(())
    }
}
