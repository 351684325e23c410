mod file;
mod memory;
mod snapshot;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::form::FormState;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;
pub use snapshot::{decode_snapshot, encode_snapshot, snapshot_schema};

/// Storage key the form collection is saved under unless configured otherwise.
pub const STORAGE_KEY: &str = "formBuilderState";

/// Opaque key/value storage holding one string blob per key.
pub trait BlobStore {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, blob: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<T: BlobStore + ?Sized> BlobStore for Box<T> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, blob: &str) -> Result<()> {
        (**self).write(key, blob)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Best-effort adapter between a [`FormState`] and a [`BlobStore`].
///
/// Nothing here reports failure to the caller: unreadable blobs load as
/// `None` and failed writes are logged and dropped.
#[derive(Debug)]
pub struct PersistenceBridge<B> {
    backend: B,
    key: String,
}

impl<B: BlobStore> PersistenceBridge<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn load(&self) -> Option<FormState> {
        match self.try_load() {
            Ok(state) => state,
            Err(err) => {
                warn!(key = %self.key, error = %format!("{err:#}"), "failed to load form state");
                None
            }
        }
    }

    pub fn save(&mut self, state: &FormState) {
        if let Err(err) = self.try_save(state) {
            warn!(key = %self.key, error = %format!("{err:#}"), "failed to save form state");
        }
    }

    pub fn clear(&mut self) {
        match self.backend.remove(&self.key) {
            Ok(()) => debug!(key = %self.key, "cleared saved form state"),
            Err(err) => {
                warn!(key = %self.key, error = %format!("{err:#}"), "failed to clear form state")
            }
        }
    }

    fn try_load(&self) -> Result<Option<FormState>> {
        let Some(blob) = self.backend.read(&self.key)? else {
            return Ok(None);
        };
        decode_snapshot(&blob)
            .with_context(|| format!("stored blob under '{}' is unreadable", self.key))
            .map(Some)
    }

    fn try_save(&mut self, state: &FormState) -> Result<()> {
        let blob = encode_snapshot(state)?;
        self.backend.write(&self.key, &blob)?;
        debug!(key = %self.key, fields = state.len(), "saved form state");
        Ok(())
    }
}
