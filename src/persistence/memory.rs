use std::collections::HashMap;

use anyhow::{Result, bail};

use super::BlobStore;

/// In-process blob store; the backend for tests and embedders without disk access.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read fail, simulating unavailable storage.
    pub fn with_failing_reads(mut self, fail: bool) -> Self {
        self.fail_reads = fail;
        self
    }

    /// Make every write and removal fail, simulating a full or read-only store.
    pub fn with_failing_writes(mut self, fail: bool) -> Self {
        self.fail_writes = fail;
        self
    }

    pub fn set_failing_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn contains(&self, key: &str) -> bool {
        self.blobs.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            bail!("storage unavailable while reading '{key}'");
        }
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, blob: &str) -> Result<()> {
        if self.fail_writes {
            bail!("storage quota exceeded while writing '{key}'");
        }
        self.blobs.insert(key.to_string(), blob.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.fail_writes {
            bail!("storage unavailable while removing '{key}'");
        }
        self.blobs.remove(key);
        Ok(())
    }
}
