//! In-memory records.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};

use super::RecordBackend;

#[derive(Debug, Default)]
struct MemoryState {
    contents: Option<Vec<u8>>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

/// A record held in process memory.
///
/// Clones share the same record, so a test can keep one handle while a store
/// owns another. Reads and writes can be made to fail on demand.
#[derive(Debug, Clone)]
pub struct MemoryRecord {
    name: PathBuf,
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryRecord {
    /// Create an empty (never written) record.
    #[must_use]
    pub fn new(name: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            state: Arc::default(),
        }
    }

    /// Create a record that already holds `contents`.
    #[must_use]
    pub fn with_contents(name: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        let record = Self::new(name);
        record.lock().contents = Some(contents.into());
        record
    }

    /// The current contents, or `None` if never written.
    #[must_use]
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.lock().contents.clone()
    }

    /// Number of successful replacements so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Make subsequent reads fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl RecordBackend for MemoryRecord {
    fn location(&self) -> &Path {
        &self.name
    }

    async fn read(&self) -> Result<Option<Vec<u8>>> {
        let state = self.lock();
        if state.fail_reads {
            return Err(Error::RecordRead {
                path: self.name.clone(),
                source: std::io::Error::other("injected read failure"),
            });
        }
        Ok(state.contents.clone())
    }

    async fn replace(&self, contents: Vec<u8>) -> Result<()> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(Error::RecordWrite {
                path: self.name.clone(),
                source: std::io::Error::other("injected write failure"),
            });
        }
        state.contents = Some(contents);
        state.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_record_is_empty() {
        let record = MemoryRecord::new("Note.json");
        assert!(record.read().await.unwrap().is_none());
        assert_eq!(record.write_count(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_contents() {
        let record = MemoryRecord::new("Note.json");
        let handle = record.clone();

        record.replace(b"[]".to_vec()).await.unwrap();
        assert_eq!(handle.contents(), Some(b"[]".to_vec()));
        assert_eq!(handle.write_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_contents() {
        let record = MemoryRecord::with_contents("Note.json", "[1]");
        record.set_fail_writes(true);

        let err = record.replace(b"[2]".to_vec()).await.unwrap_err();
        assert!(err.is_io_error());
        assert_eq!(record.contents(), Some(b"[1]".to_vec()));
        assert_eq!(record.write_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_read() {
        let record = MemoryRecord::with_contents("Note.json", "[1]");
        record.set_fail_reads(true);
        assert!(matches!(record.read().await, Err(Error::RecordRead { .. })));

        record.set_fail_reads(false);
        assert!(record.read().await.unwrap().is_some());
    }
}
