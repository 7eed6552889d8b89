//! Backing records for list stores.
//!
//! A backing record is one opaque blob per record type. It is always read and
//! replaced as a whole; there is no append, no partial update, no versioning.
//!
//! - [`FileRecord`] keeps the blob in a file and replaces it atomically.
//! - [`MemoryRecord`] keeps it in process memory and can inject failures.

mod file;
mod memory;

use std::path::Path;

use crate::error::Result;

pub use file::FileRecord;
pub use memory::MemoryRecord;

/// A durable, whole-blob record owned by a single store.
#[async_trait::async_trait]
pub trait RecordBackend: Send + Sync + std::fmt::Debug {
    /// Where the record lives, used in error messages and logs.
    fn location(&self) -> &Path;

    /// Read the full record.
    ///
    /// Returns `None` if the record has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read.
    async fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the full record with `contents`.
    ///
    /// Either the new contents are fully visible afterwards, or the previous
    /// contents are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be replaced.
    async fn replace(&self, contents: Vec<u8>) -> Result<()>;
}
