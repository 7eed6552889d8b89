//! File-backed records.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::RecordBackend;

/// A record stored as a single file.
///
/// Writes go to a temporary file in the same directory, which is synced and
/// then renamed over the target, so readers only ever see a complete record.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Path to the record file.
    path: PathBuf,
    /// Create missing parent directories before writing.
    create_dirs: bool,
}

impl FileRecord {
    /// Create a record at the given path.
    ///
    /// Nothing touches the filesystem until the first read or write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_dirs: true,
        }
    }

    /// Set whether missing parent directories are created on write.
    #[must_use]
    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }

    /// Get the path to the record file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_atomic(&self, contents: &[u8]) -> Result<()> {
        let dir = self.parent_dir();

        if self.create_dirs && !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
                path: dir.to_path_buf(),
                source,
            })?;
            info!("Created record directory {}", dir.display());
        }

        let write_err = |source: std::io::Error| Error::RecordWrite {
            path: self.path.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(contents).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|err| write_err(err.error))?;

        debug!("Replaced {} ({} bytes)", self.path.display(), contents.len());
        Ok(())
    }
}

#[async_trait::async_trait]
impl RecordBackend for FileRecord {
    fn location(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No record at {} yet", self.path.display());
                Ok(None)
            }
            Err(source) => Err(Error::RecordRead {
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn replace(&self, contents: Vec<u8>) -> Result<()> {
        let record = self.clone();
        tokio::task::spawn_blocking(move || record.write_atomic(&contents))
            .await
            .map_err(|err| Error::internal(format!("record writer failed: {err}")))?
    }
}
