//! File-backed list stores.
//!
//! A [`ListStore`] owns the ordered collection for one [`Listable`] type and
//! mirrors the whole collection to its backing record after every mutation.
//!
//! Every operation is fire-and-forget: it is queued to the store's single
//! worker task and applied strictly in call order. Callers observe results
//! only through the published [`Loadable`] state.
//!
//! # Example
//!
//! ```no_run
//! # use capturelist::{ListStore, SampleEntry};
//! # async fn demo() -> capturelist::Result<()> {
//! let store = ListStore::<SampleEntry>::in_dir("/tmp/capturelist");
//! store.insert(SampleEntry::new("", "Blue", "Daisy"));
//! store.delete_all();
//!
//! // Operations apply in call order, so this is always empty.
//! let state = store.wait_settled().await?;
//! assert_eq!(state.value().map(Vec::len), Some(0));
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::listable::{Listable, Loadable};
use crate::storage::{FileRecord, RecordBackend};

/// How a collection is encoded in its backing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFormat {
    /// Compact JSON.
    #[default]
    Compact,
    /// Indented JSON.
    Pretty,
}

/// The published state of a store.
pub type ListState<T> = Loadable<Vec<T>>;

#[derive(Debug)]
enum Operation<T> {
    Load,
    Insert(T),
    Update(T),
    Delete(T),
    DeleteAll,
    Flush(oneshot::Sender<()>),
}

/// A list of records mirrored to a single backing record.
///
/// Cloning a store yields another handle to the same collection and worker.
/// The worker stops once every handle is dropped and its queue is drained.
#[derive(Debug)]
pub struct ListStore<T: Listable> {
    ops: mpsc::UnboundedSender<Operation<T>>,
    state: watch::Receiver<ListState<T>>,
    location: PathBuf,
}

impl<T: Listable> Clone for ListStore<T> {
    fn clone(&self) -> Self {
        Self {
            ops: self.ops.clone(),
            state: self.state.clone(),
            location: self.location.clone(),
        }
    }
}

impl<T: Listable> ListStore<T> {
    /// Open a store whose record lives in `dir`, named after the record type.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::open(dir.as_ref().join(T::record_filename()))
    }

    /// Open a store whose record is the file at `path`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_backend(FileRecord::new(path), RecordFormat::default())
    }

    /// Open a store in `dir` with an explicit record file name.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn open_with_filename(dir: impl AsRef<Path>, filename: &str) -> Self {
        Self::open(dir.as_ref().join(filename))
    }

    /// Open a store over any backing record.
    ///
    /// Spawns the store's worker and queues the initial load.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn with_backend(backend: impl RecordBackend + 'static, format: RecordFormat) -> Self {
        let location = backend.location().to_path_buf();
        let (ops_tx, ops_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(Loadable::None);

        let worker = Worker {
            backend: Arc::new(backend),
            format,
            state: state_tx,
        };
        tokio::spawn(worker.run(ops_rx));

        let store = Self {
            ops: ops_tx,
            state: state_rx,
            location,
        };
        store.load();
        store
    }

    /// Where the backing record lives.
    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Re-read the backing record.
    ///
    /// Publishes `Loading`, then `Loaded` with the record's contents (empty if
    /// the record does not exist) or `Error` if it cannot be read or decoded.
    pub fn load(&self) {
        self.dispatch(Operation::Load);
    }

    /// Insert `item` at the front of the collection.
    ///
    /// If the store is not `Loaded`, the collection is treated as empty.
    pub fn insert(&self, item: T) {
        self.dispatch(Operation::Insert(item));
    }

    /// Replace the record with the same identity as `item`.
    ///
    /// Every item whose identity matches is replaced; identities are unique,
    /// so that is the first and only match. Does nothing unless the store is
    /// `Loaded`.
    pub fn update(&self, item: T) {
        self.dispatch(Operation::Update(item));
    }

    /// Remove the record with the same identity as `item`.
    ///
    /// Does nothing unless the store is `Loaded`.
    pub fn delete(&self, item: &T) {
        self.dispatch(Operation::Delete(item.clone()));
    }

    /// Persist and publish an empty collection, whatever the current state.
    pub fn delete_all(&self) {
        self.dispatch(Operation::DeleteAll);
    }

    /// A snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ListState<T> {
        self.state.borrow().clone()
    }

    /// The current collection, if the store is `Loaded`.
    #[must_use]
    pub fn items(&self) -> Option<Vec<T>> {
        self.state.borrow().value().cloned()
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.state.clone()
    }

    /// Wait until every operation issued before this call has been applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreClosed`] if the worker has stopped.
    pub async fn flush(&self) -> Result<()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.ops
            .send(Operation::Flush(done_tx))
            .map_err(|_| self.closed())?;
        done_rx.await.map_err(|_| self.closed())
    }

    /// Wait for all issued operations, then return the resulting state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreClosed`] if the worker has stopped.
    pub async fn wait_settled(&self) -> Result<ListState<T>> {
        self.flush().await?;
        Ok(self.state())
    }

    fn dispatch(&self, op: Operation<T>) {
        if self.ops.send(op).is_err() {
            warn!("Dropping operation for closed {} store", T::type_description());
        }
    }

    fn closed(&self) -> Error {
        Error::StoreClosed {
            type_description: T::type_description(),
        }
    }
}

/// The single task that applies a store's operations in order.
struct Worker<T: Listable> {
    backend: Arc<dyn RecordBackend>,
    format: RecordFormat,
    state: watch::Sender<ListState<T>>,
}

impl<T: Listable> Worker<T> {
    async fn run(self, mut ops: mpsc::UnboundedReceiver<Operation<T>>) {
        while let Some(op) = ops.recv().await {
            self.apply(op).await;
        }
        debug!("{} store worker stopped", T::type_description());
    }

    async fn apply(&self, op: Operation<T>) {
        match op {
            Operation::Load => self.load().await,
            Operation::Insert(item) => {
                let mut items = vec![item];
                items.extend(self.current().unwrap_or_default());
                self.replace_with(items).await;
            }
            Operation::Update(item) => {
                let Some(current) = self.current() else {
                    debug!("Ignoring update: {} store not loaded", T::type_description());
                    return;
                };
                let updated = current
                    .into_iter()
                    .map(|existing| {
                        if existing.id() == item.id() {
                            item.clone()
                        } else {
                            existing
                        }
                    })
                    .collect();
                self.replace_with(updated).await;
            }
            Operation::Delete(item) => {
                let Some(mut current) = self.current() else {
                    debug!("Ignoring delete: {} store not loaded", T::type_description());
                    return;
                };
                current.retain(|existing| existing.id() != item.id());
                self.replace_with(current).await;
            }
            Operation::DeleteAll => self.replace_with(Vec::new()).await,
            Operation::Flush(done) => {
                let _ = done.send(());
            }
        }
    }

    fn current(&self) -> Option<Vec<T>> {
        self.state.borrow().value().cloned()
    }

    async fn load(&self) {
        self.state.send_replace(Loadable::Loading);
        let next = match self.read().await {
            Ok(items) => {
                info!(
                    "Loaded {} {} records from {}",
                    items.len(),
                    T::type_description(),
                    self.backend.location().display()
                );
                Loadable::Loaded(items)
            }
            Err(err) => {
                warn!("Failed to load {}: {}", T::type_description(), err);
                Loadable::Error(Arc::new(err))
            }
        };
        self.state.send_replace(next);
    }

    async fn read(&self) -> Result<Vec<T>> {
        let Some(contents) = self.backend.read().await? else {
            return Ok(Vec::new());
        };
        serde_json::from_slice(&contents).map_err(|source| Error::Decode {
            path: self.backend.location().to_path_buf(),
            source,
        })
    }

    /// Persist `items`, publishing them only once the write succeeded.
    async fn replace_with(&self, items: Vec<T>) {
        match self.persist(&items).await {
            Ok(()) => {
                debug!("Saved {} {} records", items.len(), T::type_description());
                self.state.send_replace(Loadable::Loaded(items));
            }
            Err(err) => {
                warn!("Failed to save {}: {}", T::type_description(), err);
                self.state.send_replace(Loadable::Error(Arc::new(err)));
            }
        }
    }

    async fn persist(&self, items: &[T]) -> Result<()> {
        let encoded = match self.format {
            RecordFormat::Compact => serde_json::to_vec(items),
            RecordFormat::Pretty => serde_json::to_vec_pretty(items),
        }
        .map_err(|source| Error::Encode {
            path: self.backend.location().to_path_buf(),
            source,
        })?;
        self.backend.replace(encoded).await
    }
}
