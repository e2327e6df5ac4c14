//! The shared database handle and its background flusher.
//!
//! [`Database`] pairs a [`Store`] behind a mutex with the path of its
//! snapshot file. Requests lock, run, and unlock; flushing exports a
//! snapshot inside the lock (an O(1) structural share) and performs the
//! file write outside it, so persistence never stalls request handling.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use curio_foundation::Result;
use curio_storage::{Request, Response, Snapshot, Store};
use tracing::{debug, info, warn};

use crate::snapshot;

/// How often the autoflush thread checks the dirty flag unless the caller
/// chooses otherwise.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(1);

/// A cloneable handle to one store and its snapshot file.
///
/// Clones share the same store; the handle is safe to pass across
/// threads.
#[derive(Clone, Debug)]
pub struct Database {
    store: Arc<Mutex<Store>>,
    path: PathBuf,
}

impl Database {
    /// Opens the database backed by the given snapshot file.
    ///
    /// A missing or unreadable file starts the store empty; the file is
    /// created on the first flush.
    #[must_use]
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let loaded = snapshot::load_or_create(&path);
        let store = Store::from_snapshot(loaded);
        info!(
            "opened database '{}' with {} entities",
            path.display(),
            store.index().len()
        );
        Self {
            store: Arc::new(Mutex::new(store)),
            path,
        }
    }

    /// Processes one request against the shared store.
    pub fn handle_request(&self, request: Request) -> Response {
        self.lock().handle_request(request)
    }

    /// Exports the current state without touching the dirty flag.
    #[must_use]
    pub fn export_snapshot(&self) -> Snapshot {
        self.lock().export_snapshot()
    }

    /// Returns true if unflushed mutations exist.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.lock().is_dirty()
    }

    /// Writes the current state to the snapshot file if anything changed
    /// since the last flush. Returns true if a write happened.
    ///
    /// The dirty flag drops before the write; if the write then fails,
    /// the flag is raised again so the next flush retries.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn flush_if_dirty(&self) -> Result<bool> {
        let exported = {
            let mut store = self.lock();
            if !store.is_dirty() {
                return Ok(false);
            }
            store.clear_dirty();
            store.export_snapshot()
        };

        if let Err(e) = snapshot::save_to_file(&exported, &self.path) {
            self.lock().mark_dirty();
            return Err(e);
        }
        debug!(
            "flushed {} entities to '{}'",
            exported.entities.len(),
            self.path.display()
        );
        Ok(true)
    }

    /// Spawns a background thread that flushes on an interval while the
    /// store is dirty, in the manner of [`Self::flush_if_dirty`].
    ///
    /// The thread performs a final flush when the returned handle is
    /// stopped or dropped.
    #[must_use]
    pub fn start_autoflush(&self, interval: Duration) -> FlushHandle {
        let database = self.clone();
        let (stop, ticks) = mpsc::channel::<()>();
        let thread = std::thread::spawn(move || {
            loop {
                match ticks.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if let Err(e) = database.flush_if_dirty() {
                            warn!("periodic flush failed: {e}");
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            if let Err(e) = database.flush_if_dirty() {
                warn!("final flush failed: {e}");
            }
        });
        FlushHandle {
            stop,
            thread: Some(thread),
        }
    }

    // A poisoned lock means a panic mid-request; the store itself is
    // still structurally sound, so keep serving.
    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owns the autoflush thread; stopping (or dropping) it triggers one
/// final flush.
#[derive(Debug)]
pub struct FlushHandle {
    stop: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl FlushHandle {
    /// Stops the flusher and waits for its final flush to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.stop.send(());
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for FlushHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
