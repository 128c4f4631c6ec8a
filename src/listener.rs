//! Listener callbacks for traversal events
use crate::error::ScopeError;
use crossbeam_channel::Sender;
use log::{debug, warn};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// Receives traversal notifications while a walk is running.
///
/// Callbacks are invoked synchronously on the traversal thread and must not
/// block for long; implementations that accumulate state use interior
/// mutability. All callbacks default to no-ops so implementations only
/// override what they care about.
pub trait SearchListener: Send + Sync {
    /// A file was rejected by a filter or by the file-name pattern.
    fn on_file_filtered(&self, _file: &Path) {}

    /// A directory subtree was pruned.
    fn on_folder_skipped(&self, _folder: &Path) {}

    /// A non-fatal error occurred; the walk continues with remaining work.
    fn on_error(&self, _context: &str, _error: &ScopeError) {}
}

/// Silent listener, the default when a caller has nothing to observe.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl SearchListener for NoopListener {}

/// Routes every event to the `log` facade: skip decisions at debug level,
/// errors at warn.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogListener;

impl SearchListener for LogListener {
    fn on_file_filtered(&self, file: &Path) {
        debug!("Filtered out file: {}", file.display());
    }

    fn on_folder_skipped(&self, folder: &Path) {
        debug!("Skipping folder: {}", folder.display());
    }

    fn on_error(&self, context: &str, error: &ScopeError) {
        warn!("{context}: {error}");
    }
}

/// An owned record of a single listener callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    FileFiltered(PathBuf),
    FolderSkipped(PathBuf),
    Error { context: String, message: String },
}

impl SearchEvent {
    fn error(context: &str, error: &ScopeError) -> Self {
        SearchEvent::Error {
            context: context.to_string(),
            message: error.to_string(),
        }
    }
}

/// Accumulates events in memory. Mostly useful for tests and for callers
/// that want to inspect what a finished walk skipped.
#[derive(Debug, Default)]
pub struct CollectingListener {
    events: Mutex<Vec<SearchEvent>>,
}

impl CollectingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<SearchEvent> {
        self.events.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl SearchListener for CollectingListener {
    fn on_file_filtered(&self, file: &Path) {
        self.events
            .lock()
            .push(SearchEvent::FileFiltered(file.to_path_buf()));
    }

    fn on_folder_skipped(&self, folder: &Path) {
        self.events
            .lock()
            .push(SearchEvent::FolderSkipped(folder.to_path_buf()));
    }

    fn on_error(&self, context: &str, error: &ScopeError) {
        self.events.lock().push(SearchEvent::error(context, error));
    }
}

/// Forwards events over a channel for callers that consume them on another
/// thread (a UI updating a "skipped N files" counter, for instance). A
/// disconnected receiver is not an error; remaining events are dropped.
pub struct ChannelListener {
    tx: Sender<SearchEvent>,
}

impl ChannelListener {
    pub fn new(tx: Sender<SearchEvent>) -> Self {
        Self { tx }
    }
}

impl SearchListener for ChannelListener {
    fn on_file_filtered(&self, file: &Path) {
        let _ = self.tx.send(SearchEvent::FileFiltered(file.to_path_buf()));
    }

    fn on_folder_skipped(&self, folder: &Path) {
        let _ = self.tx.send(SearchEvent::FolderSkipped(folder.to_path_buf()));
    }

    fn on_error(&self, context: &str, error: &ScopeError) {
        let _ = self.tx.send(SearchEvent::error(context, error));
    }
}
