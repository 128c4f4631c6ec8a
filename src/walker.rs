//! The lazy, cancellable walk over a search scope
use crate::cancel::CancellationFlag;
use crate::error::ScopeError;
use crate::filter::{FolderResult, SearchFilter};
use crate::fs::{is_hidden, EntryKind, FileSystem};
use crate::listener::SearchListener;
use crate::options::SearchScopeOptions;
use log::{debug, warn};
use regex::Regex;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One pending directory on the work stack.
struct DirWork {
    path: PathBuf,
    depth: usize,
}

/// Lazy iterator over the files of a scope.
///
/// Construction does no I/O. Every `next()` call performs at most one unit
/// of work at a time (one directory consultation/enumeration or one file
/// check) until it can yield a file, keeping an explicit work stack instead
/// of recursing so deep trees cannot overflow the call stack. The
/// cancellation flag is observed before each unit; once it is set the
/// sequence ends without yielding further elements.
///
/// Per-entry failures (a filter raising, a directory that cannot be
/// enumerated) are reported to the listener and never abort the walk.
pub struct ScopeWalk {
    filters: Vec<Arc<dyn SearchFilter>>,
    fs: Arc<dyn FileSystem>,
    options: SearchScopeOptions,
    pattern: Option<Regex>,
    listener: Arc<dyn SearchListener>,
    cancel: CancellationFlag,
    stack: Vec<DirWork>,
    pending_files: VecDeque<PathBuf>,
    done: bool,
}

impl ScopeWalk {
    pub(crate) fn new(
        root: PathBuf,
        filters: Vec<Arc<dyn SearchFilter>>,
        fs: Arc<dyn FileSystem>,
        options: SearchScopeOptions,
        listener: Arc<dyn SearchListener>,
        cancel: CancellationFlag,
    ) -> Self {
        let pattern = match options.compiled_pattern() {
            Ok(pattern) => pattern,
            Err(e) => {
                warn!("Ignoring invalid file-name pattern: {e}");
                listener.on_error("invalid file-name pattern", &e);
                None
            }
        };

        let mut stack = Vec::new();
        if options.max_depth != Some(0) {
            stack.push(DirWork {
                path: root,
                depth: 0,
            });
        }

        Self {
            filters,
            fs,
            options,
            pattern,
            listener,
            cancel,
            stack,
            pending_files: VecDeque::new(),
            done: false,
        }
    }

    /// Apply every active filter and the file-name pattern to `file`.
    /// Inclusion requires all filters to accept; the first rejection wins
    /// and fires the listener.
    fn visit_file(&self, file: &Path) -> bool {
        for filter in &self.filters {
            match filter.search_file(file) {
                Ok(true) => {}
                Ok(false) => {
                    debug!(
                        "Filter '{}' excluded file: {}",
                        filter.name(),
                        file.display()
                    );
                    self.listener.on_file_filtered(file);
                    return false;
                }
                Err(e) => {
                    let e = ScopeError::Filter {
                        filter: filter.name().to_string(),
                        path: file.to_path_buf(),
                        source: Box::new(e),
                    };
                    warn!("{e}");
                    self.listener.on_error("filter evaluation failed", &e);
                    self.listener.on_file_filtered(file);
                    return false;
                }
            }
        }

        if let Some(pattern) = &self.pattern {
            let matches = file
                .file_name()
                .map(|name| pattern.is_match(&name.to_string_lossy()))
                .unwrap_or(false);
            if !matches {
                debug!("Pattern excluded file: {}", file.display());
                self.listener.on_file_filtered(file);
                return false;
            }
        }

        true
    }

    /// Consult the filters for `work` and, unless some filter prunes it,
    /// enumerate its children into the pending batch and the stack.
    fn visit_dir(&mut self, work: DirWork) {
        let DirWork { path, depth } = work;

        for filter in &self.filters {
            match filter.traverse_folder(&path) {
                Ok(FolderResult::Traverse) => {}
                Ok(FolderResult::DoNotTraverse) => {
                    debug!("Filter '{}' pruned: {}", filter.name(), path.display());
                    self.listener.on_folder_skipped(&path);
                    return;
                }
                Err(e) => {
                    let e = ScopeError::Filter {
                        filter: filter.name().to_string(),
                        path: path.clone(),
                        source: Box::new(e),
                    };
                    warn!("{e}");
                    self.listener.on_error("filter evaluation failed", &e);
                    self.listener.on_folder_skipped(&path);
                    return;
                }
            }
        }

        // The listing handle lives only for this call; nothing is held
        // across yields.
        let children = match self.fs.children(&path) {
            Ok(children) => children,
            Err(e) => {
                let e = ScopeError::Enumeration {
                    path: path.clone(),
                    source: e,
                };
                warn!("{e}");
                self.listener.on_error("directory enumeration failed", &e);
                return;
            }
        };

        let descend = self
            .options
            .max_depth
            .map_or(true, |max| depth + 1 < max);
        let mut subdirs = Vec::new();

        for child in children {
            let kind = match self.fs.kind(&child, self.options.follow_symlinks) {
                Ok(Some(kind)) => kind,
                Ok(None) => continue,
                Err(e) => {
                    let e = ScopeError::Io(e);
                    warn!("Failed to classify {}: {e}", child.display());
                    self.listener.on_error("entry classification failed", &e);
                    continue;
                }
            };

            let hidden = !self.options.include_hidden && is_hidden(&child);
            match kind {
                EntryKind::File => {
                    if hidden {
                        debug!("Skipping hidden file: {}", child.display());
                        self.listener.on_file_filtered(&child);
                    } else {
                        self.pending_files.push_back(child);
                    }
                }
                EntryKind::Directory => {
                    if hidden {
                        debug!("Skipping hidden folder: {}", child.display());
                        self.listener.on_folder_skipped(&child);
                    } else if descend {
                        subdirs.push(DirWork {
                            path: child,
                            depth: depth + 1,
                        });
                    }
                }
            }
        }

        // LIFO stack: reversing here makes subtrees come off in
        // enumeration order.
        while let Some(dir) = subdirs.pop() {
            self.stack.push(dir);
        }
    }
}

impl Iterator for ScopeWalk {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        if self.done {
            return None;
        }
        loop {
            // Cancellation is observed before each unit of work, so at most
            // one in-flight unit completes after the flag is set.
            if self.cancel.is_set() {
                debug!("Traversal cancelled");
                self.done = true;
                self.stack.clear();
                self.pending_files.clear();
                return None;
            }

            if let Some(file) = self.pending_files.pop_front() {
                if self.visit_file(&file) {
                    return Some(file);
                }
                continue;
            }

            match self.stack.pop() {
                Some(dir) => self.visit_dir(dir),
                None => {
                    self.done = true;
                    return None;
                }
            }
        }
    }
}
