//! Scope construction and the filter sanity pass
use crate::cancel::CancellationFlag;
use crate::error::ScopeError;
use crate::filter::{FolderResult, SearchFilter};
use crate::fs::{FileSystem, StdFileSystem};
use crate::listener::{NoopListener, SearchListener};
use crate::options::SearchScopeOptions;
use crate::walker::ScopeWalk;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The ordered filters that survived the root sanity pass and are actually
/// applied during a walk.
///
/// Invariant: no member maps the scope root to
/// [`FolderResult::DoNotTraverse`].
#[derive(Clone, Default)]
pub struct ActiveFilterSet {
    filters: Vec<Arc<dyn SearchFilter>>,
}

impl ActiveFilterSet {
    /// Run the sanity pass: every filter is asked for its verdict on the
    /// root, and filters that would refuse to traverse the root itself are
    /// dropped. Such a filter cannot meaningfully scope a search under that
    /// root; keeping it would make every walk come back empty.
    ///
    /// A filter whose root verdict fails is dropped as well (reported
    /// through `listener`). The pass itself never fails, and survivors keep
    /// their relative order.
    pub fn reduce(
        root: &Path,
        filters: Vec<Arc<dyn SearchFilter>>,
        listener: &dyn SearchListener,
    ) -> Self {
        let mut active = Vec::with_capacity(filters.len());
        for filter in filters {
            match filter.traverse_folder(root) {
                Ok(FolderResult::Traverse) => active.push(filter),
                Ok(FolderResult::DoNotTraverse) => {
                    debug!(
                        "Dropping filter '{}': it would not traverse the search root {}",
                        filter.name(),
                        root.display()
                    );
                }
                Err(e) => {
                    let e = ScopeError::Filter {
                        filter: filter.name().to_string(),
                        path: root.to_path_buf(),
                        source: Box::new(e),
                    };
                    warn!("Dropping filter: {e}");
                    listener.on_error("filter evaluation failed on search root", &e);
                }
            }
        }
        Self { filters: active }
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn SearchFilter>> + '_ {
        self.filters.iter()
    }

    pub(crate) fn as_slice(&self) -> &[Arc<dyn SearchFilter>] {
        &self.filters
    }
}

/// A search scope: the root plus the filters that survived the sanity pass.
///
/// Built once per search invocation and immutable afterwards. Each
/// [`files_to_search`](ScopeDefinition::files_to_search) call starts an
/// independent walk from the root; iterators are not restartable and do not
/// affect one another.
pub struct ScopeDefinition {
    root: PathBuf,
    filters: ActiveFilterSet,
    fs: Arc<dyn FileSystem>,
}

impl ScopeDefinition {
    /// Build a scope over `root`, silently dropping filters that block the
    /// root itself.
    pub fn build(root: impl Into<PathBuf>, filters: Vec<Arc<dyn SearchFilter>>) -> Self {
        Self::build_with_listener(root, filters, &NoopListener)
    }

    /// Like [`build`](ScopeDefinition::build), but failures during the
    /// sanity pass are reported through `listener`.
    pub fn build_with_listener(
        root: impl Into<PathBuf>,
        filters: Vec<Arc<dyn SearchFilter>>,
        listener: &dyn SearchListener,
    ) -> Self {
        let root = root.into();
        let filters = ActiveFilterSet::reduce(&root, filters, listener);
        Self {
            root,
            filters,
            fs: Arc::new(StdFileSystem),
        }
    }

    /// Replace the file-system backend. Tests use this to walk an in-memory
    /// tree.
    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn filters(&self) -> &ActiveFilterSet {
        &self.filters
    }

    /// Start a lazy walk over the scope. The returned iterator yields every
    /// file accepted by all active filters and the options' file-name
    /// pattern, in depth-first pre-order; skips and non-fatal errors are
    /// reported to `listener` as they are encountered, and setting `cancel`
    /// ends the sequence within one unit of work.
    pub fn files_to_search(
        &self,
        options: SearchScopeOptions,
        listener: Arc<dyn SearchListener>,
        cancel: CancellationFlag,
    ) -> ScopeWalk {
        ScopeWalk::new(
            self.root.clone(),
            self.filters.as_slice().to_vec(),
            Arc::clone(&self.fs),
            options,
            listener,
            cancel,
        )
    }
}
