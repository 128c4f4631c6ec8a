//! The filter capability consulted during scope traversal
use crate::error::Result;
use std::path::Path;

/// Verdict a filter gives for a directory: descend into it or prune the
/// whole subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderResult {
    Traverse,
    DoNotTraverse,
}

impl FolderResult {
    pub fn is_traverse(&self) -> bool {
        matches!(self, FolderResult::Traverse)
    }
}

/// A composable scoping predicate.
///
/// A filter answers two questions: whether a file belongs to the scope and
/// whether a directory may be descended into. A file is eligible only when
/// every active filter accepts it; a directory is pruned as soon as one
/// active filter answers [`FolderResult::DoNotTraverse`].
///
/// Filters are only invoked from the traversal thread. A failing filter
/// never aborts a walk: the engine treats the error as an exclusion and
/// reports it through the [`SearchListener`](crate::SearchListener).
pub trait SearchFilter: Send + Sync {
    /// Whether `file` should be part of the search scope.
    fn search_file(&self, file: &Path) -> Result<bool>;

    /// Whether the subtree rooted at `folder` may be traversed.
    fn traverse_folder(&self, folder: &Path) -> Result<FolderResult>;

    /// Short name used in log output and error context.
    fn name(&self) -> &str;
}

/// Adapter building a [`SearchFilter`] from two closures.
pub struct FnFilter<F, D> {
    name: String,
    file: F,
    folder: D,
}

impl<F, D> FnFilter<F, D>
where
    F: Fn(&Path) -> bool + Send + Sync,
    D: Fn(&Path) -> FolderResult + Send + Sync,
{
    pub fn new(name: impl Into<String>, file: F, folder: D) -> Self {
        Self {
            name: name.into(),
            file,
            folder,
        }
    }
}

impl<F, D> SearchFilter for FnFilter<F, D>
where
    F: Fn(&Path) -> bool + Send + Sync,
    D: Fn(&Path) -> FolderResult + Send + Sync,
{
    fn search_file(&self, file: &Path) -> Result<bool> {
        Ok((self.file)(file))
    }

    fn traverse_folder(&self, folder: &Path) -> Result<FolderResult> {
        Ok((self.folder)(folder))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
