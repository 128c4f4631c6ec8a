//! Cancellable, lazily-evaluated search scoping.
//!
//! Build a [`ScopeDefinition`] from a root and a list of [`SearchFilter`]s,
//! then pull eligible files from [`ScopeDefinition::files_to_search`]. The
//! walk prunes whole subtrees on a filter's say-so, reports skips and
//! non-fatal errors to a [`SearchListener`], and stops cooperatively when a
//! shared [`CancellationFlag`] is set.
//!
//! ```no_run
//! use rfscope::{
//!     CancellationFlag, ExtensionFilter, LogListener, ScopeDefinition, SearchFilter,
//!     SearchScopeOptions,
//! };
//! use std::sync::Arc;
//!
//! let filters: Vec<Arc<dyn SearchFilter>> = vec![Arc::new(ExtensionFilter::new(["rs"]))];
//! let scope = ScopeDefinition::build("/some/project", filters);
//! let cancel = CancellationFlag::new();
//! for file in scope.files_to_search(
//!     SearchScopeOptions::default(),
//!     Arc::new(LogListener),
//!     cancel.clone(),
//! ) {
//!     println!("{}", file.display());
//! }
//! ```
mod cancel;
pub mod error;
mod filter;
pub mod filters;
mod fs;
mod listener;
mod options;
mod scope;
mod walker;

#[cfg(test)]
mod test_utils;

pub use crate::cancel::CancellationFlag;
pub use crate::error::{Result, ScopeError};
pub use crate::filter::{FnFilter, FolderResult, SearchFilter};
pub use crate::filters::{
    ExtensionFilter, GitignoreFilter, HiddenFilter, MaxSizeFilter, PathPatternFilter,
};
pub use crate::fs::{EntryKind, FileSystem, StdFileSystem};
pub use crate::listener::{
    ChannelListener, CollectingListener, LogListener, NoopListener, SearchEvent, SearchListener,
};
pub use crate::options::SearchScopeOptions;
pub use crate::scope::{ActiveFilterSet, ScopeDefinition};
pub use crate::walker::ScopeWalk;
