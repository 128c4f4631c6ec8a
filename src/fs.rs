//! File-system abstraction used by the traversal engine
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What a directory entry turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// The minimal file-system surface the engine needs: classify an entry and
/// enumerate a directory's direct children. Production code uses
/// [`StdFileSystem`]; tests inject an in-memory implementation.
pub trait FileSystem: Send + Sync {
    /// Classify `path`. Returns `Ok(None)` for entries the walk should pass
    /// over silently: symlinks when `follow_links` is false, broken links,
    /// sockets, devices and other special files.
    fn kind(&self, path: &Path, follow_links: bool) -> io::Result<Option<EntryKind>>;

    /// Direct children of `dir`, sorted by file name so traversal order is
    /// stable across runs.
    fn children(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Whether the entry's own file name starts with a dot.
pub(crate) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn kind(&self, path: &Path, follow_links: bool) -> io::Result<Option<EntryKind>> {
        let metadata = if follow_links {
            match fs::metadata(path) {
                Ok(metadata) => metadata,
                // Broken link: the entry exists but its target does not.
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(e),
            }
        } else {
            let metadata = fs::symlink_metadata(path)?;
            if metadata.file_type().is_symlink() {
                return Ok(None);
            }
            metadata
        };

        if metadata.is_dir() {
            Ok(Some(EntryKind::Directory))
        } else if metadata.is_file() {
            Ok(Some(EntryKind::File))
        } else {
            Ok(None)
        }
    }

    fn children(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort();
        Ok(entries)
    }
}
