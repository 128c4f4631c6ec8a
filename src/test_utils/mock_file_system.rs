//! Mock file system for testing
use crate::fs::{EntryKind, FileSystem};
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory [`FileSystem`] with error injection. Children come back sorted
/// by name, matching the production backend.
#[derive(Debug, Default)]
pub struct MockFileSystem {
    entries: BTreeMap<PathBuf, EntryKind>,
    unreadable: HashSet<PathBuf>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_file(&mut self, path: impl Into<PathBuf>) {
        self.entries.insert(path.into(), EntryKind::File);
    }

    pub fn create_dir(&mut self, path: impl Into<PathBuf>) {
        self.entries.insert(path.into(), EntryKind::Directory);
    }

    /// Make enumeration of `dir` fail with a permission error.
    pub fn fail_enumeration(&mut self, dir: impl Into<PathBuf>) {
        self.unreadable.insert(dir.into());
    }
}

impl FileSystem for MockFileSystem {
    fn kind(&self, path: &Path, _follow_links: bool) -> io::Result<Option<EntryKind>> {
        Ok(self.entries.get(path).copied())
    }

    fn children(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if self.unreadable.contains(dir) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        match self.entries.get(dir) {
            Some(EntryKind::Directory) => Ok(self
                .entries
                .keys()
                .filter(|p| p.parent() == Some(dir))
                .cloned()
                .collect()),
            Some(EntryKind::File) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a directory",
            )),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no such entry")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_are_sorted_and_direct_only() {
        let mut fs = MockFileSystem::new();
        fs.create_dir("root");
        fs.create_file("root/z.txt");
        fs.create_file("root/a.txt");
        fs.create_dir("root/sub");
        fs.create_file("root/sub/nested.txt");

        let children = fs.children(Path::new("root")).unwrap();
        assert_eq!(
            children,
            vec![
                PathBuf::from("root/a.txt"),
                PathBuf::from("root/sub"),
                PathBuf::from("root/z.txt"),
            ]
        );
    }

    #[test]
    fn injected_enumeration_failure() {
        let mut fs = MockFileSystem::new();
        fs.create_dir("root");
        fs.fail_enumeration("root");
        assert!(fs.children(Path::new("root")).is_err());
    }
}
