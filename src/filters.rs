//! Stock filters covering the common scoping policies
use crate::error::{Result, ScopeError};
use crate::filter::{FolderResult, SearchFilter};
use crate::fs::is_hidden;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use lazy_static::lazy_static;
use lru::LruCache;
use parking_lot::Mutex;
use regex::Regex;
use std::num::NonZeroUsize;
use std::path::Path;

const REGEX_CACHE_SIZE: usize = 100;

lazy_static! {
    static ref REGEX_CACHE: Mutex<LruCache<String, Regex>> =
        Mutex::new(LruCache::new(NonZeroUsize::new(REGEX_CACHE_SIZE).unwrap()));
}

/// Compile `pattern`, reusing a previously compiled regex when possible.
pub fn get_or_compile_regex(pattern: &str) -> Result<Regex> {
    let mut cache = REGEX_CACHE.lock();
    if let Some(regex) = cache.get(pattern) {
        return Ok(regex.clone());
    }
    let regex = Regex::new(pattern)?;
    cache.put(pattern.to_string(), regex.clone());
    Ok(regex)
}

/// Keeps only files with one of the given extensions. Directories are always
/// traversed; the narrowing happens per file.
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }
}

impl SearchFilter for ExtensionFilter {
    fn search_file(&self, file: &Path) -> Result<bool> {
        let Some(ext) = file.extension().and_then(|e| e.to_str()) else {
            return Ok(false);
        };
        Ok(self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn traverse_folder(&self, _folder: &Path) -> Result<FolderResult> {
        Ok(FolderResult::Traverse)
    }

    fn name(&self) -> &str {
        "extensions"
    }
}

/// Excludes files larger than a byte threshold.
pub struct MaxSizeFilter {
    max_bytes: u64,
}

impl MaxSizeFilter {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn megabytes(mb: u64) -> Self {
        Self::new(mb * 1024 * 1024)
    }
}

impl SearchFilter for MaxSizeFilter {
    fn search_file(&self, file: &Path) -> Result<bool> {
        let metadata = std::fs::metadata(file)?;
        Ok(metadata.len() <= self.max_bytes)
    }

    fn traverse_folder(&self, _folder: &Path) -> Result<FolderResult> {
        Ok(FolderResult::Traverse)
    }

    fn name(&self) -> &str {
        "max-size"
    }
}

/// Excludes entries whose path matches any of a list of regexes; a matching
/// directory prunes its whole subtree.
pub struct PathPatternFilter {
    patterns: Vec<Regex>,
}

impl PathPatternFilter {
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| get_or_compile_regex(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    fn matches(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.patterns.iter().any(|re| re.is_match(&path_str))
    }
}

impl SearchFilter for PathPatternFilter {
    fn search_file(&self, file: &Path) -> Result<bool> {
        Ok(!self.matches(file))
    }

    fn traverse_folder(&self, folder: &Path) -> Result<FolderResult> {
        if self.matches(folder) {
            Ok(FolderResult::DoNotTraverse)
        } else {
            Ok(FolderResult::Traverse)
        }
    }

    fn name(&self) -> &str {
        "path-patterns"
    }
}

/// Excludes dot-files and prunes dot-directories.
pub struct HiddenFilter;

impl SearchFilter for HiddenFilter {
    fn search_file(&self, file: &Path) -> Result<bool> {
        Ok(!is_hidden(file))
    }

    fn traverse_folder(&self, folder: &Path) -> Result<FolderResult> {
        if is_hidden(folder) {
            Ok(FolderResult::DoNotTraverse)
        } else {
            Ok(FolderResult::Traverse)
        }
    }

    fn name(&self) -> &str {
        "hidden"
    }
}

/// Applies the root's `.gitignore` rules: ignored files are excluded and
/// ignored directories pruned.
pub struct GitignoreFilter {
    gitignore: Gitignore,
}

impl GitignoreFilter {
    pub fn new(root: &Path) -> Result<Self> {
        let mut builder = GitignoreBuilder::new(root);
        let gitignore_file = root.join(".gitignore");
        if gitignore_file.exists() {
            if let Some(e) = builder.add(&gitignore_file) {
                return Err(ScopeError::Config(format!(
                    "Failed to read {}: {e}",
                    gitignore_file.display()
                )));
            }
        }
        let gitignore = builder
            .build()
            .map_err(|e| ScopeError::Config(format!("Failed to build gitignore matcher: {e}")))?;
        Ok(Self { gitignore })
    }
}

impl SearchFilter for GitignoreFilter {
    fn search_file(&self, file: &Path) -> Result<bool> {
        Ok(!self.gitignore.matched(file, false).is_ignore())
    }

    fn traverse_folder(&self, folder: &Path) -> Result<FolderResult> {
        if self.gitignore.matched(folder, true).is_ignore() {
            Ok(FolderResult::DoNotTraverse)
        } else {
            Ok(FolderResult::Traverse)
        }
    }

    fn name(&self) -> &str {
        "gitignore"
    }
}
