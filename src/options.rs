use crate::error::{Result, ScopeError};
use crate::filters::get_or_compile_regex;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Options consulted at traversal decision points.
///
/// These narrow the walk itself, not any later content search: the file-name
/// pattern, how deep to recurse, whether to follow symlinks and whether
/// dot-entries participate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchScopeOptions {
    /// File-name pattern; `*.rs` style wildcards by default, a full regex
    /// when `regexp` is set. `None` matches everything.
    pub pattern: Option<String>,

    /// Interpret `pattern` as a regular expression instead of a wildcard.
    pub regexp: bool,

    /// Recursion limit. `Some(1)` lists only the root's direct children;
    /// `None` walks the whole subtree.
    pub max_depth: Option<usize>,

    /// Descend into symlinked directories and classify symlinked files by
    /// their target. Off by default; broken links are always passed over.
    pub follow_symlinks: bool,

    /// Include dot-files and descend into dot-directories.
    pub include_hidden: bool,
}

impl Default for SearchScopeOptions {
    fn default() -> Self {
        Self {
            pattern: None,
            regexp: false,
            max_depth: None,
            follow_symlinks: false,
            include_hidden: false,
        }
    }
}

impl SearchScopeOptions {
    /// Load option defaults from the user's config file, falling back to
    /// `Default` when none exists.
    pub fn load() -> Result<Self> {
        match Self::find_config_path() {
            Some(path) => {
                let content = fs::read_to_string(&path).map_err(|e| {
                    ScopeError::Config(format!(
                        "Failed to read config file {}: {e}",
                        path.display()
                    ))
                })?;
                toml::from_str(&content)
                    .map_err(|e| ScopeError::Config(format!("Failed to parse config file: {e}")))
            }
            None => Ok(Self::default()),
        }
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Some(xdg_config) = dirs::config_dir() {
            let xdg_path = xdg_config.join("rfscope/config.toml");
            if xdg_path.exists() {
                return Some(xdg_path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let home_path = home.join(".rfscope.toml");
            if home_path.exists() {
                return Some(home_path);
            }
        }

        let current_path = Path::new(".rfscope.toml");
        if current_path.exists() {
            return Some(current_path.to_path_buf());
        }

        None
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ScopeError::Config(format!("Failed to serialize options: {e}")))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ScopeError::Config(format!(
                    "Failed to create config directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        fs::write(path, content).map_err(|e| {
            ScopeError::Config(format!("Failed to write config file {}: {e}", path.display()))
        })?;

        Ok(())
    }

    /// Compile the file-name pattern, if any. Wildcard patterns match the
    /// whole file name, case-insensitively.
    pub(crate) fn compiled_pattern(&self) -> Result<Option<Regex>> {
        let Some(pattern) = self.pattern.as_deref() else {
            return Ok(None);
        };
        let source = if self.regexp {
            pattern.to_string()
        } else {
            wildcard_to_regex(pattern)
        };
        get_or_compile_regex(&source).map(Some)
    }
}

/// Translate a `*.rs` style wildcard into an anchored regex.
fn wildcard_to_regex(pattern: &str) -> String {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push_str("(?i)^");
    for c in pattern.chars() {
        match c {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            c => source.push_str(&regex::escape(&c.to_string())),
        }
    }
    source.push('$');
    source
}
