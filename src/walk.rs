//! Project tree walking and exclusion rules
//!
//! Exclusion patterns come in two shapes. A plain pattern (`vendor`, `test`)
//! excludes every path whose project-relative form contains it. A pattern
//! with glob metacharacters (`*.log`, `gen/**`) is matched against both the
//! relative path and the file name. Directories that match are pruned
//! without being descended into.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::error::{OutlineError, Result};
use crate::fs_utils::relative_slash_path;
use crate::lang::Lang;

/// Version control, dependency and IDE entries that are never indexed
pub const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    "node_modules",
    "vendor",
    ".idea",
    ".vscode",
    "__pycache__",
    ".DS_Store",
    "*.tmp",
    "*.log",
];

/// Compiled exclusion rules
#[derive(Debug, Clone)]
pub struct ExcludeRules {
    substrings: Vec<String>,
    globs: Vec<GlobMatcher>,
}

impl ExcludeRules {
    /// Default excludes followed by `extra`
    pub fn new(extra: &[String]) -> Result<Self> {
        let patterns = DEFAULT_EXCLUDES
            .iter()
            .map(|p| p.to_string())
            .chain(extra.iter().map(|p| p.trim().to_string()))
            .filter(|p| !p.is_empty());

        let mut substrings = Vec::new();
        let mut globs = Vec::new();
        for pattern in patterns {
            if is_glob(&pattern) {
                let matcher = Glob::new(&pattern)
                    .map_err(|e| OutlineError::ConfigError {
                        message: format!("Invalid exclude pattern '{}': {}", pattern, e),
                    })?
                    .compile_matcher();
                globs.push(matcher);
            } else {
                substrings.push(pattern);
            }
        }

        Ok(Self { substrings, globs })
    }

    /// True if a slash-separated project-relative path is excluded
    pub fn is_excluded(&self, rel_path: &str) -> bool {
        if self.substrings.iter().any(|s| rel_path.contains(s.as_str())) {
            return true;
        }
        let name = rel_path.rsplit('/').next().unwrap_or(rel_path);
        self.globs
            .iter()
            .any(|g| g.is_match(rel_path) || g.is_match(name))
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

/// A supported source file found by the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    pub abs_path: PathBuf,
    /// Project-relative, slash-separated
    pub rel_path: String,
    pub lang: Lang,
}

/// Walk `start` (the project root or a directory inside it) and return every
/// supported, non-excluded file, sorted by relative path.
///
/// Relative paths are always computed against `root`. Unreadable entries
/// below the start directory are logged and skipped; an unreadable start
/// directory is an error.
pub fn walk_dir(root: &Path, start: &Path, rules: &ExcludeRules) -> Result<Vec<WalkedFile>> {
    std::fs::read_dir(start).map_err(|e| OutlineError::ProjectRoot {
        path: start.display().to_string(),
        message: e.to_string(),
    })?;

    let mut builder = WalkBuilder::new(start);

    // Exclusion is driven by our own rules only, not .gitignore
    builder.standard_filters(false);
    builder.hidden(false);

    // Do not follow symlinks
    builder.follow_links(false);

    builder.sort_by_file_name(|a, b| a.cmp(b));

    let filter_root = root.to_path_buf();
    let filter_rules = rules.clone();
    builder.filter_entry(move |entry| {
        if entry.depth() == 0 {
            return true;
        }
        let rel = relative_slash_path(&filter_root, entry.path());
        !filter_rules.is_excluded(&rel)
    });

    let mut files = Vec::new();
    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let abs_path = entry.into_path();
        let Ok(lang) = Lang::from_path(&abs_path) else {
            continue;
        };
        let rel_path = relative_slash_path(root, &abs_path);
        debug!("Found {} ({})", rel_path, lang.name());
        files.push(WalkedFile {
            abs_path,
            rel_path,
            lang,
        });
    }

    files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    Ok(files)
}
