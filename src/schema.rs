//! Symbol index data structures
//!
//! These types are serialized verbatim into the snapshot file. Empty
//! documentation, empty member lists and absent bodies are omitted from the
//! JSON rather than written as empty values.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::Metadata;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lang::Lang;

/// Inclusive, 1-based line span of a declaration
///
/// Serializes as a two-element array `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange(pub usize, pub usize);

impl LineRange {
    pub fn start(&self) -> usize {
        self.0
    }

    pub fn end(&self) -> usize {
        self.1
    }

    /// True when `start <= end` and both fall inside a file of `line_count` lines
    pub fn is_within(&self, line_count: usize) -> bool {
        self.0 >= 1 && self.0 <= self.1 && self.1 <= line_count.max(1)
    }
}

/// One indexed declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Declaration text with the body excised, whitespace-collapsed
    pub signature: String,

    /// Nearest preceding comment run or docstring, joined into one line
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub documentation: String,

    /// Line span of the whole declaration, body included
    pub range: LineRange,

    /// Inline content that is not represented as members (enum variant lists)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Member declarations of a container (methods, nested types)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Symbol>,
}

impl Symbol {
    /// Number of symbols in this subtree, the symbol itself included
    pub fn total_count(&self) -> usize {
        1 + self.members.iter().map(Symbol::total_count).sum::<usize>()
    }
}

/// Change-detection key of a file: modification time and byte size
///
/// Modification times are kept at whole-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub last_modified: DateTime<Utc>,
    pub size: u64,
}

impl Fingerprint {
    /// Build a fingerprint from file metadata
    pub fn from_metadata(metadata: &Metadata) -> Option<Self> {
        let modified: DateTime<Utc> = metadata.modified().ok()?.into();
        Some(Self {
            last_modified: truncate_to_seconds(modified),
            size: metadata.len(),
        })
    }

    /// Stat a file and build its fingerprint
    pub fn from_path(path: &Path) -> Option<Self> {
        let metadata = std::fs::metadata(path).ok()?;
        Self::from_metadata(&metadata)
    }
}

/// Drop sub-second precision from a timestamp
pub fn truncate_to_seconds(time: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(time.timestamp(), 0).unwrap_or(time)
}

/// Current time at whole-second resolution
pub fn now_seconds() -> DateTime<Utc> {
    truncate_to_seconds(Utc::now())
}

/// One file's extraction result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// File-level purpose taken from the leading comment
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub documentation: String,

    /// Top-level symbols in document order
    #[serde(default)]
    pub symbols: Vec<Symbol>,

    /// Source modification time at extraction
    pub last_modified: DateTime<Utc>,

    /// Byte length at extraction
    pub size: u64,
}

impl FileRecord {
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint {
            last_modified: self.last_modified,
            size: self.size,
        }
    }

    /// True if the on-disk fingerprint differs from the recorded one
    pub fn is_stale(&self, current: &Fingerprint) -> bool {
        self.fingerprint() != *current
    }

    /// Count of symbols including nested members
    pub fn symbol_count(&self) -> usize {
        self.symbols.iter().map(Symbol::total_count).sum()
    }
}

/// The persisted project index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub project_name: String,

    pub project_root: String,

    /// Free text supplied by the user
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_goal: String,

    /// Distinct language labels of the indexed files
    #[serde(default)]
    pub tech_stack: Vec<String>,

    pub last_updated: DateTime<Utc>,

    /// One-line description per directory, derived from `files`
    #[serde(default)]
    pub module_summary: BTreeMap<String, String>,

    /// Relative slash-separated path to record
    #[serde(default)]
    pub files: BTreeMap<String, FileRecord>,
}

impl ProjectSnapshot {
    /// Create a snapshot and derive its summaries from `files`
    pub fn new(
        project_name: impl Into<String>,
        project_root: impl Into<String>,
        project_goal: impl Into<String>,
        files: BTreeMap<String, FileRecord>,
    ) -> Self {
        let mut snapshot = Self {
            project_name: project_name.into(),
            project_root: project_root.into(),
            project_goal: project_goal.into(),
            tech_stack: Vec::new(),
            last_updated: now_seconds(),
            module_summary: BTreeMap::new(),
            files,
        };
        snapshot.refresh_derived();
        snapshot
    }

    /// Regenerate `module_summary` and `tech_stack` from the current file set
    pub fn refresh_derived(&mut self) {
        self.module_summary = module_summary(&self.files);
        self.tech_stack = tech_stack(&self.files);
    }

    /// Total top-level symbols across all files
    pub fn top_level_symbol_count(&self) -> usize {
        self.files.values().map(|f| f.symbols.len()).sum()
    }
}

/// Directory part of a slash-separated relative path, `.` for the root
///
/// The root key is `.` rather than a word like `root`, so it never collides
/// with a top-level directory of that name.
pub fn parent_dir(rel_path: &str) -> &str {
    match rel_path.rfind('/') {
        Some(idx) => &rel_path[..idx],
        None => ".",
    }
}

/// File-name part of a slash-separated relative path
pub fn base_name(rel_path: &str) -> &str {
    match rel_path.rfind('/') {
        Some(idx) => &rel_path[idx + 1..],
        None => rel_path,
    }
}

/// Build the per-directory description map
///
/// Always computed from scratch; never patched.
pub fn module_summary(files: &BTreeMap<String, FileRecord>) -> BTreeMap<String, String> {
    let mut by_dir: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for path in files.keys() {
        by_dir
            .entry(parent_dir(path))
            .or_default()
            .push(base_name(path));
    }

    by_dir
        .into_iter()
        .map(|(dir, mut names)| {
            names.sort_unstable();
            let noun = if names.len() == 1 { "file" } else { "files" };
            let text = format!("Contains {} {}: {}", names.len(), noun, names.join(", "));
            (dir.to_string(), text)
        })
        .collect()
}

/// Sorted distinct language labels of the indexed files
pub fn tech_stack(files: &BTreeMap<String, FileRecord>) -> Vec<String> {
    files
        .keys()
        .filter_map(|path| Lang::from_path(Path::new(path)).ok())
        .map(|lang| lang.tech_label().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
