//! Snapshot queries
//!
//! Selects a subset of a snapshot's files and recomputes aggregate stats
//! over the selection.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Serialize;

use crate::fs_utils::normalize_slashes;
use crate::lang::Lang;
use crate::schema::{base_name, parent_dir, FileRecord, ProjectSnapshot};

/// Query result: matching files plus stats over them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub files: BTreeMap<String, FileRecord>,
    pub stats: QueryStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryStats {
    pub total_files: usize,
    /// Top-level symbols only
    pub total_symbols: usize,
    /// Sorted distinct language labels
    pub languages: Vec<String>,
}

/// Select files by file and directory targets; no targets selects all
///
/// A file target matches paths that contain it or share its base name. A
/// directory target matches files whose directory starts with it or whose
/// path contains it.
pub fn query_snapshot(snapshot: &ProjectSnapshot, files: &[String], dirs: &[String]) -> QueryResult {
    let file_targets: Vec<String> = normalized_targets(files);
    let dir_targets: Vec<String> = normalized_targets(dirs);
    let select_all = file_targets.is_empty() && dir_targets.is_empty();

    let selected: BTreeMap<String, FileRecord> = snapshot
        .files
        .iter()
        .filter(|(path, _)| {
            select_all
                || file_targets.iter().any(|t| matches_file(path, t))
                || dir_targets.iter().any(|t| matches_dir(path, t))
        })
        .map(|(path, record)| (path.clone(), record.clone()))
        .collect();

    let stats = stats_for(&selected);
    QueryResult {
        files: selected,
        stats,
    }
}

fn normalized_targets(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|t| normalize_slashes(t.trim()))
        .filter(|t| !t.is_empty())
        .collect()
}

fn matches_file(path: &str, target: &str) -> bool {
    path.contains(target) || base_name(path) == base_name(target)
}

fn matches_dir(path: &str, target: &str) -> bool {
    parent_dir(path).starts_with(target) || path.contains(target)
}

fn stats_for(files: &BTreeMap<String, FileRecord>) -> QueryStats {
    let languages: BTreeSet<&str> = files
        .keys()
        .filter_map(|path| Lang::from_path(Path::new(path)).ok())
        .map(|lang| lang.tech_label())
        .collect();

    QueryStats {
        total_files: files.len(),
        total_symbols: files.values().map(|f| f.symbols.len()).sum(),
        languages: languages.into_iter().map(str::to_string).collect(),
    }
}
