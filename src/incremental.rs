//! Incremental snapshot update
//!
//! Each file is classified by comparing the current walk against the prior
//! snapshot:
//!
//! | prior | on disk | fingerprint | change    |
//! |-------|---------|-------------|-----------|
//! | no    | yes     |             | Added     |
//! | yes   | yes     | differs     | Modified  |
//! | yes   | yes     | same        | (none)    |
//! | yes   | no      |             | Deleted   |
//!
//! Only Added and Modified files are re-extracted. When nothing changed the
//! prior snapshot is returned as-is, `last_updated` included.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::fs_utils::{relative_slash_path, resolve_target};
use crate::lang::Lang;
use crate::scan::{extract_files, FileFailure, ScanProgressCallback};
use crate::schema::{now_seconds, Fingerprint, ProjectSnapshot};
use crate::walk::{walk_dir, ExcludeRules, WalkedFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
        };
        f.write_str(label)
    }
}

/// One applied change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub path: String,
    pub kind: ChangeKind,
}

/// Files and directories an update is restricted to
///
/// Targets are relative to the project root or absolute. An empty scope
/// means the whole tree.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub files: Vec<String>,
    pub dirs: Vec<String>,
}

impl Scope {
    pub fn is_whole_tree(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }
}

/// Result of an incremental update
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub snapshot: ProjectSnapshot,
    /// Applied changes sorted by path; empty means the snapshot is untouched
    pub changes: Vec<FileChange>,
    /// Files that could not be re-extracted
    pub failures: Vec<FileFailure>,
}

impl UpdateOutcome {
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind == kind).count()
    }
}

/// Files currently on disk within the scope, plus which prior entries the
/// scope covers
struct ScopedWalk {
    current: Vec<WalkedFile>,
    covers: Box<dyn Fn(&str) -> bool>,
}

/// Bring `prior` up to date with the files under `root`
pub fn update_snapshot(
    prior: ProjectSnapshot,
    root: &Path,
    scope: &Scope,
    rules: &ExcludeRules,
    workers: usize,
    progress: Option<ScanProgressCallback>,
) -> Result<UpdateOutcome> {
    let walk = walk_scope(root, scope, rules)?;
    let current_paths: BTreeSet<&str> = walk.current.iter().map(|f| f.rel_path.as_str()).collect();

    // Added and modified candidates
    let mut candidates: Vec<WalkedFile> = Vec::new();
    for file in &walk.current {
        match prior.files.get(&file.rel_path) {
            None => candidates.push(file.clone()),
            Some(record) => {
                let stale = Fingerprint::from_path(&file.abs_path)
                    .map_or(true, |fp| record.is_stale(&fp));
                if stale {
                    candidates.push(file.clone());
                }
            }
        }
    }

    let deleted: Vec<String> = prior
        .files
        .keys()
        .filter(|path| (walk.covers)(path.as_str()) && !current_paths.contains(path.as_str()))
        .cloned()
        .collect();

    debug!(
        "{} candidate(s) for re-extraction, {} deletion(s)",
        candidates.len(),
        deleted.len()
    );

    let extracted = if candidates.is_empty() {
        Default::default()
    } else {
        extract_files(&candidates, workers, progress)?
    };

    let mut changes: Vec<FileChange> = Vec::new();
    for file in &candidates {
        if !extracted.files.contains_key(&file.rel_path) {
            if prior.files.contains_key(&file.rel_path) {
                warn!("Keeping previous index for {}", file.rel_path);
            }
            continue;
        }
        let kind = if prior.files.contains_key(&file.rel_path) {
            ChangeKind::Modified
        } else {
            ChangeKind::Added
        };
        changes.push(FileChange {
            path: file.rel_path.clone(),
            kind,
        });
    }
    changes.extend(deleted.iter().map(|path| FileChange {
        path: path.clone(),
        kind: ChangeKind::Deleted,
    }));
    changes.sort_by(|a, b| a.path.cmp(&b.path));

    if changes.is_empty() {
        info!("No changes detected");
        return Ok(UpdateOutcome {
            snapshot: prior,
            changes,
            failures: extracted.failures,
        });
    }

    let mut snapshot = prior;
    let mut new_records = extracted.files;
    for change in &changes {
        match change.kind {
            ChangeKind::Added | ChangeKind::Modified => {
                if let Some(record) = new_records.remove(&change.path) {
                    snapshot.files.insert(change.path.clone(), record);
                }
            }
            ChangeKind::Deleted => {
                snapshot.files.remove(&change.path);
            }
        }
    }
    snapshot.refresh_derived();
    snapshot.last_updated = now_seconds();

    info!("Applied {} change(s)", changes.len());
    Ok(UpdateOutcome {
        snapshot,
        changes,
        failures: extracted.failures,
    })
}

fn walk_scope(root: &Path, scope: &Scope, rules: &ExcludeRules) -> Result<ScopedWalk> {
    if scope.is_whole_tree() {
        return Ok(ScopedWalk {
            current: walk_dir(root, root, rules)?,
            covers: Box::new(|_| true),
        });
    }

    let mut current: BTreeMap<String, WalkedFile> = BTreeMap::new();
    let mut file_targets: BTreeSet<String> = BTreeSet::new();
    let mut dir_targets: Vec<String> = Vec::new();

    for target in &scope.files {
        let abs_path = resolve_target(root, target);
        let rel_path = relative_slash_path(root, &abs_path);
        file_targets.insert(rel_path.clone());

        // Missing, unsupported or excluded targets stay out of `current`
        if !abs_path.is_file() || rules.is_excluded(&rel_path) {
            continue;
        }
        if let Ok(lang) = Lang::from_path(&abs_path) {
            current.insert(
                rel_path.clone(),
                WalkedFile {
                    abs_path,
                    rel_path,
                    lang,
                },
            );
        }
    }

    for target in &scope.dirs {
        let abs_dir = resolve_target(root, target);
        let rel_dir = relative_slash_path(root, &abs_dir);
        if abs_dir.is_dir() {
            for file in walk_dir(root, &abs_dir, rules)? {
                current.insert(file.rel_path.clone(), file);
            }
        }
        dir_targets.push(rel_dir);
    }

    let covers = move |path: &str| {
        file_targets.contains(path)
            || dir_targets.iter().any(|dir| {
                dir.is_empty()
                    || dir == "."
                    || path
                        .strip_prefix(dir.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            })
    };

    Ok(ScopedWalk {
        current: current.into_values().collect(),
        covers: Box::new(covers),
    })
}
