//! Snapshot persistence
//!
//! The snapshot is one JSON document. Pretty output uses a two-space indent
//! with every `range` kept on one line; compact output is a single line.
//! Writes go through a temp file and a rename, so a failed save never
//! leaves a truncated snapshot behind.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{OutlineError, Result};
use crate::fs_utils::{normalize_slashes, write_atomic};
use crate::schema::ProjectSnapshot;

static RANGE_ARRAY: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r#""range": \[\s*(\d+),\s*(\d+)\s*\]"#).ok());

/// Serialize a snapshot to JSON text
pub fn render_json(snapshot: &ProjectSnapshot, compact: bool) -> Result<String> {
    if compact {
        return serde_json::to_string(snapshot).map_err(|e| serialize_error(snapshot, e));
    }

    let pretty =
        serde_json::to_string_pretty(snapshot).map_err(|e| serialize_error(snapshot, e))?;
    Ok(collapse_ranges(&pretty))
}

fn serialize_error(snapshot: &ProjectSnapshot, e: serde_json::Error) -> OutlineError {
    OutlineError::InvalidSnapshot {
        path: snapshot.project_root.clone(),
        message: format!("serialization failed: {}", e),
    }
}

/// Put every `"range": [a, b]` back on one line
pub fn collapse_ranges(pretty: &str) -> String {
    match RANGE_ARRAY.as_ref() {
        Some(re) => re.replace_all(pretty, r#""range": [$1, $2]"#).into_owned(),
        None => pretty.to_string(),
    }
}

/// Write a snapshot atomically, creating the parent directory if needed
pub fn save(snapshot: &ProjectSnapshot, path: &Path, compact: bool) -> Result<()> {
    let mut json = render_json(snapshot, compact)?;
    json.push('\n');
    write_atomic(path, json.as_bytes())?;
    debug!("Wrote snapshot {} ({} bytes)", path.display(), json.len());
    Ok(())
}

/// Load a snapshot, normalizing stored path keys to forward slashes
pub fn load(path: &Path) -> Result<ProjectSnapshot> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            OutlineError::FileNotFound {
                path: format!("{} (run `code-outline generate` first)", path.display()),
            }
        } else {
            OutlineError::Io(e)
        }
    })?;

    let mut snapshot: ProjectSnapshot =
        serde_json::from_str(&content).map_err(|e| OutlineError::InvalidSnapshot {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    if snapshot.files.keys().any(|k| normalize_slashes(k) != *k) {
        snapshot.files = std::mem::take(&mut snapshot.files)
            .into_iter()
            .map(|(k, v)| (normalize_slashes(&k), v))
            .collect::<BTreeMap<_, _>>();
        snapshot.refresh_derived();
    }

    Ok(snapshot)
}
