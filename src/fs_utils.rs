//! Cross-platform filesystem and path utilities
//!
//! - `normalize_path`: Strips Windows `\\?\` prefix from canonicalized paths
//! - `normalize_slashes` / `relative_slash_path`: snapshot keys use `/` on every platform
//! - `atomic_rename` / `write_atomic`: replace a file without exposing a partial write

use std::io;
use std::path::{Component, Path, PathBuf};

/// Normalize Windows paths by removing the `\\?\` prefix if present.
///
/// On Windows, `Path::canonicalize()` returns paths with the extended-length path prefix
/// (`\\?\C:\...`), which breaks prefix stripping against user-supplied paths.
/// This function strips the prefix on Windows while being a no-op on Unix.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use code_outline::fs_utils::normalize_path;
///
/// // On Unix, path is returned unchanged
/// let path = PathBuf::from("/home/user/repo");
/// assert_eq!(normalize_path(&path), path);
/// ```
pub fn normalize_path(path: &Path) -> PathBuf {
    #[cfg(windows)]
    {
        let s = path.to_string_lossy();
        // Handle UNC paths: \\?\UNC\server\share -> \\server\share
        if let Some(stripped) = s.strip_prefix(r"\\?\UNC\") {
            return PathBuf::from(format!(r"\\{}", stripped));
        }
        // Handle local paths: \\?\C:\path -> C:\path
        if let Some(stripped) = s.strip_prefix(r"\\?\") {
            return PathBuf::from(stripped);
        }
    }
    path.to_path_buf()
}

/// Canonical form of a path string used as a snapshot key.
///
/// Backslashes become `/`, repeated slashes collapse, a leading `./` and a
/// trailing `/` are dropped.
///
/// # Examples
///
/// ```
/// use code_outline::fs_utils::normalize_slashes;
///
/// assert_eq!(normalize_slashes(r"src\\util\\math.go"), "src/util/math.go");
/// assert_eq!(normalize_slashes("./pkg//api/"), "pkg/api");
/// ```
pub fn normalize_slashes(path: &str) -> String {
    let replaced = path.replace('\\', "/");
    let mut out = String::with_capacity(replaced.len());
    for segment in replaced.split('/') {
        if segment.is_empty() || (segment == "." && out.is_empty()) {
            if out.is_empty() && replaced.starts_with('/') && segment.is_empty() {
                out.push('/');
            }
            continue;
        }
        if !out.is_empty() && !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(segment);
    }
    out
}

/// Path of `path` relative to `root`, slash-separated.
///
/// Falls back to the normalized full path when `path` is not under `root`.
pub fn relative_slash_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() || relative.is_absolute() {
        return normalize_slashes(&relative.to_string_lossy());
    }
    parts.join("/")
}

/// Resolve a user-supplied target against the project root.
///
/// Absolute targets are returned as-is.
pub fn resolve_target(root: &Path, target: &str) -> PathBuf {
    let target_path = Path::new(target);
    if target_path.is_absolute() {
        target_path.to_path_buf()
    } else {
        root.join(target_path)
    }
}

/// Cross-platform atomic rename that handles Windows file replacement.
///
/// On Unix, `fs::rename` atomically replaces the target if it exists.
/// On Windows, `fs::rename` fails if the target exists, so the target is
/// deleted first.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use code_outline::fs_utils::atomic_rename;
///
/// // Write to temp file, then atomically replace target
/// std::fs::write("code-outline.json.tmp", "{}")?;
/// atomic_rename(Path::new("code-outline.json.tmp"), Path::new("code-outline.json"))?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn atomic_rename(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        if dst.exists() {
            std::fs::remove_file(dst)?;
        }
    }
    std::fs::rename(src, dst)
}

/// Write `contents` to `path` through a sibling temp file and a rename.
///
/// Creates the parent directory if needed. A failed write leaves any
/// existing file at `path` untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string());
    let tmp = path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()));

    if let Err(e) = std::fs::write(&tmp, contents) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    atomic_rename(&tmp, path).inspect_err(|_| {
        let _ = std::fs::remove_file(&tmp);
    })
}
