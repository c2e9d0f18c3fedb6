//! Unified parsing module for symbol extraction.
//!
//! This module turns one source file into a [`FileRecord`]: it stats the
//! file, reads it, parses it with a fresh tree-sitter parser and runs the
//! extractor. Used by both full scans and incremental updates.
//!
//! # Example
//!
//! ```ignore
//! use code_outline::parsing::parse_and_extract;
//! use code_outline::Lang;
//! use std::path::Path;
//!
//! let source = "func hello() string { return \"world\" }";
//! let content = parse_and_extract(Path::new("hello.go"), source, Lang::Go)?;
//! ```

use std::any::Any;
use std::fs;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use crate::error::{OutlineError, Result};
use crate::extract::{extract, FileContent};
use crate::lang::Lang;
use crate::schema::{FileRecord, Fingerprint};

/// Parse source code and extract its symbol outline.
///
/// A new parser is created per call; parsers are never shared between
/// threads.
///
/// # Errors
///
/// Returns `OutlineError::ParseFailure` if the grammar cannot be loaded or
/// the parser produces no tree.
pub fn parse_and_extract(file_path: &Path, source: &str, lang: Lang) -> Result<FileContent> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&lang.tree_sitter_language())
        .map_err(|e| OutlineError::ParseFailure {
            path: file_path.display().to_string(),
            message: format!("failed to load {} grammar: {:?}", lang.name(), e),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| OutlineError::ParseFailure {
            path: file_path.display().to_string(),
            message: "parser returned no tree".to_string(),
        })?;

    Ok(extract(&tree, source, lang))
}

/// Read, parse and extract one file from disk.
///
/// The fingerprint is taken before the read so an edit racing the scan is
/// seen as stale next time. Bytes that are not valid UTF-8 are replaced.
/// A panic inside the grammar or the extractor is reported as an
/// `ExtractionFailure` for this file only.
pub fn extract_file(path: &Path, lang: Lang) -> Result<FileRecord> {
    let metadata = fs::metadata(path).map_err(|e| read_error(path, e))?;
    let fingerprint =
        Fingerprint::from_metadata(&metadata).ok_or_else(|| OutlineError::ExtractionFailure {
            path: path.display().to_string(),
            message: "modification time unavailable".to_string(),
        })?;

    let bytes = fs::read(path).map_err(|e| read_error(path, e))?;
    let text = String::from_utf8_lossy(&bytes);

    let content = catch_unwind(AssertUnwindSafe(|| parse_and_extract(path, &text, lang)))
        .map_err(|payload| OutlineError::ExtractionFailure {
            path: path.display().to_string(),
            message: format!("extractor panicked: {}", panic_message(payload.as_ref())),
        })??;

    Ok(FileRecord {
        documentation: content.documentation,
        symbols: content.symbols,
        last_modified: fingerprint.last_modified,
        size: fingerprint.size,
    })
}

fn read_error(path: &Path, err: std::io::Error) -> OutlineError {
    if err.kind() == std::io::ErrorKind::NotFound {
        OutlineError::FileNotFound {
            path: path.display().to_string(),
        }
    } else {
        OutlineError::ExtractionFailure {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
