//! code-outline: polyglot symbol index generator
//!
//! Walks a source tree, parses every supported file with tree-sitter and
//! records each file's top-level declarations (signature, documentation,
//! line range and container members) in one JSON snapshot. The snapshot is
//! kept current incrementally: only files whose modification time or size
//! changed are parsed again.
//!
//! # Supported Languages
//!
//! - Go
//! - C, C++
//! - Java
//! - JavaScript, JSX, TypeScript, TSX
//! - Python
//! - Rust
//! - C#
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use code_outline::{scan_project, ExcludeRules, ProjectSnapshot};
//!
//! let root = Path::new("my-project");
//! let rules = ExcludeRules::new(&[])?;
//! let result = scan_project(root, &rules, 4, None)?;
//! let snapshot = ProjectSnapshot::new("my-project", "my-project", "", result.files);
//! code_outline::snapshot::save(&snapshot, &root.join("code-outline.json"), false)?;
//! # Ok::<(), code_outline::OutlineError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod extractors;
pub mod fs_utils;
pub mod incremental;
pub mod lang;
pub mod parsing;
pub mod query;
pub mod scan;
pub mod schema;
pub mod snapshot;
pub mod walk;

// Re-export commonly used types
pub use cli::{Cli, OutputFormat};
pub use error::{OutlineError, Result};
pub use extract::{extract, extract_source, FileContent};
pub use incremental::{update_snapshot, ChangeKind, FileChange, Scope, UpdateOutcome};
pub use lang::{Lang, LangFamily};
pub use query::{query_snapshot, QueryResult, QueryStats};
pub use scan::{scan_project, FileFailure, ScanResult};
pub use schema::{FileRecord, Fingerprint, LineRange, ProjectSnapshot, Symbol};
pub use walk::ExcludeRules;
