//! Command modules for the code-outline CLI
//!
//! Each command module implements a single top-level command:
//! - `generate` - Full scan into a new snapshot
//! - `update` - Incremental refresh of an existing snapshot
//! - `query` - Filtered view of a snapshot with recomputed stats
//!
//! All command handlers take their respective `Args` struct from `cli.rs`
//! and a shared `CommandContext` for output format and verbosity. Handlers
//! return the text to print; errors carry their own exit code.

pub mod generate;
pub mod query;
pub mod update;

pub use generate::run_generate;
pub use query::run_query;
pub use update::run_update;

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::OutputFormat;
use crate::error::{OutlineError, Result};
use crate::fs_utils::normalize_path;
use crate::scan::{FileFailure, ScanProgressCallback, FAILURE_SAMPLE};

/// Shared context passed to all command handlers
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Report format (text, toon, or json)
    pub format: OutputFormat,
    /// Show verbose output
    pub verbose: bool,
    /// Show a progress bar during extraction
    pub progress: bool,
}

impl Default for CommandContext {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            verbose: false,
            progress: false,
        }
    }
}

impl CommandContext {
    /// Create a new CommandContext from CLI args
    pub fn from_cli(format: OutputFormat, verbose: bool, progress: bool) -> Self {
        Self {
            format,
            verbose,
            progress,
        }
    }

    /// Render a command report in the selected format
    ///
    /// `text` is only built when the text format is selected.
    pub fn render(&self, value: &serde_json::Value, text: impl FnOnce() -> String) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(value).unwrap_or_default() + "\n"
            }
            OutputFormat::Toon => encode_toon(value) + "\n",
            OutputFormat::Text => text(),
        }
    }
}

/// Encode a JSON value as proper TOON using the rtoon library
pub fn encode_toon(value: &serde_json::Value) -> String {
    rtoon::encode_default(value).unwrap_or_else(|e| format!("TOON encoding error: {}", e))
}

/// Canonical project root; an unreadable root is a setup error
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    let canonical = path.canonicalize().map_err(|e| OutlineError::ProjectRoot {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    if !canonical.is_dir() {
        return Err(OutlineError::ProjectRoot {
            path: path.display().to_string(),
            message: "not a directory".to_string(),
        });
    }
    Ok(normalize_path(&canonical))
}

/// JSON view of the first few failures
pub fn failure_sample(failures: &[FileFailure]) -> serde_json::Value {
    serde_json::to_value(&failures[..failures.len().min(FAILURE_SAMPLE)])
        .unwrap_or(serde_json::Value::Null)
}

/// Optional indicatif bar driven by the scan progress callback
pub struct ScanProgress {
    bar: Option<ProgressBar>,
}

impl ScanProgress {
    /// Start a bar when `--progress` is set, otherwise a no-op
    pub fn start(ctx: &CommandContext, message: &'static str) -> Self {
        if !ctx.progress {
            return Self { bar: None };
        }

        let pb = ProgressBar::new(0);
        if let Ok(style) =
            ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        pb.set_message(message);
        Self { bar: Some(pb) }
    }

    pub fn callback(&self) -> Option<ScanProgressCallback> {
        self.bar.clone().map(|pb| {
            Box::new(move |done: usize, total: usize| {
                pb.set_length(total as u64);
                pb.set_position(done as u64);
            }) as ScanProgressCallback
        })
    }

    pub fn finish(&self) {
        if let Some(pb) = &self.bar {
            pb.finish_and_clear();
        }
    }
}
