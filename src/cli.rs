//! CLI argument definitions using clap with subcommand architecture
//!
//! This module defines the command-line interface for code-outline:
//! `generate` builds a snapshot from scratch, `update` refreshes it
//! incrementally and `query` reads a subset back out.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Polyglot source symbol index generator
#[derive(Parser, Debug)]
#[command(name = "code-outline")]
#[command(about = "Generate and maintain a structured symbol index of a source tree")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Report format (applies to all commands)
    #[arg(long, default_value = "text", value_enum, global = true)]
    pub format: OutputFormat,

    /// Show debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show a progress bar while extracting
    #[arg(long, global = true)]
    pub progress: bool,
}

// ============================================
// Main Commands Enum
// ============================================

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a project and write a new snapshot
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Re-extract changed files and merge them into the existing snapshot
    #[command(visible_alias = "u")]
    Update(UpdateArgs),

    /// Print the indexed files and symbols of selected files or directories
    #[command(visible_alias = "q")]
    Query(QueryArgs),
}

// ============================================
// Generate Subcommand
// ============================================

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Project root to scan
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Snapshot file, relative to the project root unless absolute
    /// [default: code-outline.json]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Extra exclude patterns, comma separated (substring or glob)
    #[arg(short, long, value_delimiter = ',', value_name = "PATTERNS")]
    pub exclude: Vec<String>,

    /// Write compact single-line JSON
    #[arg(short, long)]
    pub compact: bool,

    /// Number of extraction workers [default: 2 x CPU cores]
    #[arg(long, env = "CODE_OUTLINE_WORKERS", value_name = "N")]
    pub workers: Option<usize>,

    /// Project name [default: the root directory's name]
    #[arg(long)]
    pub name: Option<String>,

    /// Free-text project goal stored in the snapshot
    #[arg(long)]
    pub goal: Option<String>,
}

// ============================================
// Update Subcommand
// ============================================

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Project root
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Snapshot file, relative to the project root unless absolute
    /// [default: code-outline.json]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Extra exclude patterns, comma separated (substring or glob)
    #[arg(short, long, value_delimiter = ',', value_name = "PATTERNS")]
    pub exclude: Vec<String>,

    /// Only update these files, comma separated
    #[arg(short, long, value_delimiter = ',', value_name = "FILES")]
    pub files: Vec<String>,

    /// Only update these directories, comma separated
    #[arg(short, long, value_delimiter = ',', value_name = "DIRS")]
    pub dirs: Vec<String>,

    /// Write compact single-line JSON
    #[arg(short, long)]
    pub compact: bool,

    /// Number of extraction workers [default: 2 x CPU cores]
    #[arg(long, env = "CODE_OUTLINE_WORKERS", value_name = "N")]
    pub workers: Option<usize>,
}

// ============================================
// Query Subcommand
// ============================================

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Project root holding the snapshot
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Select files whose path contains one of these, comma separated
    #[arg(short, long, value_delimiter = ',', value_name = "FILES")]
    pub files: Vec<String>,

    /// Select files under these directories, comma separated
    #[arg(short, long, value_delimiter = ',', value_name = "DIRS")]
    pub dirs: Vec<String>,

    /// Compact single-line JSON
    #[arg(short, long)]
    pub compact: bool,
}

// ============================================
// Shared Types
// ============================================

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default for terminal)
    #[default]
    #[value(alias = "pretty")]
    Text,
    /// TOON (Token-Oriented Object Notation) - token-efficient format for AI consumption
    Toon,
    /// JSON - standard JSON output for machine parsing
    Json,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Default tracing directive for the chosen verbosity
    pub fn log_directive(&self) -> &'static str {
        if self.quiet {
            "code_outline=error"
        } else if self.verbose {
            "code_outline=debug"
        } else {
            "code_outline=warn"
        }
    }
}
