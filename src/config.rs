//! Project configuration file
//!
//! Optional `.code-outline.toml` at the project root:
//!
//! ```toml
//! [project]
//! name = "shop"
//! goal = "Inventory and ordering services"
//!
//! [scan]
//! exclude = ["generated", "*.pb.go"]
//! workers = 8
//! output = "docs/code-outline.json"
//! ```
//!
//! Command-line flags override every value here; `exclude` lists from both
//! sources are concatenated.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OutlineError, Result};

/// File name looked up in the project root
pub const CONFIG_FILE_NAME: &str = ".code-outline.toml";

/// Snapshot file name used when neither flag nor config names one
pub const DEFAULT_OUTPUT: &str = "code-outline.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineConfig {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name recorded in the snapshot (defaults to the root's directory name)
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub goal: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Extra exclusion patterns (substring or glob)
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub workers: Option<usize>,

    /// Snapshot path relative to the project root
    #[serde(default)]
    pub output: Option<String>,
}

impl OutlineConfig {
    /// Load `.code-outline.toml` from a project root, defaults if absent
    pub fn load_from(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| OutlineError::ConfigError {
            message: format!("Failed to parse {}: {}", path.display(), e),
        })
    }

    /// Snapshot path: flag, then config, then the default name
    pub fn output_name(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| self.scan.output.clone())
            .unwrap_or_else(|| DEFAULT_OUTPUT.to_string())
    }

    /// Worker count: flag (or env), then config, then twice the CPU count
    pub fn workers(&self, flag: Option<usize>) -> usize {
        flag.or(self.scan.workers)
            .unwrap_or_else(default_workers)
            .max(1)
    }

    /// Config patterns followed by the command-line ones
    pub fn exclude_patterns(&self, flag: &[String]) -> Vec<String> {
        self.scan
            .exclude
            .iter()
            .chain(flag.iter())
            .filter(|p| !p.trim().is_empty())
            .cloned()
            .collect()
    }
}

/// Twice the available parallelism, at least 1
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_mul(2)
        .max(1)
}
