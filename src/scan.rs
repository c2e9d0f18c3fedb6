//! Parallel extraction over a bounded worker pool
//!
//! Every file is an independent task. Workers hand finished records to a
//! mutex-guarded map and send per-file failures down a channel drained by a
//! dedicated collector thread, so one broken file never stops the scan.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use parking_lot::Mutex;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{OutlineError, Result};
use crate::parsing::extract_file;
use crate::schema::FileRecord;
use crate::walk::{walk_dir, ExcludeRules, WalkedFile};

/// Progress callback receiving (completed, total)
pub type ScanProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

/// How many failure messages reports show before truncating
pub const FAILURE_SAMPLE: usize = 5;

/// One file that could not be indexed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: String,
    pub message: String,
}

/// Records and failures of one extraction batch
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Successfully extracted files keyed by relative path
    pub files: BTreeMap<String, FileRecord>,
    /// Failures sorted by path
    pub failures: Vec<FileFailure>,
}

/// Walk the whole project and extract every supported file
pub fn scan_project(
    root: &Path,
    rules: &ExcludeRules,
    workers: usize,
    progress: Option<ScanProgressCallback>,
) -> Result<ScanResult> {
    let files = walk_dir(root, root, rules)?;
    info!("Scanning {} files with {} workers", files.len(), workers);
    extract_files(&files, workers, progress)
}

/// Extract a batch of files on a pool of `workers` threads
pub fn extract_files(
    files: &[WalkedFile],
    workers: usize,
    progress: Option<ScanProgressCallback>,
) -> Result<ScanResult> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(|i| format!("outline-worker-{}", i))
        .build()
        .map_err(|e| OutlineError::ConfigError {
            message: format!("Failed to start worker pool: {}", e),
        })?;

    let total = files.len();
    let completed = AtomicUsize::new(0);
    let records: Mutex<BTreeMap<String, FileRecord>> = Mutex::new(BTreeMap::new());

    let (failure_tx, failure_rx) = mpsc::channel::<FileFailure>();
    let collector = thread::spawn(move || failure_rx.into_iter().collect::<Vec<_>>());

    pool.install(|| {
        files
            .par_iter()
            .for_each_with(failure_tx, |failures, file| {
                match extract_file(&file.abs_path, file.lang) {
                    Ok(record) => {
                        debug!(
                            "Extracted {} symbols from {}",
                            record.symbols.len(),
                            file.rel_path
                        );
                        records.lock().insert(file.rel_path.clone(), record);
                    }
                    Err(e) => {
                        warn!("Skipping {}: {}", file.rel_path, e);
                        let _ = failures.send(FileFailure {
                            path: file.rel_path.clone(),
                            message: e.to_string(),
                        });
                    }
                }

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(ref cb) = progress {
                    cb(done, total);
                }
            });
    });

    // All senders are dropped once the parallel loop returns
    let mut failures = collector.join().unwrap_or_default();
    failures.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(ScanResult {
        files: records.into_inner(),
        failures,
    })
}

/// Human-readable failure summary: the count plus the first few messages
pub fn failure_report(failures: &[FileFailure]) -> Option<String> {
    if failures.is_empty() {
        return None;
    }

    let mut report = format!("{} file(s) could not be indexed:", failures.len());
    for failure in failures.iter().take(FAILURE_SAMPLE) {
        report.push_str(&format!("\n  {}: {}", failure.path, failure.message));
    }
    if failures.len() > FAILURE_SAMPLE {
        report.push_str(&format!("\n  ... and {} more", failures.len() - FAILURE_SAMPLE));
    }
    Some(report)
}
