//! Update command handler - incremental refresh of an existing snapshot

use tracing::info;

use crate::cli::UpdateArgs;
use crate::commands::{failure_sample, resolve_root, CommandContext, ScanProgress};
use crate::config::OutlineConfig;
use crate::error::Result;
use crate::fs_utils::resolve_target;
use crate::incremental::{update_snapshot, ChangeKind, Scope};
use crate::scan::failure_report;
use crate::snapshot;
use crate::walk::ExcludeRules;

/// Run the update command
///
/// The snapshot file is only rewritten when at least one change was applied.
pub fn run_update(args: &UpdateArgs, ctx: &CommandContext) -> Result<String> {
    let root = resolve_root(&args.path)?;
    let config = OutlineConfig::load_from(&root)?;

    let rules = ExcludeRules::new(&config.exclude_patterns(&args.exclude))?;
    let workers = config.workers(args.workers);
    let output = resolve_target(&root, &config.output_name(args.output.as_deref()));

    let prior = snapshot::load(&output)?;
    let scope = Scope {
        files: non_empty(&args.files),
        dirs: non_empty(&args.dirs),
    };

    info!("Updating {}", output.display());
    let progress = ScanProgress::start(ctx, "Re-extracting");
    let outcome = update_snapshot(prior, &root, &scope, &rules, workers, progress.callback());
    progress.finish();
    let outcome = outcome?;

    let written = !outcome.changes.is_empty();
    if written {
        snapshot::save(&outcome.snapshot, &output, args.compact)?;
    }

    let added = outcome.count(ChangeKind::Added);
    let modified = outcome.count(ChangeKind::Modified);
    let deleted = outcome.count(ChangeKind::Deleted);

    let json_value = serde_json::json!({
        "_type": "update",
        "output": output.display().to_string(),
        "written": written,
        "added": added,
        "modified": modified,
        "deleted": deleted,
        "changes": outcome.changes,
        "files": outcome.snapshot.files.len(),
        "symbols": outcome.snapshot.top_level_symbol_count(),
        "failed": outcome.failures.len(),
        "failures": failure_sample(&outcome.failures),
    });

    Ok(ctx.render(&json_value, || {
        let mut text = if written {
            format!(
                "Snapshot updated: {} added, {} modified, {} deleted\n",
                added, modified, deleted
            )
        } else {
            String::from("No changes detected\n")
        };
        for change in &outcome.changes {
            let marker = match change.kind {
                ChangeKind::Added => '+',
                ChangeKind::Modified => '~',
                ChangeKind::Deleted => '-',
            };
            text.push_str(&format!("  {} {}\n", marker, change.path));
        }
        text.push_str(&format!("  files: {}\n", outcome.snapshot.files.len()));
        text.push_str(&format!(
            "  symbols: {}\n",
            outcome.snapshot.top_level_symbol_count()
        ));
        if let Some(report) = failure_report(&outcome.failures) {
            text.push_str(&report);
            text.push('\n');
        }
        text
    }))
}

fn non_empty(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
