//! Generate command handler - full scan into a new snapshot

use std::path::Path;

use tracing::info;

use crate::cli::GenerateArgs;
use crate::commands::{failure_sample, resolve_root, CommandContext, ScanProgress};
use crate::config::OutlineConfig;
use crate::error::Result;
use crate::fs_utils::resolve_target;
use crate::scan::{failure_report, scan_project};
use crate::schema::ProjectSnapshot;
use crate::snapshot;
use crate::walk::ExcludeRules;

/// Run the generate command
pub fn run_generate(args: &GenerateArgs, ctx: &CommandContext) -> Result<String> {
    let root = resolve_root(&args.path)?;
    let config = OutlineConfig::load_from(&root)?;

    let rules = ExcludeRules::new(&config.exclude_patterns(&args.exclude))?;
    let workers = config.workers(args.workers);
    let output = resolve_target(&root, &config.output_name(args.output.as_deref()));

    let name = args
        .name
        .clone()
        .or_else(|| config.project.name.clone())
        .unwrap_or_else(|| default_project_name(&root));
    let goal = args
        .goal
        .clone()
        .or_else(|| config.project.goal.clone())
        .unwrap_or_default();

    info!("Generating snapshot for {}", root.display());
    let progress = ScanProgress::start(ctx, "Extracting");
    let result = scan_project(&root, &rules, workers, progress.callback());
    progress.finish();
    let result = result?;

    let snapshot = ProjectSnapshot::new(name, root.display().to_string(), goal, result.files);
    snapshot::save(&snapshot, &output, args.compact)?;

    let symbols = snapshot.top_level_symbol_count();
    let json_value = serde_json::json!({
        "_type": "generate",
        "project": snapshot.project_name,
        "output": output.display().to_string(),
        "files": snapshot.files.len(),
        "symbols": symbols,
        "tech_stack": snapshot.tech_stack,
        "modules": snapshot.module_summary.len(),
        "failed": result.failures.len(),
        "failures": failure_sample(&result.failures),
    });

    Ok(ctx.render(&json_value, || {
        let mut text = String::from("Snapshot generated:\n");
        text.push_str(&format!("  project: {}\n", snapshot.project_name));
        text.push_str(&format!("  output: {}\n", output.display()));
        text.push_str(&format!("  files: {}\n", snapshot.files.len()));
        text.push_str(&format!("  symbols: {}\n", symbols));
        text.push_str(&format!("  modules: {}\n", snapshot.module_summary.len()));
        text.push_str(&format!("  tech_stack: {}\n", snapshot.tech_stack.join(", ")));
        if ctx.verbose {
            for (dir, summary) in &snapshot.module_summary {
                text.push_str(&format!("    {}: {}\n", dir, summary));
            }
        }
        if let Some(report) = failure_report(&result.failures) {
            text.push_str(&report);
            text.push('\n');
        }
        text
    }))
}

/// Name of the project root directory
fn default_project_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "project".to_string())
}
