//! Query command handler - filtered view of a snapshot

use tracing::info;

use crate::cli::{OutputFormat, QueryArgs};
use crate::commands::{encode_toon, resolve_root, CommandContext};
use crate::config::OutlineConfig;
use crate::error::{OutlineError, Result};
use crate::fs_utils::{resolve_target, write_atomic};
use crate::query::{query_snapshot, QueryResult};
use crate::snapshot::{self, collapse_ranges};

/// Run the query command
///
/// The result goes to stdout, or to `--output` with a short summary on
/// stdout instead. `--format toon` selects TOON; any other format gives JSON.
pub fn run_query(args: &QueryArgs, ctx: &CommandContext) -> Result<String> {
    let root = resolve_root(&args.path)?;
    let config = OutlineConfig::load_from(&root)?;
    let snapshot_path = resolve_target(&root, &config.output_name(None));

    let snapshot = snapshot::load(&snapshot_path)?;
    let result = query_snapshot(&snapshot, &args.files, &args.dirs);
    info!(
        "Query matched {} of {} files",
        result.stats.total_files,
        snapshot.files.len()
    );

    let mut rendered = render_result(&result, ctx.format, args.compact)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    match &args.output {
        Some(path) => {
            write_atomic(path, rendered.as_bytes())?;
            Ok(format!(
                "Query result written to {}\n  files: {}\n  symbols: {}\n  languages: {}\n",
                path.display(),
                result.stats.total_files,
                result.stats.total_symbols,
                result.stats.languages.join(", ")
            ))
        }
        None => Ok(rendered),
    }
}

fn render_result(result: &QueryResult, format: OutputFormat, compact: bool) -> Result<String> {
    let to_error = |e: serde_json::Error| OutlineError::InvalidSnapshot {
        path: "query result".to_string(),
        message: e.to_string(),
    };

    match format {
        OutputFormat::Toon => {
            let value = serde_json::to_value(result).map_err(to_error)?;
            Ok(encode_toon(&value))
        }
        OutputFormat::Json | OutputFormat::Text if compact => {
            serde_json::to_string(result).map_err(to_error)
        }
        OutputFormat::Json | OutputFormat::Text => {
            let pretty = serde_json::to_string_pretty(result).map_err(to_error)?;
            Ok(collapse_ranges(&pretty))
        }
    }
}
