//! code-outline CLI entry point

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use code_outline::cli::{Cli, Commands};
use code_outline::commands::{run_generate, run_query, run_update, CommandContext};

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(&cli);

    match run(&cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `-v` / `-q`
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> code_outline::Result<String> {
    let ctx = CommandContext::from_cli(cli.format, cli.verbose, cli.progress);

    match &cli.command {
        Commands::Generate(args) => run_generate(args, &ctx),
        Commands::Update(args) => run_update(args, &ctx),
        Commands::Query(args) => run_query(args, &ctx),
    }
}
