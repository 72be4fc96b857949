//! logdex CLI binary entrypoint.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use logdex::LogIndexEngine;
use logdex_cli::cli::{Cli, Commands};
use logdex_cli::commands::{
    FilesCommand, RefreshCommand, SearchCommand, ShowCommand, StatsCommand,
};
use logdex_cli::output::OutputFormat;

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), logdex_cli::CliError> {
    let format = OutputFormat::new(cli.format);
    let engine = Arc::new(LogIndexEngine::new(cli.load_config()?)?);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Files => {
            FilesCommand::new(engine).execute(&mut stdout, &format)?;
        }
        Commands::Refresh => {
            RefreshCommand::new(engine).execute(&mut stdout, &format).await?;
        }
        Commands::Stats => {
            StatsCommand::new(engine).execute(&mut stdout, &format)?;
        }
        Commands::Search(args) => {
            SearchCommand::new(engine).execute(&mut stdout, &format, &args)?;
        }
        Commands::Show { id } => {
            ShowCommand::new(engine).execute(&mut stdout, &format, &id)?;
        }
    }

    Ok(())
}
