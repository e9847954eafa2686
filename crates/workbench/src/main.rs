use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use workbench::cli::{Cli, Commands};
use workbench::command::{AnalyzeOutput, Workbench};
use workbench::history::{FileStore, StoreError};
use workbench::runtime::boot;

fn run(cli: Cli) -> anyhow::Result<AnalyzeOutput> {
    let config = boot::boot().map_err(|e| anyhow::anyhow!(e))?;
    let store = FileStore::new(
        &config.history.path,
        config.history.max_entries,
        config.history.max_bytes,
    );
    let workbench = Workbench::new(&config, &store)?;

    match &cli.command {
        Commands::Analyze(args) => workbench.analyze(args),
        Commands::History { action } => Ok(AnalyzeOutput {
            text: workbench.history(action)?,
            save_error: None,
        }),
    }
}

fn report_store_error(e: &StoreError) {
    match e.capacity_hint() {
        Some(hint) => eprintln!("error: {}", hint),
        None => eprintln!("error: failed to save analysis: {}", e),
    }
}

fn main() -> ExitCode {
    boot::init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(output.text.as_bytes()) {
                error!("Failed to write output: {}", e);
                return ExitCode::FAILURE;
            }
            match output.save_error {
                Some(e) => {
                    report_store_error(&e);
                    ExitCode::FAILURE
                }
                None => ExitCode::SUCCESS,
            }
        }
        Err(e) => {
            match e.downcast_ref::<StoreError>() {
                Some(store_err) => report_store_error(store_err),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}
