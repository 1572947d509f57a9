mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use coins_ledger::TransferEngine;
use commands::Args;

fn main() -> Result<()> {
    // Parse the CLI arguments
    let args = Args::parse();

    // Initialize logger with default level of info (can be overridden with RUST_LOG)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. Initialize the TransferEngine
    let engine = TransferEngine::new();

    // 2. Open and process the input file
    log::info!("Processing requests from {}", args.input_file.display());
    let file = std::fs::File::open(&args.input_file)
        .with_context(|| format!("Failed to open input file: {}", args.input_file.display()))?;

    engine
        .process_requests(file)
        .context("Failed to process requests")?;

    log::info!(
        "Processing complete, exporting {} accounts",
        engine.account_count()
    );

    // 3. Export the account table to stdout
    engine
        .export_accounts(std::io::stdout())
        .context("Failed to export accounts to stdout")?;

    // 4. Optionally export the transfer table
    if let Some(path) = &args.transfers_out {
        let out = std::fs::File::create(path)
            .with_context(|| format!("Failed to create transfers file: {}", path.display()))?;
        engine
            .export_transfers(out)
            .with_context(|| format!("Failed to export transfers to {}", path.display()))?;
    }

    log::info!("Export complete");

    Ok(())
}
