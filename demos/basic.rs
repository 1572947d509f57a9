//! Basic example of using the `TransferEngine`.
//!
//! Run with: `cargo run --example basic`

use coins_ledger::TransferEngine;
use std::io::Cursor;

fn main() {
    // Initialize logger (optional, but shows what's happening)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Sample requests as CSV
    let requests = r"type,owner,currency,from,to,amount
open,nikola,PHP,,,100
open,maja,PHP,,,100
transfer,,,1,2,10
transfer,,,2,1,25.50
transfer,,,1,2,1000
";

    // Create engine and process requests (the 1000 transfer is rejected
    // for insufficient funds and logged)
    let engine = TransferEngine::new();
    engine
        .process_requests(Cursor::new(requests))
        .expect("Failed to process requests");

    // Export results to stdout
    println!("\n=== Final Account State ===");
    engine
        .export_accounts(std::io::stdout())
        .expect("Failed to export accounts");

    println!("\n=== Transfers ===");
    engine
        .export_transfers(std::io::stdout())
        .expect("Failed to export transfers");
}
