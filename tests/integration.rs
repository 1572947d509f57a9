//! Integration tests for the `TransferEngine`.
//!
//! These tests exercise the full E2E flow: CSV requests → processing → CSV output.
use coins_ledger::{Account, Currency, Transfer, TransferEngine};
use rust_decimal_macros::dec;
use std::io::Cursor;

/// Helper to run a request CSV through the engine and get the account table
fn process_csv(input: &str) -> String {
    let engine = TransferEngine::new();
    let reader = Cursor::new(input);
    engine.process_requests(reader).unwrap();

    let mut output = Vec::new();
    engine.export_accounts(&mut output).unwrap();
    String::from_utf8(output).unwrap()
}

/// Same, but also returns the transfer table
fn process_csv_with_transfers(input: &str) -> (String, String) {
    let engine = TransferEngine::new();
    engine.process_requests(Cursor::new(input)).unwrap();

    let mut accounts = Vec::new();
    engine.export_accounts(&mut accounts).unwrap();
    let mut transfers = Vec::new();
    engine.export_transfers(&mut transfers).unwrap();
    (
        String::from_utf8(accounts).unwrap(),
        String::from_utf8(transfers).unwrap(),
    )
}

/// Parse the account table CSV back into `Account` values
fn parse_accounts(output: &str) -> Vec<Account> {
    let mut rdr = csv::Reader::from_reader(output.as_bytes());
    rdr.deserialize::<Account>().map(|r| r.unwrap()).collect()
}

/// Parse the transfer table CSV back into `Transfer` values
fn parse_transfers(output: &str) -> Vec<Transfer> {
    let mut rdr = csv::Reader::from_reader(output.as_bytes());
    rdr.deserialize::<Transfer>().map(|r| r.unwrap()).collect()
}

#[test]
fn test_open_account_defaults() {
    let input = "type,owner,currency,from,to,amount
open,nikola,,,,";

    let accounts = parse_accounts(&process_csv(input));

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].id(), 1);
    assert_eq!(accounts[0].owner(), "nikola");
    assert_eq!(accounts[0].balance(), dec!(0));
    assert_eq!(accounts[0].currency(), Currency::Php);
}

#[test]
fn test_open_account_with_currency_and_balance() {
    let input = "type,owner,currency,from,to,amount
open,maja,EUR,,,250.75";

    let accounts = parse_accounts(&process_csv(input));

    assert_eq!(accounts[0].currency(), Currency::Eur);
    assert_eq!(accounts[0].balance(), dec!(250.75));
}

#[test]
fn test_transfer_moves_funds() {
    let input = "type,owner,currency,from,to,amount
open,nikola,,,,100
open,maja,,,,100
transfer,,,1,2,10";

    let (accounts_csv, transfers_csv) = process_csv_with_transfers(input);
    let accounts = parse_accounts(&accounts_csv);
    let transfers = parse_transfers(&transfers_csv);

    assert_eq!(accounts[0].balance(), dec!(90));
    assert_eq!(accounts[1].balance(), dec!(110));

    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].from_account(), 1);
    assert_eq!(transfers[0].to_account(), 2);
    assert_eq!(transfers[0].amount(), dec!(10));
    assert!(transfers[0].created_ts() >= transfers[0].started_ts());
}

#[test]
fn test_insufficient_funds_is_skipped() {
    let input = "type,owner,currency,from,to,amount
open,nikola,,,,100
open,maja,,,,100
transfer,,,1,2,200";

    let (accounts_csv, transfers_csv) = process_csv_with_transfers(input);
    let accounts = parse_accounts(&accounts_csv);
    let transfers = parse_transfers(&transfers_csv);

    // Rejected transfer: both balances untouched, no record persisted
    assert_eq!(accounts[0].balance(), dec!(100));
    assert_eq!(accounts[1].balance(), dec!(100));
    assert!(transfers.is_empty());
}

#[test]
fn test_sufficient_funds_is_accepted() {
    let input = "type,owner,currency,from,to,amount
open,nikola,,,,200
open,maja,,,,
transfer,,,1,2,100";

    let (accounts_csv, transfers_csv) = process_csv_with_transfers(input);
    let accounts = parse_accounts(&accounts_csv);

    assert_eq!(accounts[0].balance(), dec!(100));
    assert_eq!(accounts[1].balance(), dec!(100));
    assert_eq!(parse_transfers(&transfers_csv).len(), 1);
}

#[test]
fn test_unknown_account_is_skipped() {
    let input = "type,owner,currency,from,to,amount
open,nikola,,,,100
transfer,,,1,99,10";

    let (accounts_csv, transfers_csv) = process_csv_with_transfers(input);
    let accounts = parse_accounts(&accounts_csv);

    assert_eq!(accounts[0].balance(), dec!(100));
    assert!(parse_transfers(&transfers_csv).is_empty());
}

#[test]
fn test_self_transfer_is_skipped() {
    let input = "type,owner,currency,from,to,amount
open,nikola,,,,100
transfer,,,1,1,10";

    let (accounts_csv, transfers_csv) = process_csv_with_transfers(input);
    let accounts = parse_accounts(&accounts_csv);

    assert_eq!(accounts[0].balance(), dec!(100));
    assert!(parse_transfers(&transfers_csv).is_empty());
}

#[test]
fn test_zero_amount_transfer_is_a_hard_error() {
    // Zero and negative amounts never reach the engine: the row itself is
    // rejected during validation and stops the batch.
    let input = "type,owner,currency,from,to,amount
open,nikola,,,,100
open,maja,,,,100
transfer,,,1,2,0";

    let engine = TransferEngine::new();
    assert!(engine.process_requests(Cursor::new(input)).is_err());
}

#[test]
fn test_negative_amount_transfer_is_a_hard_error() {
    let input = "type,owner,currency,from,to,amount
open,nikola,,,,100
transfer,,,1,2,-5";

    let engine = TransferEngine::new();
    assert!(engine.process_requests(Cursor::new(input)).is_err());
}

#[test]
fn test_chained_transfers() {
    let input = "type,owner,currency,from,to,amount
open,nikola,,,,100
open,maja,,,,100
transfer,,,1,2,10
transfer,,,2,1,25.50
transfer,,,1,2,0.25";

    let (accounts_csv, transfers_csv) = process_csv_with_transfers(input);
    let accounts = parse_accounts(&accounts_csv);
    let transfers = parse_transfers(&transfers_csv);

    assert_eq!(accounts[0].balance(), dec!(115.25));
    assert_eq!(accounts[1].balance(), dec!(84.75));
    // Conservation across the whole batch
    assert_eq!(accounts[0].balance() + accounts[1].balance(), dec!(200));

    let ids: Vec<_> = transfers.iter().map(Transfer::id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_rejected_transfer_does_not_stop_the_batch() {
    let input = "type,owner,currency,from,to,amount
open,nikola,,,,100
open,maja,,,,100
transfer,,,1,2,500
transfer,,,1,2,10";

    let (accounts_csv, transfers_csv) = process_csv_with_transfers(input);
    let accounts = parse_accounts(&accounts_csv);

    assert_eq!(accounts[0].balance(), dec!(90));
    assert_eq!(accounts[1].balance(), dec!(110));
    assert_eq!(parse_transfers(&transfers_csv).len(), 1);
}

#[test]
fn test_cross_currency_transfer_is_not_rejected() {
    // Currency matching is deliberately not enforced by the engine; the
    // amount moves between the accounts as-is.
    let input = "type,owner,currency,from,to,amount
open,nikola,PHP,,,100
open,maja,USD,,,100
transfer,,,1,2,10";

    let accounts = parse_accounts(&process_csv(input));

    assert_eq!(accounts[0].balance(), dec!(90));
    assert_eq!(accounts[1].balance(), dec!(110));
}

#[test]
fn test_malformed_row_is_a_hard_error() {
    // A transfer row carrying an owner field is malformed
    let input = "type,owner,currency,from,to,amount
transfer,nikola,,1,2,10";

    let engine = TransferEngine::new();
    assert!(engine.process_requests(Cursor::new(input)).is_err());
}

#[test]
fn test_balances_export_with_two_decimal_places() {
    let input = "type,owner,currency,from,to,amount
open,nikola,,,,100";

    let output = process_csv(input);
    let mut lines = output.lines();

    assert_eq!(lines.next().unwrap(), "id,owner,balance,currency");
    assert_eq!(lines.next().unwrap(), "1,nikola,100.00,PHP");
}
