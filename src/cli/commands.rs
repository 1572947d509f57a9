pub(crate) use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "coins-ledger",
    author,
    version,
    about = "A minimal account ledger with atomic transfers",
    long_about = None,
    after_help = "OUTPUT:\n    The final account table is printed to stdout in CSV format.\n    Use shell redirection to save to a file:\n\n    coins-ledger requests.csv > accounts.csv"
)]
pub struct Args {
    /// Path to the input requests CSV file
    #[arg(
        index = 1,
        value_name = "FILE",
        help = "Input CSV file with columns: type, owner, currency, from, to, amount"
    )]
    pub input_file: PathBuf,

    /// Also write the transfer table to this file
    #[arg(short, long, value_name = "FILE")]
    pub transfers_out: Option<PathBuf>,
}
