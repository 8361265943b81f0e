use super::TxcOperation;
use clap::Parser;

/// command line tool for deriving route metrics from TransXChange schedule archives
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TxcApp {
    #[command(subcommand)]
    pub op: TxcOperation,
}
