//! derives route geometry and service metrics from a collection of TransXChange
//! schedule archives and a stop coordinate table.
use clap::Parser;
use txc_metrics::app::TxcApp;

fn main() {
    env_logger::init();
    let args = TxcApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("txc-metrics failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
