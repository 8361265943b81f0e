pub mod app;
pub mod archive;
pub mod batch;
pub mod config;
pub mod document;
pub mod metrics;
pub mod pattern;
pub mod stops;
mod txc_error;

pub use txc_error::TxcError;

#[cfg(test)]
mod test_fixtures;
