use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Enumerates alternative ways to handle a stop identifier that
/// appears more than once in the stop coordinate table
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateStopPolicy {
    /// later rows overwrite earlier rows
    #[default]
    LastWins,
    /// the first row seen for an identifier is kept
    FirstWins,
}
