use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Enumerates alternative ways to handle a journey pattern where fewer
/// than two of its stops have known coordinates
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPatternPolicy {
    /// drop the pattern, no output row
    #[default]
    Omit,
    /// write a row with stop and trip counts and empty geometry fields
    Emit,
}
