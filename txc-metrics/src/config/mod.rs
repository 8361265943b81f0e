mod duplicate_stop_policy;
mod stop_table_columns;
mod txc_metrics_config;
mod unresolved_pattern_policy;

pub use duplicate_stop_policy::DuplicateStopPolicy;
pub use stop_table_columns::StopTableColumns;
pub use txc_metrics_config::TxcMetricsConfig;
pub use unresolved_pattern_policy::UnresolvedPatternPolicy;
