use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{DuplicateStopPolicy, StopTableColumns, UnresolvedPatternPolicy};
use crate::TxcError;

/// defines behaviors for a route metrics run.
///
/// values are layered: defaults, then an optional TOML or JSON file, then
/// environment variables prefixed with `TXC_METRICS_` (nested keys use `__`,
/// for example `TXC_METRICS_STOP_COLUMNS__STOP_ID`). command line flags are
/// applied on top of the result by the app.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct TxcMetricsConfig {
    /// compute circuity, endpoint and time-of-day fields
    pub extended_metrics: bool,
    pub unresolved_pattern_policy: UnresolvedPatternPolicy,
    pub duplicate_stop_policy: DuplicateStopPolicy,
    /// number of raw departure times kept per pattern in extended mode
    pub departure_time_sample_size: usize,
    /// log progress after this many archives
    pub progress_interval: usize,
    pub parallelism: usize,
    /// regular expression matched against input file paths
    pub file_pattern: String,
    pub stop_columns: StopTableColumns,
    /// add a WKT LINESTRING column of the resolved stops (extended mode only)
    pub write_geometry: bool,
    pub overwrite: bool,
}

impl Default for TxcMetricsConfig {
    fn default() -> Self {
        Self {
            extended_metrics: false,
            unresolved_pattern_policy: UnresolvedPatternPolicy::default(),
            duplicate_stop_policy: DuplicateStopPolicy::default(),
            departure_time_sample_size: 10,
            progress_interval: 20,
            parallelism: 1,
            file_pattern: String::from(Self::DEFAULT_FILE_PATTERN),
            stop_columns: StopTableColumns::default(),
            write_geometry: false,
            overwrite: false,
        }
    }
}

impl TxcMetricsConfig {
    pub const ENV_PREFIX: &'static str = "TXC_METRICS";
    pub const DEFAULT_FILE_PATTERN: &'static str = r"(?i)\.(zip|xml)$";

    /// loads a configuration from an optional file, layered with environment variables.
    pub fn try_from_sources(configuration_file: Option<&str>) -> Result<Self, TxcError> {
        let mut builder = config::Config::builder();
        if let Some(f) = configuration_file {
            if !Path::new(f).is_file() {
                return Err(TxcError::ConfigurationError(format!(
                    "configuration file '{f}' does not exist"
                )));
            }
            log::info!("reading txc-metrics configuration from {f}");
            builder = builder.add_source(config::File::with_name(f));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(Self::ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
        let conf: TxcMetricsConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| TxcError::ConfigurationError(e.to_string()))?;
        conf.validate()?;
        Ok(conf)
    }

    /// confirms numeric settings are usable and the file pattern compiles
    pub fn validate(&self) -> Result<(), TxcError> {
        if self.parallelism == 0 {
            return Err(TxcError::ConfigurationError(String::from(
                "parallelism must be at least 1",
            )));
        }
        if self.progress_interval == 0 {
            return Err(TxcError::ConfigurationError(String::from(
                "progress_interval must be at least 1",
            )));
        }
        self.file_pattern_regex()?;
        Ok(())
    }

    pub fn file_pattern_regex(&self) -> Result<Regex, TxcError> {
        Regex::new(&self.file_pattern).map_err(|e| {
            TxcError::ConfigurationError(format!(
                "invalid file pattern '{}': {e}",
                self.file_pattern
            ))
        })
    }
}
