use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::{Deserialize, Serialize};

use super::inspect_source;
use crate::{
    archive::discover_inputs,
    batch::{
        check_overwrite, process_archives, write_area_summaries, write_failures, write_records,
        write_summary_json,
    },
    config::{DuplicateStopPolicy, TxcMetricsConfig, UnresolvedPatternPolicy},
    stops::StopIndex,
    TxcError,
};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum TxcOperation {
    /// derive one route metrics row per journey pattern across a collection of schedule archives
    RouteMetrics {
        /// stop coordinate table (.csv or .csv.gz)
        #[arg(long)]
        stops_file: String,
        /// a schedule archive, a single schedule document, or a directory of them
        #[arg(long)]
        input: String,
        /// route metrics table to write (.csv or .csv.gz)
        #[arg(long)]
        output_file: String,
        /// regular expression selecting input files when the input is a directory
        #[arg(long)]
        file_pattern: Option<String>,
        /// include circuity, endpoint and time-of-day columns
        #[arg(long)]
        extended: bool,
        /// add a WKT LINESTRING column of each route, with --extended
        #[arg(long)]
        write_geometry: bool,
        /// write rows for patterns with fewer than two known stops
        #[arg(long)]
        emit_unresolved: bool,
        #[arg(long, value_enum)]
        duplicate_stop_policy: Option<DuplicateStopPolicy>,
        #[arg(long)]
        parallelism: Option<usize>,
        /// TOML or JSON file with txc-metrics parameters
        #[arg(long)]
        configuration_file: Option<String>,
        /// optional per-region and per-local-authority summary table
        #[arg(long)]
        area_summary_file: Option<String>,
        /// optional table of unreadable archives and failed documents
        #[arg(long)]
        failures_file: Option<String>,
        /// optional JSON run summary
        #[arg(long)]
        summary_file: Option<String>,
        #[arg(long)]
        overwrite: bool,
    },
    /// print structural counts of each document in one schedule input, without a stop table
    Inspect {
        #[arg(long)]
        input: String,
    },
}

impl TxcOperation {
    pub fn run(&self) -> Result<(), TxcError> {
        match self {
            TxcOperation::RouteMetrics {
                stops_file,
                input,
                output_file,
                file_pattern,
                extended,
                write_geometry,
                emit_unresolved,
                duplicate_stop_policy,
                parallelism,
                configuration_file,
                area_summary_file,
                failures_file,
                summary_file,
                overwrite,
            } => {
                let mut conf = TxcMetricsConfig::try_from_sources(configuration_file.as_deref())?;
                if let Some(pattern) = file_pattern {
                    conf.file_pattern = pattern.clone();
                }
                if *extended {
                    conf.extended_metrics = true;
                }
                if *write_geometry {
                    conf.write_geometry = true;
                }
                if *emit_unresolved {
                    conf.unresolved_pattern_policy = UnresolvedPatternPolicy::Emit;
                }
                if let Some(policy) = duplicate_stop_policy {
                    conf.duplicate_stop_policy = *policy;
                }
                if let Some(n) = parallelism {
                    conf.parallelism = *n;
                }
                if *overwrite {
                    conf.overwrite = true;
                }
                conf.validate()?;
                if conf.write_geometry && !conf.extended_metrics {
                    log::warn!("geometry output is only written with extended metrics, ignoring");
                }

                let output_path = PathBuf::from(output_file);
                let optional_outputs = [area_summary_file, failures_file, summary_file]
                    .into_iter()
                    .flatten()
                    .map(PathBuf::from)
                    .collect::<Vec<_>>();
                for path in std::iter::once(&output_path).chain(optional_outputs.iter()) {
                    check_overwrite(path, conf.overwrite)?;
                }

                run_route_metrics(
                    Path::new(stops_file),
                    Path::new(input),
                    &output_path,
                    area_summary_file.as_deref().map(Path::new),
                    failures_file.as_deref().map(Path::new),
                    summary_file.as_deref().map(Path::new),
                    &conf,
                )
            }
            TxcOperation::Inspect { input } => {
                let inspections = inspect_source(Path::new(input))?;
                let mut writer = csv::Writer::from_writer(std::io::stdout());
                for row in inspections.iter() {
                    writer
                        .serialize(row)
                        .map_err(|e| TxcError::CsvWriteError(String::from("stdout"), e))?;
                }
                writer
                    .flush()
                    .map_err(|e| TxcError::FileWriteError(String::from("stdout"), e.to_string()))
            }
        }
    }
}

fn run_route_metrics(
    stops_file: &Path,
    input: &Path,
    output_file: &Path,
    area_summary_file: Option<&Path>,
    failures_file: Option<&Path>,
    summary_file: Option<&Path>,
    conf: &TxcMetricsConfig,
) -> Result<(), TxcError> {
    let index = StopIndex::try_from_csv(stops_file, &conf.stop_columns, conf.duplicate_stop_policy)?;
    if index.is_empty() {
        log::warn!(
            "stop table {} has no usable stops, every pattern will be unresolved",
            stops_file.to_string_lossy()
        );
    }
    let inputs = discover_inputs(input, &conf.file_pattern_regex()?)?;
    let result = process_archives(&inputs, &index, conf)?;

    write_records(
        output_file,
        result.records(),
        conf.extended_metrics,
        conf.write_geometry,
        conf.overwrite,
    )?;
    if let Some(path) = area_summary_file {
        write_area_summaries(path, &result.area_summaries(), conf.overwrite)?;
    }
    if let Some(path) = failures_file {
        write_failures(path, &result.failures(), conf.overwrite)?;
    }
    let summary = result.summary(conf.extended_metrics);
    if let Some(path) = summary_file {
        write_summary_json(path, &summary, conf.overwrite)?;
    }
    summary.log_report();
    Ok(())
}
