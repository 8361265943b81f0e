use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use kdam::{Bar, BarExt};
use rayon::prelude::*;

use super::{ArchiveOutcome, AreaSummary, BatchSummary, DocumentOutcome, FailureRow};
use crate::{
    archive::{RawDocument, ScheduleSource},
    config::{TxcMetricsConfig, UnresolvedPatternPolicy},
    document::TxcDocument,
    metrics::{compute_route_metrics, unresolved_route_metrics, RouteMetricsRecord},
    pattern::{assemble_patterns, resolve_pattern, AssembledPattern},
    stops::StopIndex,
    TxcError,
};

/// outcomes of every input of a run, in input order
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub outcomes: Vec<ArchiveOutcome>,
}

impl BatchResult {
    /// every record of the run, in input order, then document order, then pattern order
    pub fn records(&self) -> impl Iterator<Item = &RouteMetricsRecord> {
        self.outcomes.iter().flat_map(|o| o.records())
    }

    pub fn failures(&self) -> Vec<FailureRow> {
        FailureRow::from_outcomes(&self.outcomes)
    }

    pub fn summary(&self, extended: bool) -> BatchSummary {
        BatchSummary::from_outcomes(&self.outcomes, extended)
    }

    pub fn area_summaries(&self) -> Vec<AreaSummary> {
        AreaSummary::from_records(self.records())
    }
}

/// derives the route metrics of one schedule document. every failure is
/// captured in the returned outcome.
///
/// # Arguments
///
/// * `source_file` - name of the input the document came from, copied into each record
/// * `document` - the raw document
/// * `index` - stop coordinates
/// * `config` - run configuration
pub fn process_document(
    source_file: &str,
    document: RawDocument,
    index: &StopIndex,
    config: &TxcMetricsConfig,
) -> DocumentOutcome {
    let RawDocument { name, contents } = document;
    let parsed = match contents.and_then(|text| TxcDocument::parse(&name, &text)) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::debug!("{source_file}: skipping document '{name}': {e}");
            return DocumentOutcome::Failed {
                name,
                reason: e.to_string(),
            };
        }
    };

    let mut records = vec![];
    let mut unresolved = 0;
    for pattern in assemble_patterns(&parsed) {
        match resolve_pattern(pattern, index) {
            AssembledPattern::Resolved(resolved) => {
                records.push(compute_route_metrics(source_file, &resolved, config));
            }
            AssembledPattern::Unresolved(pattern) => {
                unresolved += 1;
                match config.unresolved_pattern_policy {
                    UnresolvedPatternPolicy::Omit => {}
                    UnresolvedPatternPolicy::Emit => {
                        records.push(unresolved_route_metrics(source_file, &pattern, config));
                    }
                }
            }
        }
    }
    log::debug!(
        "{source_file}: document '{name}' produced {} records, {unresolved} patterns with fewer than 2 known stops",
        records.len()
    );
    DocumentOutcome::Parsed { name, records }
}

/// processes every document of one schedule input. failures to open the
/// input are captured in the returned outcome.
///
/// a plain document that cannot be parsed is neither a readable archive nor
/// a schedule document, so it is reported as an unreadable input.
pub fn process_archive(
    path: &Path,
    index: &StopIndex,
    config: &TxcMetricsConfig,
) -> ArchiveOutcome {
    let unreadable = |reason: String| {
        log::warn!("failed to read {}: {reason}", path.to_string_lossy());
        ArchiveOutcome::Unreadable {
            path: path.to_path_buf(),
            reason,
        }
    };
    let source = match ScheduleSource::try_from_path(path) {
        Ok(source) => source,
        Err(e) => return unreadable(e.to_string()),
    };
    let source_file = source.basename();
    let mut documents: Vec<DocumentOutcome> = vec![];
    let visited = source.visit_documents(&mut |document| {
        documents.push(process_document(&source_file, document, index, config))
    });
    if let Err(e) = visited {
        return unreadable(e.to_string());
    }
    if let (ScheduleSource::PlainDocument { .. }, Some(DocumentOutcome::Failed { reason, .. })) =
        (&source, documents.first())
    {
        return unreadable(format!(
            "not a zip archive or a schedule document: {reason}"
        ));
    }

    let n_failed = documents.iter().filter(|d| d.is_failed()).count();
    let n_records: usize = documents.iter().map(|d| d.records().len()).sum();
    if n_failed > 0 {
        log::warn!(
            "{source_file}: {n_failed} of {} documents could not be processed",
            documents.len()
        );
    }
    log::info!(
        "{source_file}: {} documents, {n_records} route records",
        documents.len()
    );
    ArchiveOutcome::Read {
        path: path.to_path_buf(),
        documents,
    }
}

/// processes a collection of schedule inputs, sequentially or on a rayon worker
/// pool when `config.parallelism` is greater than one. outcomes are returned in
/// input order regardless of parallelism.
///
/// # Returns
///
/// the outcome of every input. an error is returned only when the worker pool
/// or progress bar cannot be created.
pub fn process_archives(
    paths: &[PathBuf],
    index: &StopIndex,
    config: &TxcMetricsConfig,
) -> Result<BatchResult, TxcError> {
    let bar = Arc::new(Mutex::new(
        Bar::builder()
            .desc("process schedule archives")
            .total(paths.len())
            .build()
            .map_err(|e| TxcError::InternalError(format!("failure building progress bar: {e}")))?,
    ));
    let progress = Progress::new(paths.len(), config.progress_interval);

    let run = |path: &PathBuf| {
        let outcome = process_archive(path, index, config);
        progress.observe(&outcome);
        if let Ok(mut bar) = bar.clone().lock() {
            let _ = bar.update(1);
        }
        outcome
    };

    let outcomes: Vec<ArchiveOutcome> = if config.parallelism > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallelism)
            .build()
            .map_err(|e| TxcError::InternalError(format!("failure building worker pool: {e}")))?;
        pool.install(|| paths.par_iter().map(&run).collect())
    } else {
        paths.iter().map(&run).collect()
    };
    eprintln!();

    Ok(BatchResult { outcomes })
}

/// counts finished inputs and records across workers, logging at a fixed interval
struct Progress {
    total: usize,
    interval: usize,
    archives: AtomicUsize,
    records: AtomicUsize,
}

impl Progress {
    fn new(total: usize, interval: usize) -> Progress {
        Progress {
            total,
            interval: interval.max(1),
            archives: AtomicUsize::new(0),
            records: AtomicUsize::new(0),
        }
    }

    fn observe(&self, outcome: &ArchiveOutcome) {
        let n_records = outcome.record_count();
        let archives = self.archives.fetch_add(1, Ordering::SeqCst) + 1;
        let records = self.records.fetch_add(n_records, Ordering::SeqCst) + n_records;
        if archives % self.interval == 0 || archives == self.total {
            log::info!(
                "progress: {archives}/{} archives processed, {records} route records so far",
                self.total
            );
        }
    }
}
