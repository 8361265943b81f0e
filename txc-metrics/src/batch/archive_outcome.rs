use std::path::{Path, PathBuf};

use super::DocumentOutcome;
use crate::metrics::RouteMetricsRecord;

/// result of processing one schedule input
#[derive(Debug, Clone)]
pub enum ArchiveOutcome {
    /// the input was opened and each of its documents was processed
    Read {
        path: PathBuf,
        documents: Vec<DocumentOutcome>,
    },
    /// the input could not be read as an archive or as a document
    Unreadable { path: PathBuf, reason: String },
}

impl ArchiveOutcome {
    pub fn path(&self) -> &Path {
        match self {
            ArchiveOutcome::Read { path, .. } => path,
            ArchiveOutcome::Unreadable { path, .. } => path,
        }
    }

    pub fn is_readable(&self) -> bool {
        matches!(self, ArchiveOutcome::Read { .. })
    }

    pub fn documents(&self) -> &[DocumentOutcome] {
        match self {
            ArchiveOutcome::Read { documents, .. } => documents,
            ArchiveOutcome::Unreadable { .. } => &[],
        }
    }

    /// records of every parsed document, in document order
    pub fn records(&self) -> impl Iterator<Item = &RouteMetricsRecord> {
        self.documents().iter().flat_map(|d| d.records().iter())
    }

    pub fn record_count(&self) -> usize {
        self.documents().iter().map(|d| d.records().len()).sum()
    }
}
