use serde::{Deserialize, Serialize};

use super::{ArchiveOutcome, DocumentOutcome};

/// one line of the failure log: an unreadable input, or a document of a
/// readable input that could not be processed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FailureRow {
    pub source_file: String,
    /// empty when the whole input failed
    pub document: Option<String>,
    pub reason: String,
}

impl FailureRow {
    pub const CSV_HEADER: [&'static str; 3] = ["source_file", "document", "reason"];

    /// failures of each outcome, in input order then document order
    pub fn from_outcomes(outcomes: &[ArchiveOutcome]) -> Vec<FailureRow> {
        let mut rows = vec![];
        for outcome in outcomes.iter() {
            let source_file = outcome.path().to_string_lossy().to_string();
            match outcome {
                ArchiveOutcome::Unreadable { reason, .. } => rows.push(FailureRow {
                    source_file,
                    document: None,
                    reason: reason.clone(),
                }),
                ArchiveOutcome::Read { documents, .. } => {
                    for document in documents.iter() {
                        if let DocumentOutcome::Failed { name, reason } = document {
                            rows.push(FailureRow {
                                source_file: source_file.clone(),
                                document: Some(name.clone()),
                                reason: reason.clone(),
                            });
                        }
                    }
                }
            }
        }
        rows
    }
}
