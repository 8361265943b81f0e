use crate::metrics::RouteMetricsRecord;

/// result of processing one schedule document. a document either yields its
/// records (possibly none) or fails as a whole with a reason.
#[derive(Debug, Clone)]
pub enum DocumentOutcome {
    Parsed {
        name: String,
        records: Vec<RouteMetricsRecord>,
    },
    Failed {
        name: String,
        reason: String,
    },
}

impl DocumentOutcome {
    pub fn name(&self) -> &str {
        match self {
            DocumentOutcome::Parsed { name, .. } => name,
            DocumentOutcome::Failed { name, .. } => name,
        }
    }

    pub fn records(&self) -> &[RouteMetricsRecord] {
        match self {
            DocumentOutcome::Parsed { records, .. } => records,
            DocumentOutcome::Failed { .. } => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DocumentOutcome::Failed { .. })
    }
}
