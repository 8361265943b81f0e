use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    archive::{RawDocument, ScheduleSource},
    document::TxcDocument,
    pattern::assemble_patterns,
    TxcError,
};

/// structural counts of one schedule document, used to diagnose truncated
/// or missing routes without a stop table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DocumentInspection {
    pub document: String,
    pub line_name: String,
    pub sections: usize,
    /// sections where no timing link had a usable stop reference
    pub empty_sections: usize,
    pub patterns: usize,
    /// patterns left with at least one stop after joining their sections
    pub assembled_patterns: usize,
    pub vehicle_journeys: usize,
    pub error: Option<String>,
}

impl DocumentInspection {
    fn from_raw(raw: RawDocument) -> DocumentInspection {
        let RawDocument { name, contents } = raw;
        match contents.and_then(|text| TxcDocument::parse(&name, &text)) {
            Ok(document) => DocumentInspection {
                line_name: document.line_name.clone(),
                sections: document.sections.len(),
                empty_sections: document.sections.values().filter(|s| s.is_empty()).count(),
                patterns: document.patterns.len(),
                assembled_patterns: assemble_patterns(&document).len(),
                vehicle_journeys: document.journeys.len(),
                error: None,
                document: name,
            },
            Err(e) => DocumentInspection {
                line_name: String::new(),
                sections: 0,
                empty_sections: 0,
                patterns: 0,
                assembled_patterns: 0,
                vehicle_journeys: 0,
                error: Some(e.to_string()),
                document: name,
            },
        }
    }
}

/// inspects every document of one schedule input
pub fn inspect_source(path: &Path) -> Result<Vec<DocumentInspection>, TxcError> {
    let source = ScheduleSource::try_from_path(path)?;
    let mut inspections = vec![];
    source.visit_documents(&mut |raw| inspections.push(DocumentInspection::from_raw(raw)))?;
    Ok(inspections)
}
