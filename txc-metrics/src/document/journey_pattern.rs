use roxmltree::Node;

use super::xml_ops::{child_elements, descendant_elements, element_text};

/// a `JourneyPattern` element: an id and its ordered section references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyPatternDefinition {
    pub pattern_id: String,
    pub section_refs: Vec<String>,
}

impl JourneyPatternDefinition {
    /// all journey patterns of a document in document order. patterns without an id are skipped.
    pub fn from_document(root: Node) -> Vec<JourneyPatternDefinition> {
        descendant_elements(root, "JourneyPattern")
            .filter_map(|pattern| {
                let pattern_id = pattern
                    .attribute("id")
                    .map(str::trim)
                    .filter(|id| !id.is_empty())?;
                let section_refs = child_elements(pattern, "JourneyPatternSectionRefs")
                    .filter_map(element_text)
                    .collect();
                Some(JourneyPatternDefinition {
                    pattern_id: pattern_id.to_string(),
                    section_refs,
                })
            })
            .collect()
    }
}
