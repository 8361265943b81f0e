use std::collections::HashMap;

use roxmltree::Node;

use super::xml_ops::{child_elements, child_text, descendant_elements, element_text};

/// builds the ordered stop sequence of every journey pattern section in a document,
/// keyed by section id.
///
/// each timing link contributes its `From` stop, and the last link of a section also
/// contributes its `To` stop, so a section of N fully referenced links yields N+1 stops.
/// links without a stop reference contribute nothing, which can leave a sequence short
/// or empty. sections without an id are skipped; a repeated id keeps the last section.
pub fn resolve_sections(root: Node) -> HashMap<String, Vec<String>> {
    let mut sections = HashMap::new();
    for section in descendant_elements(root, "JourneyPatternSection") {
        let section_id = match section.attribute("id").map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => continue,
        };
        sections.insert(section_id, section_stop_sequence(section));
    }
    sections
}

fn section_stop_sequence(section: Node) -> Vec<String> {
    let links: Vec<Node> = child_elements(section, "JourneyPatternTimingLink").collect();
    let mut stops = Vec::with_capacity(links.len() + 1);
    for link in links.iter() {
        if let Some(from) = child_text(*link, &["From", "StopPointRef"]) {
            stops.push(from);
        }
    }
    if let Some(to) = links
        .last()
        .and_then(|last| child_text(*last, &["To", "StopPointRef"]))
    {
        stops.push(to);
    }
    stops
}

/// the first line name found in the document, or an empty string
pub fn find_line_name(root: Node) -> String {
    descendant_elements(root, "LineName")
        .find_map(element_text)
        .unwrap_or_default()
}
