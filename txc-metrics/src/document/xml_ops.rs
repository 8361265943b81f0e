use roxmltree::Node;

/// true if the node is an element with this local name. documents are matched
/// by local name so that a missing or re-prefixed namespace still parses.
pub fn is_element_named(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

pub fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &'static str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_element_named(n, name))
}

pub fn child_elements<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |n| is_element_named(n, name))
}

pub fn descendant_elements<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants().filter(move |n| is_element_named(n, name))
}

/// trimmed text content of an element, None when empty
pub fn element_text(node: Node) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

/// text of the element found by following child element names from `node`
pub fn child_text(node: Node, path: &[&'static str]) -> Option<String> {
    let mut current = node;
    for &name in path {
        current = child_element(current, name)?;
    }
    element_text(current)
}
