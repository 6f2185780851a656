//! Tree helpers shared by the detectors

use tree_sitter::Node;

/// Get text content of a node
pub fn get_node_text(node: &Node, source: &str) -> String {
    node.utf8_text(source.as_bytes()).unwrap_or("").to_string()
}

/// Count total nodes in a subtree
pub fn count_nodes(node: &Node) -> usize {
    let mut count = 0;
    visit_until(*node, |_| {
        count += 1;
        true
    });
    count
}

/// Visit all nodes in pre-order, stopping early when `visitor` returns false
pub fn visit_until<'tree, F>(node: Node<'tree>, mut visitor: F)
where
    F: FnMut(Node<'tree>) -> bool,
{
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if !visitor(current) {
            return;
        }
        let mut cursor = current.walk();
        let children: Vec<Node<'tree>> = current.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
}

/// Named children of a node, skipping comments
pub fn statements<'tree>(node: &Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}
