//! Parsing with tree-sitter
//!
//! tree-sitter recovers from malformed input instead of failing, so a tree is
//! only accepted when it contains no ERROR or MISSING nodes. The first such
//! node in source order becomes the diagnostic.
//!
//! The grammar also accepts input CPython rejects: brackets nested deeper
//! than the tokenizer allows, and Python 2 `print` / `exec` statements.
//! Both are reported as syntax errors too.

use tree_sitter::{Node, Parser, Tree};

use crate::detectors::common::{get_node_text, visit_until};
use crate::error::ParseFailure;
use crate::lang::Lang;
use crate::schema::Location;
use crate::utils::truncate_with_ellipsis;

/// Longest source excerpt quoted in a diagnostic
const SNIPPET_MAX_BYTES: usize = 40;

/// Deepest bracket nesting CPython's tokenizer accepts
pub const MAX_BRACKET_DEPTH: usize = 200;

/// Parse Python source into a syntax tree
pub fn parse_python(source: &str) -> Result<Tree, ParseFailure> {
    parse_with(source, Lang::Python)
}

/// Parse source with the grammar for `lang`
pub fn parse_with(source: &str, lang: Lang) -> Result<Tree, ParseFailure> {
    let tree = parse_tree_with(source, lang)?;

    match syntax_error(&tree, source) {
        Some(failure) => Err(failure),
        None => Ok(tree),
    }
}

/// Parse Python source, keeping error-recovered trees
///
/// Used for AST dumps, where ERROR nodes are worth seeing.
pub fn parse_tree(source: &str) -> Result<Tree, ParseFailure> {
    parse_tree_with(source, Lang::Python)
}

fn parse_tree_with(source: &str, lang: Lang) -> Result<Tree, ParseFailure> {
    let mut parser = Parser::new();
    parser
        .set_language(&lang.tree_sitter_language())
        .map_err(|e| ParseFailure::new(format!("failed to load {} grammar: {}", lang.name(), e)))?;

    parser
        .parse(source, None)
        .ok_or_else(|| ParseFailure::new("parser returned no tree"))
}

/// Describe the first syntax error in the tree, if any
pub fn syntax_error(tree: &Tree, source: &str) -> Option<ParseFailure> {
    let root = tree.root_node();
    excessive_nesting(root)
        .or_else(|| error_node(root, source))
        .or_else(|| legacy_statement(root))
}

fn start_location(node: &Node) -> Location {
    Location::new(
        node.start_position().row + 1,
        node.start_position().column + 1,
    )
}

/// First opening bracket that goes past `MAX_BRACKET_DEPTH`
fn excessive_nesting(root: Node) -> Option<ParseFailure> {
    let mut depth = 0usize;
    let mut culprit: Option<Node> = None;
    visit_until(root, |node| {
        match node.kind() {
            "(" | "[" | "{" if !node.is_named() => {
                depth += 1;
                if depth > MAX_BRACKET_DEPTH {
                    culprit = Some(node);
                    return false;
                }
            }
            ")" | "]" | "}" if !node.is_named() => depth = depth.saturating_sub(1),
            _ => {}
        }
        true
    });

    culprit.map(|node| ParseFailure::at("too many nested parentheses", start_location(&node)))
}

fn error_node(root: Node, source: &str) -> Option<ParseFailure> {
    if !root.has_error() {
        return None;
    }

    let mut first: Option<Node> = None;
    visit_until(root, |node| {
        if node.is_error() || node.is_missing() {
            first = Some(node);
            return false;
        }
        true
    });

    let node = first.unwrap_or(root);
    let message = if node.is_missing() {
        format!("expected '{}'", node.kind())
    } else {
        let text = get_node_text(&node, source);
        let first_line = text.lines().next().unwrap_or("").trim();
        if first_line.is_empty() {
            "invalid syntax".to_string()
        } else {
            format!(
                "invalid syntax near '{}'",
                truncate_with_ellipsis(first_line, SNIPPET_MAX_BYTES)
            )
        }
    };

    Some(ParseFailure::at(message, start_location(&node)))
}

/// Python 2 `print x` and `exec code` statements
fn legacy_statement(root: Node) -> Option<ParseFailure> {
    let mut found: Option<Node> = None;
    visit_until(root, |node| {
        if matches!(node.kind(), "print_statement" | "exec_statement") {
            found = Some(node);
            return false;
        }
        true
    });

    let node = found?;
    let message = match node.kind() {
        "print_statement" => "Missing parentheses in call to 'print'. Did you mean print(...)?",
        _ => "Missing parentheses in call to 'exec'. Did you mean exec(...)?",
    };
    Some(ParseFailure::at(message, start_location(&node)))
}
