//! Structure extraction
//!
//! One call parses the source, builds a parent map over the tree in a
//! pre-pass and then walks the tree once, classifying each node:
//!
//! - imports become one record per imported name
//! - classes become a record with their directly declared methods, and the
//!   class body is not walked any further
//! - functions are recorded only when their enclosing scope is the module
//!   and they are not `async def`; methods, nested and async functions are
//!   skipped, but their bodies are still walked
//!
//! The parent map and the visitor live for a single call, so concurrent calls
//! share nothing.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace};
use tree_sitter::{Node, Tree};

use crate::detectors::python;
use crate::error::ParseFailure;
use crate::parse::parse_python;
use crate::schema::{AnalysisDocument, StructuralDocument};

/// Analyze Python source and return the serialized document (pretty JSON).
///
/// Never fails: syntax errors are reported as an error document.
///
/// ```
/// let json = aegis_code::analyze("from typing import List");
/// assert!(json.contains("\"typing.List\""));
/// ```
pub fn analyze(source: &str) -> String {
    let document = analyze_source(source);
    serde_json::to_string_pretty(&document).unwrap_or_else(|e| {
        serde_json::json!({
            "error": "Serialization failure",
            "details": e.to_string(),
        })
        .to_string()
    })
}

/// Analyze Python source into a typed document
pub fn analyze_source(source: &str) -> AnalysisDocument {
    extract_structure(source).into()
}

/// Parse and extract, failing only on syntax errors
pub fn extract_structure(source: &str) -> Result<StructuralDocument, ParseFailure> {
    let tree = parse_python(source).map_err(|failure| {
        debug!("Syntax error: {}", failure);
        failure
    })?;
    Ok(extract(&tree, source))
}

/// Extract the structural document from an already parsed tree
pub fn extract(tree: &Tree, source: &str) -> StructuralDocument {
    let root = tree.root_node();
    let parents = ParentMap::build(root);

    let mut visitor = StructureVisitor::new(source, &parents);
    visitor.walk(root);

    trace!(
        nodes = parents.len(),
        bound_names = ?visitor.bound_names,
        "Structure extracted"
    );
    visitor.document
}

// ============================================================================
// Parent map
// ============================================================================

/// Call-scoped lookup from a node to its syntactic parent
pub struct ParentMap<'tree> {
    parents: HashMap<usize, Node<'tree>>,
}

impl<'tree> ParentMap<'tree> {
    /// Record the parent of every named node below `root`
    pub fn build(root: Node<'tree>) -> Self {
        let mut parents = HashMap::new();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                parents.insert(child.id(), node);
                stack.push(child);
            }
        }

        Self { parents }
    }

    pub fn parent(&self, node: &Node<'tree>) -> Option<Node<'tree>> {
        self.parents.get(&node.id()).copied()
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Nearest enclosing class, function or module of a node
    ///
    /// Blocks, decorators and compound statements in between are skipped.
    pub fn enclosing_scope(&self, node: &Node<'tree>) -> Scope {
        let mut current = self.parent(node);
        while let Some(ancestor) = current {
            match NodeKind::of(&ancestor) {
                NodeKind::Class => return Scope::Class,
                NodeKind::Function => return Scope::Function,
                _ => current = self.parent(&ancestor),
            }
        }
        Scope::Module
    }
}

/// Scope a declaration belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Module,
    Class,
    Function,
}

// ============================================================================
// Node classification
// ============================================================================

/// Node kinds the extractor distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Import,
    FromImport,
    Class,
    Function,
    Other,
}

impl NodeKind {
    pub fn of(node: &Node) -> Self {
        match node.kind() {
            "import_statement" => Self::Import,
            "import_from_statement" | "future_import_statement" => Self::FromImport,
            "class_definition" => Self::Class,
            "function_definition" => Self::Function,
            _ => Self::Other,
        }
    }
}

// ============================================================================
// Traversal
// ============================================================================

struct StructureVisitor<'a, 'tree> {
    source: &'a str,
    parents: &'a ParentMap<'tree>,
    document: StructuralDocument,
    /// Local names bound by imports; tracked, not emitted
    bound_names: BTreeSet<String>,
}

impl<'a, 'tree> StructureVisitor<'a, 'tree> {
    fn new(source: &'a str, parents: &'a ParentMap<'tree>) -> Self {
        Self {
            source,
            parents,
            document: StructuralDocument::default(),
            bound_names: BTreeSet::new(),
        }
    }

    /// Pre-order walk over an explicit stack; nesting depth never grows the
    /// call stack
    fn walk(&mut self, root: Node<'tree>) {
        let mut pending = vec![root];
        while let Some(node) = pending.pop() {
            if self.visit(node) {
                let mut cursor = node.walk();
                let children: Vec<Node<'tree>> = node.named_children(&mut cursor).collect();
                pending.extend(children.into_iter().rev());
            }
        }
    }

    /// Record what `node` declares; returns whether its children are walked
    fn visit(&mut self, node: Node<'tree>) -> bool {
        match NodeKind::of(&node) {
            NodeKind::Import => {
                let bindings = python::plain_import_bindings(&node, self.source);
                self.record_imports(bindings);
                false
            }
            NodeKind::FromImport => {
                let bindings = python::from_import_bindings(&node, self.source);
                self.record_imports(bindings);
                false
            }
            NodeKind::Class => {
                // Methods are collected here; walking the body again would
                // report them a second time.
                let record = python::class_record(&node, self.source);
                self.document.classes.push(record);
                false
            }
            NodeKind::Function => {
                let top_level = self.parents.enclosing_scope(&node) == Scope::Module;
                if top_level && !python::is_async(&node) {
                    let record = python::function_record(&node, self.source);
                    self.document.functions.push(record);
                }
                true
            }
            NodeKind::Other => true,
        }
    }

    fn record_imports(&mut self, bindings: Vec<python::ImportBinding>) {
        for binding in bindings {
            self.bound_names.insert(binding.local_name);
            self.document.imports.push(binding.record);
        }
    }
}
