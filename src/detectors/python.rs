//! Python declaration detector
//!
//! Builds output records from individual tree-sitter nodes:
//! - Import statements (plain, `from`, `__future__`, relative, wildcard)
//! - Class definitions with identifier bases and directly declared methods
//! - Function records with positional parameters and docstrings
//!
//! Traversal and the method/function decision live in `crate::extract`.

use std::iter::Peekable;
use std::str::Chars;

use tree_sitter::Node;

use crate::detectors::common::{get_node_text, statements};
use crate::schema::{ClassRecord, FunctionRecord, ImportRecord};
use crate::utils::clean_docstring;

/// An import record plus the local name the import binds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub record: ImportRecord,
    pub local_name: String,
}

// ============================================================================
// Imports
// ============================================================================

/// Records for `import a.b as c, d`
pub fn plain_import_bindings(node: &Node, source: &str) -> Vec<ImportBinding> {
    let mut cursor = node.walk();
    node.children_by_field_name("name", &mut cursor)
        .filter_map(|name| imported_name(&name, source))
        .map(|(path, alias)| ImportBinding {
            local_name: alias.clone().unwrap_or_else(|| path.clone()),
            record: ImportRecord::new(path, alias),
        })
        .collect()
}

/// Records for `from m import x as y` and `from __future__ import x`
///
/// Each record's module is `<m>.<x>`. Relative imports lose their leading
/// dots, so `from . import x` yields `.x`.
pub fn from_import_bindings(node: &Node, source: &str) -> Vec<ImportBinding> {
    let module = if node.kind() == "future_import_statement" {
        "__future__".to_string()
    } else {
        node.child_by_field_name("module_name")
            .map(|m| module_path(&m, source))
            .unwrap_or_default()
    };

    let mut cursor = node.walk();
    let mut bindings: Vec<ImportBinding> = node
        .children_by_field_name("name", &mut cursor)
        .filter_map(|name| imported_name(&name, source))
        .map(|(name, alias)| ImportBinding {
            local_name: alias.clone().unwrap_or_else(|| name.clone()),
            record: ImportRecord::new(format!("{}.{}", module, name), alias),
        })
        .collect();

    let mut cursor = node.walk();
    let wildcard = node
        .named_children(&mut cursor)
        .any(|child| child.kind() == "wildcard_import");
    if wildcard {
        bindings.push(ImportBinding {
            local_name: "*".to_string(),
            record: ImportRecord::new(format!("{}.*", module), None),
        });
    }

    bindings
}

/// `(name, alias)` of a `dotted_name` or `aliased_import` node
fn imported_name(node: &Node, source: &str) -> Option<(String, Option<String>)> {
    match node.kind() {
        "aliased_import" => {
            let name = node.child_by_field_name("name")?;
            let alias = node
                .child_by_field_name("alias")
                .map(|a| get_node_text(&a, source));
            Some((dotted_path(&name, source), alias))
        }
        "dotted_name" | "identifier" => Some((dotted_path(node, source), None)),
        _ => None,
    }
}

/// Module path of a `from` import, without relative dots
fn module_path(node: &Node, source: &str) -> String {
    if node.kind() == "relative_import" {
        let mut cursor = node.walk();
        let dotted = node
            .named_children(&mut cursor)
            .find(|child| child.kind() == "dotted_name");
        return dotted
            .map(|d| dotted_path(&d, source))
            .unwrap_or_default();
    }
    dotted_path(node, source)
}

/// Dotted name with any interior whitespace dropped
fn dotted_path(node: &Node, source: &str) -> String {
    if node.kind() != "dotted_name" {
        return get_node_text(node, source);
    }
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|part| part.kind() == "identifier")
        .map(|part| get_node_text(&part, source))
        .collect::<Vec<_>>()
        .join(".")
}

// ============================================================================
// Classes
// ============================================================================

/// Record for a `class_definition` node
///
/// Only statements directly in the class body are considered for methods.
pub fn class_record(node: &Node, source: &str) -> ClassRecord {
    let name = node
        .child_by_field_name("name")
        .map(|n| get_node_text(&n, source))
        .unwrap_or_default();

    let bases = node
        .child_by_field_name("superclasses")
        .map(|args| {
            let mut cursor = args.walk();
            args.named_children(&mut cursor)
                .filter(|base| base.kind() == "identifier")
                .map(|base| get_node_text(&base, source))
                .collect()
        })
        .unwrap_or_default();

    let methods = node
        .child_by_field_name("body")
        .map(|body| {
            statements(&body)
                .iter()
                .filter_map(function_definition)
                .map(|method| function_record(&method, source))
                .collect()
        })
        .unwrap_or_default();

    ClassRecord {
        name,
        bases,
        methods,
    }
}

/// The synchronous function definition a statement declares, unwrapping
/// decorators
pub fn function_definition<'tree>(stmt: &Node<'tree>) -> Option<Node<'tree>> {
    let def = match stmt.kind() {
        "function_definition" => *stmt,
        "decorated_definition" => stmt
            .child_by_field_name("definition")
            .filter(|def| def.kind() == "function_definition")?,
        _ => return None,
    };
    (!is_async(&def)).then_some(def)
}

/// Whether a `function_definition` is an `async def`
pub fn is_async(node: &Node) -> bool {
    node.child(0).is_some_and(|first| first.kind() == "async")
}

// ============================================================================
// Functions
// ============================================================================

/// Record for a `function_definition` node
pub fn function_record(node: &Node, source: &str) -> FunctionRecord {
    let name = node
        .child_by_field_name("name")
        .map(|n| get_node_text(&n, source))
        .unwrap_or_default();

    let args = node
        .child_by_field_name("parameters")
        .map(|params| positional_parameters(&params, source))
        .unwrap_or_default();

    let docstring = node
        .child_by_field_name("body")
        .and_then(|body| docstring(&body, source));

    FunctionRecord {
        name,
        args,
        docstring,
    }
}

/// Names of the positional parameters in a `parameters` node
///
/// Type annotations and defaults are ignored. Parameters before `/` are
/// positional-only and dropped, everything after a bare `*` or `*args` is
/// keyword-only and `**kwargs` is never positional.
pub fn positional_parameters(params: &Node, source: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut cursor = params.walk();

    for param in params.named_children(&mut cursor) {
        match param.kind() {
            "identifier" => args.push(get_node_text(&param, source)),
            "typed_parameter" => match param.named_child(0) {
                Some(inner) if inner.kind() == "identifier" => {
                    args.push(get_node_text(&inner, source));
                }
                Some(inner) if inner.kind() == "list_splat_pattern" => break,
                _ => {}
            },
            "default_parameter" | "typed_default_parameter" => {
                if let Some(name) = param.child_by_field_name("name") {
                    if name.kind() == "identifier" {
                        args.push(get_node_text(&name, source));
                    }
                }
            }
            "positional_separator" => args.clear(),
            "list_splat_pattern" | "keyword_separator" => break,
            _ => {}
        }
    }

    args
}

/// Docstring of a function body: its leading string literal statement
pub fn docstring(body: &Node, source: &str) -> Option<String> {
    let first = statements(body).into_iter().next()?;
    if first.kind() != "expression_statement" {
        return None;
    }

    let parts = statements(&first);
    match parts.as_slice() {
        [expr] => string_literal_value(expr, source).map(|raw| clean_docstring(&raw)),
        _ => None,
    }
}

/// Value of a constant string expression, `None` for bytes and f-strings
fn string_literal_value(node: &Node, source: &str) -> Option<String> {
    match node.kind() {
        "string" => decode_string_literal(&get_node_text(node, source)),
        "concatenated_string" => statements(node)
            .iter()
            .map(|part| string_literal_value(part, source))
            .collect(),
        "parenthesized_expression" => match statements(node).as_slice() {
            [inner] => string_literal_value(inner, source),
            _ => None,
        },
        _ => None,
    }
}

/// Decode a single string literal token, prefix and quotes included
pub fn decode_string_literal(literal: &str) -> Option<String> {
    let quote_start = literal.find(|c| c == '"' || c == '\'')?;
    let (prefix, quoted) = literal.split_at(quote_start);
    let prefix = prefix.to_ascii_lowercase();
    if prefix.contains('b') || prefix.contains('f') || prefix.contains('t') {
        return None;
    }

    let quote_len = if quoted.starts_with("\"\"\"") || quoted.starts_with("'''") {
        3
    } else {
        1
    };
    if quoted.len() < quote_len * 2 {
        return None;
    }
    let body = quoted.get(quote_len..quoted.len() - quote_len)?;

    if prefix.contains('r') {
        Some(body.to_string())
    } else {
        Some(unescape(body))
    }
}

/// Resolve backslash escapes of a non-raw string body
///
/// Named escapes (`\N{EM DASH}`) need the Unicode name table and are not
/// resolved: they stay in the output as written, like unknown escapes.
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut value = next.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.extend(char::from_u32(value));
            }
            'x' => push_hex_escape(&mut out, &mut chars, next, 2),
            'u' => push_hex_escape(&mut out, &mut chars, next, 4),
            'U' => push_hex_escape(&mut out, &mut chars, next, 8),
            other => {
                // Unknown and named escapes are kept verbatim
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

fn push_hex_escape(out: &mut String, chars: &mut Peekable<Chars>, marker: char, digits: usize) {
    let mut hex = String::with_capacity(digits);
    while hex.len() < digits {
        match chars.peek() {
            Some(c) if c.is_ascii_hexdigit() => {
                hex.push(*c);
                chars.next();
            }
            _ => break,
        }
    }

    let decoded = (hex.len() == digits)
        .then(|| u32::from_str_radix(&hex, 16).ok())
        .flatten()
        .and_then(char::from_u32);
    match decoded {
        Some(c) => out.push(c),
        None => {
            out.push('\\');
            out.push(marker);
            out.push_str(&hex);
        }
    }
}
