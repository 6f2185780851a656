//! Malformed input and unusual syntax

use aegis_code::{analyze, analyze_source, extract_structure, AnalysisDocument, SYNTAX_ERROR_LABEL};

use crate::common::*;

// ============================================================================
// Syntax errors
// ============================================================================

#[test]
fn test_syntax_errors_never_yield_partial_structure() {
    let sources = [
        "def broken(",
        "import os\nclass Ok:\n    pass\ndef broken(:\n    pass\n",
        "class A\n    pass\n",
        "def invalid function():\n    pass\n",
        "x = [1, 2\n",
        "from import os\n",
    ];
    for source in sources {
        let json = analyze(source);
        assert!(!json.contains("\"imports\""), "partial output for {:?}", source);
        let err = expect_error(&json);
        assert_eq!(err.error, SYNTAX_ERROR_LABEL);
        assert!(!err.details.is_empty());
    }
}

#[test]
fn test_error_details_carry_a_line() {
    let err = expect_error(&analyze("import os\n\ndef broken(\n"));
    assert!(err.details.contains("line "), "details: {}", err.details);
}

#[test]
fn test_extract_structure_returns_failure() {
    let failure = extract_structure("class (").unwrap_err();
    assert!(!failure.message.is_empty());
    assert!(failure.location.is_some());
}

#[test]
fn test_python2_statements_are_syntax_errors() {
    let cases = [
        ("print \"hello\"\n", "'print'"),
        ("import sys\nprint >>sys.stderr, 'x'\n", "'print'"),
        ("exec \"x = 1\"\n", "'exec'"),
    ];
    for (source, callee) in cases {
        let err = expect_error(&analyze(source));
        assert_eq!(err.error, SYNTAX_ERROR_LABEL);
        assert!(
            err.details.contains(&format!("Missing parentheses in call to {}", callee)),
            "details: {}",
            err.details
        );
    }

    let doc = expect_structure(&analyze("print(\"ok\")\nexec(\"x = 1\")\n"));
    assert!(doc.is_empty());
}

#[test]
fn test_excessive_bracket_nesting_is_a_syntax_error() {
    let nested = |depth: usize| format!("x = {}1{}\n", "(".repeat(depth), ")".repeat(depth));

    let err = expect_error(&analyze(&nested(20_000)));
    assert!(err.details.contains("too many nested parentheses"), "details: {}", err.details);

    expect_structure(&analyze(&nested(100)));
}

// ============================================================================
// Boundary inputs
// ============================================================================

#[test]
fn test_whitespace_and_comments_only() {
    for source in ["\n\n\n", "   \n", "# comment\n# another\n", "\"\"\"module doc\"\"\"\n"] {
        let doc = expect_structure(&analyze(source));
        assert!(doc.is_empty(), "unexpected structure for {:?}", source);
    }
}

#[test]
fn test_crlf_line_endings() {
    let source = "import os\r\nclass A:\r\n    def m(self):\r\n        \"\"\"Doc.\r\n\r\n        More.\r\n        \"\"\"\r\n";
    let doc = expect_structure(&analyze(source));
    assert_eq!(doc.classes[0].methods[0].docstring.as_deref(), Some("Doc.\n\nMore."));
}

#[test]
fn test_unicode_identifiers_and_docstrings() {
    let source = "def grüße(name):\n    \"\"\"Sagt Hallo, 世界 ✓\"\"\"\n";
    let doc = expect_structure(&analyze(source));
    assert_eq!(doc.functions[0].name, "grüße");
    assert_eq!(doc.functions[0].docstring.as_deref(), Some("Sagt Hallo, 世界 ✓"));
}

#[test]
fn test_deeply_nested_functions_stay_hidden() {
    let mut source = String::from("def level0():\n");
    for depth in 1..30 {
        let indent = "    ".repeat(depth);
        source.push_str(&format!("{}def level{}():\n", indent, depth));
    }
    source.push_str(&format!("{}pass\n", "    ".repeat(30)));

    let doc = expect_structure(&analyze(&source));
    assert_eq!(function_names(&doc), vec!["level0"]);
}

#[test]
fn test_long_expression_chain_is_walked() {
    let mut source = String::from("import os\ntotal = 0");
    source.push_str(&" + 1".repeat(100_000));
    source.push_str("\ndef after():\n    pass\n");

    let doc = expect_structure(&analyze(&source));
    assert_eq!(import_modules(&doc), vec!["os"]);
    assert_eq!(function_names(&doc), vec!["after"]);
}

#[test]
fn test_async_definitions_are_not_recorded() {
    let source = r#"
import asyncio

class Client:
    async def fetch(self, url):
        pass
    def close(self):
        pass

async def main():
    from aiohttp import ClientSession
    pass
"#;
    let doc = expect_structure(&analyze(source));
    assert!(doc.functions.is_empty());
    assert_eq!(method_names(&doc, "Client"), vec!["close"]);
    assert_not_top_level(&doc, &["fetch", "main"]);
    assert_eq!(import_modules(&doc), vec!["asyncio", "aiohttp.ClientSession"]);
}

#[test]
fn test_many_declarations() {
    let source: String = (0..500)
        .map(|i| format!("def f{}(a, b):\n    pass\n\n", i))
        .collect();
    let doc = expect_structure(&analyze(&source));
    assert_eq!(doc.functions.len(), 500);
    assert_eq!(doc.functions[499].name, "f499");
}

// ============================================================================
// Docstring decoding
// ============================================================================

#[test]
fn test_docstring_escapes() {
    let source = r#"
def escaped():
    "Quote \" and \\ slash\nnewline \u00e9 \x41"

def raw():
    r"C:\new\table"

def not_bytes():
    b"bytes are not docstrings"

def not_fstring():
    f"{value} is formatted"

def concatenated():
    "Part one, " "part two."
"#;
    let doc = expect_structure(&analyze(source));
    let docs: Vec<Option<&str>> = doc.functions.iter().map(|f| f.docstring.as_deref()).collect();
    assert_eq!(
        docs,
        vec![
            Some("Quote \" and \\ slash\nnewline é A"),
            Some(r"C:\new\table"),
            None,
            None,
            Some("Part one, part two."),
        ]
    );
}

#[test]
fn test_docstring_must_be_first_statement() {
    let source = "def f():\n    x = 1\n    \"\"\"Too late.\"\"\"\n";
    let doc = expect_structure(&analyze(source));
    assert_eq!(doc.functions[0].docstring, None);
}

#[test]
fn test_comment_before_docstring() {
    let source = "def f():\n    # leading comment\n    \"\"\"Still the docstring.\"\"\"\n";
    let doc = expect_structure(&analyze(source));
    assert_eq!(doc.functions[0].docstring.as_deref(), Some("Still the docstring."));
}

// ============================================================================
// Unusual declarations
// ============================================================================

#[test]
fn test_class_without_body_methods() {
    let source = "class Empty: pass\nclass WithAttrs:\n    x = 1\n    y: int = 2\n";
    let doc = expect_structure(&analyze(source));
    assert_eq!(doc.classes.len(), 2);
    assert!(doc.classes.iter().all(|c| c.methods.is_empty()));
}

#[test]
fn test_dotted_and_generic_bases_are_skipped() {
    let source = "class A(abc.ABC, Generic[T], Mixin, metaclass=Meta): pass\n";
    let doc = expect_structure(&analyze(source));
    assert_eq!(doc.classes[0].bases, vec!["Mixin"]);
}

#[test]
fn test_conditional_methods_are_not_direct() {
    let source = r#"
class Platform:
    if sys.platform == "win32":
        def path(self):
            pass
    def name(self):
        pass
"#;
    let doc = expect_structure(&analyze(source));
    assert_eq!(method_names(&doc, "Platform"), vec!["name"]);
    assert!(doc.functions.is_empty());
}

#[test]
fn test_lambda_is_not_a_function() {
    let doc = expect_structure(&analyze("handler = lambda event: event\n"));
    assert!(doc.functions.is_empty());
}

#[test]
fn test_analyze_source_is_reentrant() {
    let sources = ["import a", "def b(): pass", "class C: pass", "def broken("];
    let handles: Vec<_> = sources
        .iter()
        .map(|s| {
            let source = s.to_string();
            std::thread::spawn(move || analyze_source(&source))
        })
        .collect();

    let results: Vec<AnalysisDocument> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results[0].as_structure().unwrap().imports.len() == 1);
    assert!(results[1].as_structure().unwrap().functions.len() == 1);
    assert!(results[2].as_structure().unwrap().classes.len() == 1);
    assert!(results[3].is_error());
}
