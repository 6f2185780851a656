//! Cross-format consistency

use aegis_code::{analyze, analyze_source, encode_toon, encode_toon_batch, FileAnalysis};
use serde_json::Value;

use crate::common::*;

const SAMPLE: &str = r#"
import os
from typing import List as L

class Greeter(Base):
    def greet(self, name):
        """Say hello."""
        return name

def main(argv):
    pass
"#;

#[test]
fn test_pretty_json_uses_two_space_indent() {
    let json = analyze(SAMPLE);
    assert!(json.starts_with("{\n  \"imports\": [\n    {\n      \"module\": \"os\""));
    assert!(!json.contains('\t'));
}

#[test]
fn test_pretty_and_compact_json_agree() {
    let document = analyze_source(SAMPLE);
    let pretty: Value = serde_json::from_str(&serde_json::to_string_pretty(&document).unwrap()).unwrap();
    let compact_text = serde_json::to_string(&document).unwrap();
    let compact: Value = serde_json::from_str(&compact_text).unwrap();

    assert_eq!(pretty, compact);
    assert!(!compact_text.contains('\n'));
}

#[test]
fn test_analyze_matches_typed_document() {
    let from_string = parse_document(&analyze(SAMPLE));
    assert_eq!(from_string, analyze_source(SAMPLE));
}

#[test]
fn test_toon_carries_the_same_names() {
    let document = analyze_source(SAMPLE);
    let toon = encode_toon(&document);

    for name in ["os", "typing.List", "Greeter", "Base", "greet", "Say hello.", "main", "argv"] {
        assert!(toon.contains(name), "TOON output lacks {}: {}", name, toon);
    }
    assert!(!toon.trim_start().starts_with('{'));
}

#[test]
fn test_toon_error_document() {
    let toon = encode_toon(&analyze_source("def broken("));
    assert!(toon.contains("error"));
    assert!(toon.contains("Invalid Python syntax"));
    assert!(!toon.contains("imports"));
}

#[test]
fn test_toon_batch_keeps_file_order() {
    let analyses: Vec<FileAnalysis> = ["first.py", "second.py", "third.py"]
        .iter()
        .map(|name| FileAnalysis {
            file: name.to_string(),
            result: analyze_source("def f(): pass\n"),
        })
        .collect();

    let toon = encode_toon_batch(&analyses);
    let blocks: Vec<&str> = toon.split("---\n").filter(|b| !b.trim().is_empty()).collect();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].contains("first.py"));
    assert!(blocks[1].contains("second.py"));
    assert!(blocks[2].contains("third.py"));
}

#[test]
fn test_file_analysis_json_shape() {
    let analysis = FileAnalysis {
        file: "pkg/mod.py".to_string(),
        result: analyze_source("import os\n"),
    };
    let value = serde_json::to_value(&analysis).unwrap();
    assert_keys(&value, &["file", "result"]);
    assert_keys(&value["result"], &["imports", "classes", "functions"]);
}
