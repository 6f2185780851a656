//! TOON (Token-Oriented Object Notation) encoder using rtoon library
//!
//! Documents are converted to JSON values with the same keys and ordering
//! as the JSON output, then handed to rtoon. Uniform arrays such as import
//! lists come out as tabular blocks.

use rtoon::encode_default;
use serde_json::{json, Map, Value};

use crate::schema::{AnalysisDocument, FileAnalysis};

/// Encode one analysis document as TOON
pub fn encode_toon(document: &AnalysisDocument) -> String {
    encode_value(document_value(document))
}

/// Encode a batch of file analyses, one TOON block per file separated by `---`
pub fn encode_toon_batch(analyses: &[FileAnalysis]) -> String {
    let mut output = String::new();

    for analysis in analyses {
        let mut obj = Map::new();
        obj.insert("file".to_string(), json!(analysis.file));
        if let Value::Object(fields) = document_value(&analysis.result) {
            obj.extend(fields);
        }

        output.push_str(&encode_value(Value::Object(obj)));
        if !output.ends_with('\n') {
            output.push('\n');
        }
        output.push_str("---\n");
    }

    output
}

fn document_value(document: &AnalysisDocument) -> Value {
    serde_json::to_value(document).unwrap_or_else(|e| {
        json!({
            "error": "Serialization failure",
            "details": e.to_string(),
        })
    })
}

fn encode_value(value: Value) -> String {
    encode_default(&value).unwrap_or_else(|e| format!("TOON encoding error: {}", e))
}
