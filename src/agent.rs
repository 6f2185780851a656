//! Tool-calling surface for LLM agents.
//!
//! The extractor is exposed as a single function tool,
//! `analyze_code_structure`, in the OpenAI/Ollama tool-calling shape.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::extract::analyze;

/// Name the extractor is registered under.
pub const ANALYZE_TOOL_NAME: &str = "analyze_code_structure";

/// Tool definition for a tool-calling API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// A tool call made by the LLM.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: Value,
}

/// Result of executing a tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(output: String) -> Self {
        Self {
            success: true,
            output,
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(message),
        }
    }
}

/// Agent that analyzes Python code structure.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodeAnalysisAgent;

impl CodeAnalysisAgent {
    pub fn new() -> Self {
        Self
    }

    /// The tool this agent provides.
    pub fn tool_definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: ANALYZE_TOOL_NAME.to_string(),
                description: "Analyze a string of Python source code and return its structure \
                              (imports, classes with methods, top-level functions) as JSON. \
                              Returns an error document if the code cannot be parsed."
                    .to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "code": {
                            "type": "string",
                            "description": "Python source code to analyze"
                        }
                    },
                    "required": ["code"]
                }),
            },
        }
    }

    /// Analyze code and return the JSON document.
    pub fn run(&self, code: &str) -> String {
        info!("Analyzing {} bytes of code", code.len());
        let document = analyze(code);
        debug!("{}", document);
        info!("Analysis complete");
        document
    }

    /// Execute a tool call and return the result.
    ///
    /// Unparseable code is still a successful call; the output is the
    /// error document.
    pub fn execute(&self, tool_call: &ToolCall) -> ToolResult {
        let name = &tool_call.function.name;
        debug!("Executing tool: {}", name);

        if name != ANALYZE_TOOL_NAME {
            return ToolResult::error(format!("Unknown tool: {}", name));
        }

        match code_argument(&tool_call.function.arguments) {
            Some(code) => ToolResult::success(self.run(&code)),
            None => ToolResult::error("Missing required parameter: code".to_string()),
        }
    }
}

/// Pull `code` out of the arguments.
///
/// Some models send arguments as a JSON-encoded string instead of an object.
fn code_argument(arguments: &Value) -> Option<String> {
    match arguments {
        Value::String(raw) => serde_json::from_str::<Value>(raw)
            .ok()
            .and_then(|parsed| parsed.get("code")?.as_str().map(str::to_string)),
        other => other.get("code")?.as_str().map(str::to_string),
    }
}
