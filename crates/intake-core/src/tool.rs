//! Tool descriptors handed to the dispatcher.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::validate_required_fields;

/// How the dispatcher runs a tool's handler, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    /// Anything that is not `.sh` or `.py`.
    JavaScript,
    /// `.sh` handlers.
    Shell,
    /// `.py` handlers.
    Python,
}

impl HandlerKind {
    /// Classify a handler path.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("sh") => Self::Shell,
            Some("py") => Self::Python,
            _ => Self::JavaScript,
        }
    }
}

/// A tool as the dispatcher sees it.
///
/// Serializes as `{name, description, inputSchema, handler}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the tool's arguments.
    pub input_schema: Value,
    /// Path to the handler script.
    pub handler: PathBuf,
}

impl ToolDescriptor {
    /// Runtime the handler needs.
    pub fn handler_kind(&self) -> HandlerKind {
        HandlerKind::from_path(&self.handler)
    }

    /// Required arguments absent from `args`.
    pub fn missing_fields(&self, args: &Value) -> Vec<String> {
        validate_required_fields(args, &self.input_schema)
    }
}

/// Build a [`ToolDescriptor`].
pub fn create_tool_config(
    name: impl Into<String>,
    description: impl Into<String>,
    input_schema: Value,
    handler: impl Into<PathBuf>,
) -> ToolDescriptor {
    ToolDescriptor {
        name: name.into(),
        description: description.into(),
        input_schema,
        handler: handler.into(),
    }
}
