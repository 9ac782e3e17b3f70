//! Shared CLI error handling and response types.

use crate::cli::usage_hint;
use crate::compiler::CompileError;
use crate::models::LayerDocument;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Result type for CLI command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// CLI-level error with an associated exit code.
#[derive(Debug, Clone)]
pub struct CliError {
    kind: CliErrorKind,
    message: String,
}

/// Categories of CLI errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Invalid input document or configuration
    Validation,
    /// File system or serialization failure
    Io,
    /// Incorrect invocation
    Usage,
}

impl CliError {
    /// Creates a validation error (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// Creates an I/O error (exit code 1).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// Creates a usage error (exit code 2).
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Usage,
            message: message.into(),
        }
    }

    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self.kind {
            CliErrorKind::Validation | CliErrorKind::Io => 1,
            CliErrorKind::Usage => 2,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Loads and parses a layer document for commands that fail fast.
///
/// The `validate` command reads and parses by hand instead, so parse
/// errors land in its structured report rather than aborting.
pub fn load_layer_document(path: &Path) -> CliResult<LayerDocument> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))?;

    crate::parser::parse_layer_str(&content)
        .map_err(|e| CliError::validation(format!("{}:\n  {e}", path.display())))
}

/// Resolves the layer-document path from the CLI flag or the config.
pub fn resolve_layers_path(
    flag: Option<&Path>,
    config: &crate::config::Config,
) -> CliResult<std::path::PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| config.paths.layers_file.clone())
        .ok_or_else(|| {
            CliError::usage(format!(
                "No layer document specified. Pass --layers <FILE> or set it once with:\n  {}",
                usage_hint("config set --layers-file <FILE>")
            ))
        })
}

/// Machine-readable validation response for `validate --json`.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    /// True when no errors were found
    pub valid: bool,
    /// Fatal findings
    pub errors: Vec<ValidationMessage>,
    /// Non-fatal findings
    pub warnings: Vec<String>,
    /// Document statistics
    pub stats: ValidationStats,
}

/// One fatal finding in a validation response.
#[derive(Debug, Serialize)]
pub struct ValidationMessage {
    /// Machine-readable error kind
    pub kind: String,
    /// Human-readable message
    pub message: String,
    /// Key symbol context, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Owning group context, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Suggested fix, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl From<&CompileError> for ValidationMessage {
    fn from(error: &CompileError) -> Self {
        Self {
            kind: error.kind.id().to_string(),
            message: error.message.clone(),
            key: error.key.clone(),
            group: error.group.clone(),
            suggestion: error.suggestion.clone(),
        }
    }
}

/// Document statistics reported alongside validation results.
#[derive(Debug, Default, Serialize)]
pub struct ValidationStats {
    /// Number of sub-layer groups
    pub groups: usize,
    /// Number of leaf chords (firing rules)
    pub chords: usize,
    /// Total generated rules, arming rules included
    pub rules: usize,
}
