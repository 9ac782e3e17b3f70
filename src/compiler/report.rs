//! Compile error and warning types.
//!
//! All fatal conditions abort compilation before any output exists; the
//! writer never sees a partially valid rule list. Warnings are collected
//! and reported alongside successful output.

use std::fmt;

/// A fatal compilation error with context.
#[derive(Debug, Clone)]
pub struct CompileError {
    /// Type of compile error
    pub kind: CompileErrorKind,
    /// Key symbol the error is about, if any
    pub key: Option<String>,
    /// Owning group key, if the error occurred inside a sub-layer
    pub group: Option<String>,
    /// Human-readable error message
    pub message: String,
    /// Optional suggestion for fixing the error
    pub suggestion: Option<String>,
}

impl CompileError {
    /// Creates a new compile error.
    pub fn new(kind: CompileErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            key: None,
            group: None,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Sets the key symbol context.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the owning group context.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.group, &self.key) {
            (Some(group), Some(key)) => {
                write!(
                    f,
                    "[sublayer '{}', key '{}'] {}: {}",
                    group, key, self.kind, self.message
                )?;
            }
            (None, Some(key)) => write!(f, "[key '{}'] {}: {}", key, self.kind, self.message)?,
            _ => write!(f, "{}: {}", self.kind, self.message)?,
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n    → {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for CompileError {}

/// Types of fatal compile errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileErrorKind {
    /// Two root entries share a group-key symbol
    DuplicateGroupKey,
    /// Two entries in one sub-layer share a leaf-key symbol
    DuplicateLeafKey,
    /// Two distinct group keys normalize to the same engine variable name
    FlagNameCollision,
    /// A leaf object has an unrecognized shape
    UnknownActionKind,
    /// A sub-layer contains another sub-layer (chords are two keys deep)
    NestedTooDeep,
    /// A key symbol is not a known Karabiner key code
    UnknownKeySymbol,
    /// The document structure itself is malformed
    InvalidDocument,
}

impl CompileErrorKind {
    /// Stable machine-readable identifier, used in `--json` reports.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::DuplicateGroupKey => "duplicate_group_key",
            Self::DuplicateLeafKey => "duplicate_leaf_key",
            Self::FlagNameCollision => "flag_name_collision",
            Self::UnknownActionKind => "unknown_action_kind",
            Self::NestedTooDeep => "nested_too_deep",
            Self::UnknownKeySymbol => "unknown_key_symbol",
            Self::InvalidDocument => "invalid_document",
        }
    }
}

impl fmt::Display for CompileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateGroupKey => write!(f, "Duplicate Group Key"),
            Self::DuplicateLeafKey => write!(f, "Duplicate Leaf Key"),
            Self::FlagNameCollision => write!(f, "Flag Name Collision"),
            Self::UnknownActionKind => write!(f, "Unknown Action Kind"),
            Self::NestedTooDeep => write!(f, "Nested Too Deep"),
            Self::UnknownKeySymbol => write!(f, "Unknown Key Symbol"),
            Self::InvalidDocument => write!(f, "Invalid Document"),
        }
    }
}

/// Non-fatal warning surfaced to the author alongside successful output.
#[derive(Debug, Clone)]
pub struct CompileWarning {
    /// Warning message
    pub message: String,
}

impl CompileWarning {
    /// Creates a new warning.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Aggregated validation result for the `validate` command.
#[derive(Debug, Clone, Default)]
pub struct CompileReport {
    /// Fatal errors; any entry means no output may be written
    pub errors: Vec<CompileError>,
    /// Non-fatal warnings
    pub warnings: Vec<CompileWarning>,
}

impl CompileReport {
    /// Creates a new empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: CompileError) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: CompileWarning) {
        self.warnings.push(warning);
    }

    /// Formats the report as a user-friendly message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("✗ {} errors:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            message.push_str(&format!("⚠ {} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        message
    }
}
