//! Validation command for layer documents.

use crate::cli::common::{
    resolve_layers_path, CliError, CliResult, ValidationMessage, ValidationResponse,
    ValidationStats,
};
use crate::compiler::{compile, CompileReport, DocumentValidator};
use crate::config::Config;
use crate::constants::HYPER_VARIABLE;
use crate::key_db::KeyDb;
use crate::models::{LayerDocument, Node};
use clap::Args;
use std::path::PathBuf;

/// Validate a layer document for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to the layer document (defaults to the configured file)
    #[arg(short, long, value_name = "FILE")]
    pub layers: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load().unwrap_or_default();
        let layers_path = resolve_layers_path(self.layers.as_deref(), &config)?;

        let content = std::fs::read_to_string(&layers_path)
            .map_err(|e| CliError::io(format!("Failed to read {}: {e}", layers_path.display())))?;

        // Parse errors become report entries so --json output stays
        // machine-readable even for malformed documents.
        let (report, stats) = match crate::parser::parse_layer_str(&content) {
            Ok(document) => {
                let key_db = KeyDb::load()
                    .map_err(|e| CliError::io(format!("Failed to load key database: {e}")))?;
                let report = DocumentValidator::new(&document, &key_db).validate();
                (report, document_stats(&document))
            }
            Err(error) => {
                let mut report = CompileReport::new();
                report.add_error(error);
                (report, ValidationStats::default())
            }
        };

        let response = ValidationResponse {
            valid: report.is_valid(),
            errors: report.errors.iter().map(ValidationMessage::from).collect(),
            warnings: report.warnings.iter().map(|w| w.message.clone()).collect(),
            stats,
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else if response.valid {
            println!("✓ Validation passed");
            println!(
                "  {} sublayers, {} chords, {} rules",
                response.stats.groups, response.stats.chords, response.stats.rules
            );
            for warning in &response.warnings {
                println!("  ⚠ {warning}");
            }
        } else {
            println!("✗ Validation failed");
            println!("{}", report.format_message());
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && !response.warnings.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}

/// Computes document statistics for the report.
fn document_stats(document: &LayerDocument) -> ValidationStats {
    let groups = document
        .layers
        .bindings()
        .iter()
        .filter(|b| matches!(b.node, Node::Layer(_)))
        .count();

    // A structurally broken document reports zero counts; the error
    // list is the interesting part then.
    let rules = compile(&document.layers, HYPER_VARIABLE)
        .map(|output| output.rules.len())
        .unwrap_or(0);

    ValidationStats {
        groups,
        chords: rules.saturating_sub(groups),
        rules,
    }
}
