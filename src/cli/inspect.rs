//! Inspect command: print the compiled chord table for review.

use crate::cli::common::{load_layer_document, resolve_layers_path, CliError, CliResult};
use crate::compiler::{compile, GeneratedRule};
use crate::config::Config;
use crate::constants::HYPER_VARIABLE;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Show the chords a layer document compiles to
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to the layer document (defaults to the configured file)
    #[arg(short, long, value_name = "FILE")]
    pub layers: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One sub-layer in the inspection output.
#[derive(Debug, Serialize)]
struct SublayerEntry {
    key: String,
    /// True when tapping the group key alone performs an action
    alone: bool,
    chords: Vec<ChordEntry>,
}

/// One chord in the inspection output.
#[derive(Debug, Serialize)]
struct ChordEntry {
    key: String,
    description: String,
}

/// The full inspection output.
#[derive(Debug, Serialize)]
struct InspectResponse {
    hyper_key: String,
    sublayers: Vec<SublayerEntry>,
    bindings: Vec<ChordEntry>,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load().unwrap_or_default();
        let layers_path = resolve_layers_path(self.layers.as_deref(), &config)?;
        let document = load_layer_document(&layers_path)?;

        let output = compile(&document.layers, HYPER_VARIABLE)
            .map_err(|e| CliError::validation(e.to_string()))?;

        let response = build_response(document.hyper.from.as_str(), &output.rules);

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        println!("Hyper key: {}", response.hyper_key);
        println!();

        for sublayer in &response.sublayers {
            if sublayer.alone {
                println!(
                    "{} - {} chords (tap alone bound)",
                    sublayer.key,
                    sublayer.chords.len()
                );
            } else {
                println!("{} - {} chords", sublayer.key, sublayer.chords.len());
            }
            for chord in &sublayer.chords {
                println!("  {} + {} → {}", sublayer.key, chord.key, chord.description);
            }
            println!();
        }

        if !response.bindings.is_empty() {
            println!("Direct bindings:");
            for binding in &response.bindings {
                println!("  hyper + {} → {}", binding.key, binding.description);
            }
        }

        Ok(())
    }
}

/// Folds the compiled rules back into a per-sublayer table.
fn build_response(hyper_key: &str, rules: &[GeneratedRule]) -> InspectResponse {
    let mut sublayers: Vec<SublayerEntry> = Vec::new();
    let mut bindings = Vec::new();

    for rule in rules {
        match &rule.group {
            Some(group) => {
                let is_arming = rule.to.first().is_some_and(|t| t.set_variable.is_some());
                if is_arming {
                    sublayers.push(SublayerEntry {
                        key: group.as_str().to_string(),
                        alone: !rule.to_if_alone.is_empty(),
                        chords: Vec::new(),
                    });
                } else if let Some(entry) =
                    sublayers.iter_mut().rev().find(|s| s.key == group.as_str())
                {
                    entry.chords.push(ChordEntry {
                        key: rule.from.key_code.clone(),
                        description: rule.description.clone(),
                    });
                }
            }
            None => bindings.push(ChordEntry {
                key: rule.from.key_code.clone(),
                description: rule.description.clone(),
            }),
        }
    }

    InspectResponse {
        hyper_key: hyper_key.to_string(),
        sublayers,
        bindings,
    }
}
