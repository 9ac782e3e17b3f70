//! Build command: compile a layer document and write karabiner.json.

use crate::cli::common::{load_layer_document, resolve_layers_path, CliError, CliResult};
use crate::compiler::{compile, DocumentValidator};
use crate::config::Config;
use crate::constants::HYPER_VARIABLE;
use crate::karabiner::{emit_document, render, write_config, EmitSettings};
use crate::key_db::KeyDb;
use clap::Args;
use std::path::PathBuf;

/// Compile a layer document into Karabiner-Elements configuration
#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    /// Path to the layer document (defaults to the configured file)
    #[arg(short, long, value_name = "FILE")]
    pub layers: Option<PathBuf>,

    /// Output path (defaults to the engine's karabiner.json)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Profile name override
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Print the generated document to stdout instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Skip backing up an existing output file
    #[arg(long)]
    pub no_backup: bool,
}

impl BuildArgs {
    /// Execute the build command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load().unwrap_or_default();
        let layers_path = resolve_layers_path(self.layers.as_deref(), &config)?;
        let document = load_layer_document(&layers_path)?;

        let key_db = KeyDb::load()
            .map_err(|e| CliError::io(format!("Failed to load key database: {e}")))?;

        // All fatal findings abort before anything is written.
        let report = DocumentValidator::new(&document, &key_db).validate();
        if !report.is_valid() {
            return Err(CliError::validation(format!(
                "Layer document is invalid:\n{}",
                report.format_message()
            )));
        }

        let output = compile(&document.layers, HYPER_VARIABLE)
            .map_err(|e| CliError::validation(e.to_string()))?;

        for warning in &output.warnings {
            eprintln!("⚠ {warning}");
        }

        let settings = EmitSettings {
            profile_name: self
                .profile
                .clone()
                .unwrap_or_else(|| config.profile.name.clone()),
            show_in_menu_bar: config.profile.show_in_menu_bar,
        };
        let karabiner_config = emit_document(&document, &output, &settings);

        if self.dry_run {
            let json = render(&karabiner_config)
                .map_err(|e| CliError::io(format!("Failed to render configuration: {e}")))?;
            print!("{json}");
            return Ok(());
        }

        let output_path = match &self.output {
            Some(path) => path.clone(),
            None => config
                .output_path()
                .map_err(|e| CliError::io(format!("Failed to resolve output path: {e}")))?,
        };

        let backup = config.build.backups && !self.no_backup;
        let backup_path = write_config(&output_path, &karabiner_config, backup)
            .map_err(|e| CliError::io(format!("Failed to write configuration: {e}")))?;

        let groups = output
            .rules
            .iter()
            .filter_map(|r| r.group.as_ref())
            .collect::<std::collections::HashSet<_>>()
            .len();

        println!(
            "✓ Compiled {} sublayers into {} rules",
            groups,
            output.rules.len()
        );
        println!("  Output: {}", output_path.display());
        if let Some(backup_path) = backup_path {
            println!("  Backup: {}", backup_path.display());
        }

        Ok(())
    }
}
