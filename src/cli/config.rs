//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_NAME;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Print the config file path
    Path,
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Default layer document path
    #[arg(long, value_name = "FILE")]
    layers_file: Option<PathBuf>,

    /// Target karabiner.json path
    #[arg(long, value_name = "FILE")]
    karabiner_config: Option<PathBuf>,

    /// Profile name written into the output
    #[arg(long, value_name = "NAME")]
    profile_name: Option<String>,

    /// Back up an existing output file before overwriting (true/false)
    #[arg(long, value_name = "BOOL")]
    backups: Option<bool>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    paths: PathsOutput,
    profile: ProfileOutput,
    build: BuildOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    layers_file: Option<String>,
    karabiner_config: String,
}

#[derive(Serialize, Debug)]
struct ProfileOutput {
    name: String,
    show_in_menu_bar: bool,
}

#[derive(Serialize, Debug)]
struct BuildOutput {
    backups: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("Failed to resolve config path: {e}")))?;
                println!("{}", path.display());
                Ok(())
            }
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e}")))?;

        let output_path = config
            .output_path()
            .map_err(|e| CliError::io(format!("Failed to resolve output path: {e}")))?;

        if self.json {
            let output = ConfigOutput {
                paths: PathsOutput {
                    layers_file: config
                        .paths
                        .layers_file
                        .as_ref()
                        .map(|p| p.to_string_lossy().to_string()),
                    karabiner_config: output_path.to_string_lossy().to_string(),
                },
                profile: ProfileOutput {
                    name: config.profile.name.clone(),
                    show_in_menu_bar: config.profile.show_in_menu_bar,
                },
                build: BuildOutput {
                    backups: config.build.backups,
                },
            };

            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::io(format!("Failed to serialize configuration: {e}")))?;
            println!("{json}");
        } else {
            println!("{APP_NAME} Configuration");
            println!("========================");
            println!();

            println!("Paths:");
            if let Some(layers) = &config.paths.layers_file {
                println!("  Layer document:  {}", layers.display());
            } else {
                println!("  Layer document:  (not configured)");
            }
            println!("  karabiner.json:  {}", output_path.display());
            println!();

            println!("Profile:");
            println!("  Name:            {}", config.profile.name);
            println!("  Menu bar icon:   {}", config.profile.show_in_menu_bar);
            println!();

            println!("Build:");
            println!("  Backups:         {}", config.build.backups);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.layers_file.is_none()
            && self.karabiner_config.is_none()
            && self.profile_name.is_none()
            && self.backups.is_none()
        {
            return Err(CliError::usage(
                "At least one option must be specified: --layers-file, --karabiner-config, \
                 --profile-name, or --backups",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(path) = &self.layers_file {
            if !path.exists() {
                return Err(CliError::validation(format!(
                    "Layer document does not exist: {}",
                    path.display()
                )));
            }
            config.paths.layers_file = Some(path.clone());
        }

        if let Some(path) = &self.karabiner_config {
            config.paths.karabiner_config = Some(path.clone());
        }

        if let Some(name) = &self.profile_name {
            config.profile.name.clone_from(name);
        }

        if let Some(backups) = self.backups {
            config.build.backups = backups;
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e}")))?;

        println!("✓ Configuration updated");

        Ok(())
    }
}
