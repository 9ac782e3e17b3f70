//! Init command: scaffold a starter layer document.

use crate::cli::common::{CliError, CliResult};
use crate::cli::usage_hint;
use crate::constants::DEFAULT_LAYERS_FILE;
use clap::Args;
use std::path::PathBuf;

/// Create a commented starter layer document
#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Where to write the starter file
    #[arg(value_name = "FILE", default_value = DEFAULT_LAYERS_FILE)]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// The scaffolded starter document.
const STARTER_DOCUMENT: &str = r#"{
  // hyperforge layer document.
  // A chord is: hold the hyper key, tap a group key, tap a leaf key.

  // The hyper key itself. Held: arms the chords below. Tapped alone: escape.
  hyper: {
    from: "caps_lock",
    alone: { key: "escape" },
  },

  layers: {
    // o = "Open" applications
    o: {
      n: { app: "Notion" },
      f: { app: "Finder" },
      // t: { app: "Microsoft Teams" },
    },

    // b = "Browse"
    b: {
      g: { open: "https://github.com" },
      y: { open: "https://www.youtube.com" },
    },

    // w = "Window" management
    w: {
      h: { window: "left-half" },
      l: { window: "right-half" },
      f: { window: "maximize" },
      semicolon: { description: "Window: Hide", to: [{ key_code: "h", modifiers: ["right_command"] }] },
    },

    // v = "moVe" arrows on the home row
    v: {
      h: { key: "left_arrow" },
      j: { key: "down_arrow" },
      k: { key: "up_arrow" },
      l: { key: "right_arrow" },
    },
  },
}
"#;

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> CliResult<()> {
        if self.path.exists() && !self.force {
            return Err(CliError::validation(format!(
                "{} already exists. Pass --force to overwrite it.",
                self.path.display()
            )));
        }

        std::fs::write(&self.path, STARTER_DOCUMENT)
            .map_err(|e| CliError::io(format!("Failed to write {}: {e}", self.path.display())))?;

        println!("✓ Wrote starter layer document to {}", self.path.display());
        println!();
        println!("Next steps:");
        println!("  1. Edit the file and bind your own chords");
        println!(
            "  2. Check what it compiles to:  {}",
            usage_hint(&format!("inspect --layers {}", self.path.display()))
        );
        println!(
            "  3. Write the configuration:    {}",
            usage_hint(&format!("build --layers {}", self.path.display()))
        );

        Ok(())
    }
}
