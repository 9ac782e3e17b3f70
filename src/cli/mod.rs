//! CLI command handlers for hyperforge.
//!
//! This module provides headless, scriptable access to the compiler
//! for automation, testing, and CI integration.

pub mod build;
pub mod common;
pub mod config;
pub mod init;
pub mod inspect;
pub mod validate;

// Re-export types used by main.rs and tests
pub use build::BuildArgs;
pub use common::{CliError, CliResult};
pub use config::ConfigArgs;
pub use init::InitArgs;
pub use inspect::InspectArgs;
pub use validate::ValidateArgs;

/// Formats a command example with the binary name.
pub(crate) fn usage_hint(args: &str) -> String {
    format!("{} {args}", crate::constants::APP_BINARY_NAME)
}
