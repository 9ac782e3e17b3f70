//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and well-known file names.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Hyperforge";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "hyperforge";

/// Default file name for the layer document.
pub const DEFAULT_LAYERS_FILE: &str = "layers.json5";

/// Name of the engine-side variable that is 1 while the hyper key is held.
pub const HYPER_VARIABLE: &str = "hyper";
