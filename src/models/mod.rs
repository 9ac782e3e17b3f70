//! Data models for the chord tree and its actions.
//!
//! This module contains the core data structures used throughout the
//! application. Models are independent of parsing and rule generation.

pub mod action;
pub mod document;
pub mod key;
pub mod node;

// Re-export all model types
pub use action::{shell_single_quote, Action, KeyOutput, ShellCommand};
pub use document::{HyperBinding, LayerDocument};
pub use key::{dedup_modifiers, KeySymbol, Modifier};
pub use node::{Binding, LayerSet, Node, SubLayer};
