//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Some fixtures reserved for future tests

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A minimal document: one sub-layer, one chord.
pub const LAYERS_BASIC: &str = r#"{
  layers: {
    o: {
      n: { app: "Notion" },
    },
  },
}"#;

/// A fuller document exercising every leaf kind, a self-leaf, a root
/// binding, pass-through rules, and an explicit hyper section.
pub const LAYERS_FULL: &str = r#"{
  profile: "Test",
  hyper: {
    from: "caps_lock",
    alone: { key: "escape" },
  },
  extra: [
    {
      description: "F6 -> Single monitor chat setup",
      manipulators: [
        {
          type: "basic",
          from: { key_code: "f6" },
          to: [{ shell_command: "open 'raycast://customWindowManagementCommand?&name=chat'" }],
        },
      ],
    },
  ],
  layers: {
    spacebar: { open: "raycast://extensions/todo" },
    o: {
      n: { app: "Notion" },
      o: { app: "Finder" },
      h: { open: "https://github.com" },
    },
    w: {
      semicolon: { description: "Window: Hide", to: [{ key_code: "h", modifiers: ["right_command"] }] },
      h: { window: "left-half" },
      l: { window: "right-half" },
    },
    v: {
      h: { key: "left_arrow" },
      j: { key: "down_arrow" },
    },
  },
}"#;

/// A document with an unknown key symbol.
pub const LAYERS_BAD_KEY: &str = r#"{
  layers: {
    o: {
      leftarrow: { key: "n" },
    },
  },
}"#;

/// A document with a duplicated group key.
pub const LAYERS_DUPLICATE_GROUP: &str = r#"{
  layers: {
    o: { n: { app: "Notion" } },
    o: { m: { app: "Mail" } },
  },
}"#;

/// Writes a layer document into a fresh temp dir.
///
/// Returns the file path and the temp dir guard (keep it alive for the
/// duration of the test).
pub fn create_temp_layers_file(content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("layers.json5");
    fs::write(&path, content).expect("Failed to write layers file");
    (path, temp_dir)
}
