//! End-to-end tests for `hyperforge inspect`.

use std::process::Command;

mod fixtures;
use fixtures::*;

/// Path to the hyperforge binary
fn hyperforge_bin() -> &'static str {
    env!("CARGO_BIN_EXE_hyperforge")
}

#[test]
fn test_inspect_human_output() {
    let (layers_path, _temp_dir) = create_temp_layers_file(LAYERS_FULL);

    let output = Command::new(hyperforge_bin())
        .args(["inspect", "--layers", layers_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hyper key: caps_lock"));
    assert!(stdout.contains("o + n → Open Notion"));
    assert!(stdout.contains("w + semicolon → Window: Hide"));
    assert!(stdout.contains("hyper + spacebar →"));
}

#[test]
fn test_inspect_json_output() {
    let (layers_path, _temp_dir) = create_temp_layers_file(LAYERS_FULL);

    let output = Command::new(hyperforge_bin())
        .args([
            "inspect",
            "--layers",
            layers_path.to_str().unwrap(),
            "--json",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(result["hyper_key"], "caps_lock");

    let sublayers = result["sublayers"].as_array().unwrap();
    assert_eq!(sublayers.len(), 3);

    let o_layer = sublayers.iter().find(|s| s["key"] == "o").unwrap();
    // Self-leaf 'o' folds into the arming rule, leaving two chords.
    assert_eq!(o_layer["chords"].as_array().unwrap().len(), 2);
    assert_eq!(o_layer["alone"], true);

    let bindings = result["bindings"].as_array().unwrap();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0]["key"], "spacebar");
}

#[test]
fn test_inspect_invalid_document_fails() {
    let (layers_path, _temp_dir) = create_temp_layers_file(LAYERS_DUPLICATE_GROUP);

    let output = Command::new(hyperforge_bin())
        .args(["inspect", "--layers", layers_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
}
