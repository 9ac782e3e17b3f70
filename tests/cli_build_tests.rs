//! End-to-end tests for `hyperforge build`.

use std::fs;
use std::process::Command;

mod fixtures;
use fixtures::*;

/// Path to the hyperforge binary
fn hyperforge_bin() -> &'static str {
    env!("CARGO_BIN_EXE_hyperforge")
}

#[test]
fn test_build_writes_configuration() {
    let (layers_path, temp_dir) = create_temp_layers_file(LAYERS_BASIC);
    let output_path = temp_dir.path().join("karabiner.json");

    let output = Command::new(hyperforge_bin())
        .args([
            "build",
            "--layers",
            layers_path.to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "build should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output_path.exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓"));

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    let rules = document["profiles"][0]["complex_modifications"]["rules"]
        .as_array()
        .unwrap();
    // Hyper definition + one sub-layer rule
    assert_eq!(rules.len(), 2);
}

#[test]
fn test_build_dry_run_writes_nothing() {
    let (layers_path, temp_dir) = create_temp_layers_file(LAYERS_BASIC);
    let output_path = temp_dir.path().join("karabiner.json");

    let output = Command::new(hyperforge_bin())
        .args([
            "build",
            "--layers",
            layers_path.to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
            "--dry-run",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(!output_path.exists(), "--dry-run must not write the file");

    // Stdout carries the whole document.
    let stdout = String::from_utf8_lossy(&output.stdout);
    let document: serde_json::Value =
        serde_json::from_str(&stdout).expect("dry-run output should be the JSON document");
    assert!(document["profiles"].is_array());
}

#[test]
fn test_build_backs_up_existing_output() {
    let (layers_path, temp_dir) = create_temp_layers_file(LAYERS_BASIC);
    let output_path = temp_dir.path().join("karabiner.json");

    for _ in 0..2 {
        let output = Command::new(hyperforge_bin())
            .args([
                "build",
                "--layers",
                layers_path.to_str().unwrap(),
                "--output",
                output_path.to_str().unwrap(),
            ])
            .output()
            .expect("Failed to execute command");
        assert_eq!(output.status.code(), Some(0));
    }

    let backups: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".bak"))
        .collect();
    assert_eq!(backups.len(), 1, "second build should back up the first");
}

#[test]
fn test_build_no_backup_flag() {
    let (layers_path, temp_dir) = create_temp_layers_file(LAYERS_BASIC);
    let output_path = temp_dir.path().join("karabiner.json");

    for _ in 0..2 {
        let output = Command::new(hyperforge_bin())
            .args([
                "build",
                "--layers",
                layers_path.to_str().unwrap(),
                "--output",
                output_path.to_str().unwrap(),
                "--no-backup",
            ])
            .output()
            .expect("Failed to execute command");
        assert_eq!(output.status.code(), Some(0));
    }

    let backups: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".bak"))
        .collect();
    assert!(backups.is_empty());
}

#[test]
fn test_build_invalid_document_writes_nothing() {
    let (layers_path, temp_dir) = create_temp_layers_file(LAYERS_DUPLICATE_GROUP);
    let output_path = temp_dir.path().join("karabiner.json");

    let output = Command::new(hyperforge_bin())
        .args([
            "build",
            "--layers",
            layers_path.to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(!output_path.exists(), "no partial output may be written");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Duplicate Group Key") || stderr.contains("bound more than once"));
}

#[test]
fn test_build_failure_leaves_existing_file_intact() {
    let (layers_path, temp_dir) = create_temp_layers_file(LAYERS_BASIC);
    let output_path = temp_dir.path().join("karabiner.json");

    let output = Command::new(hyperforge_bin())
        .args([
            "build",
            "--layers",
            layers_path.to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));
    let original = fs::read_to_string(&output_path).unwrap();

    // Now break the document and rebuild.
    fs::write(&layers_path, LAYERS_BAD_KEY).unwrap();
    let output = Command::new(hyperforge_bin())
        .args([
            "build",
            "--layers",
            layers_path.to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        fs::read_to_string(&output_path).unwrap(),
        original,
        "a failed build must not touch the existing file"
    );
}

#[test]
fn test_build_profile_override() {
    let (layers_path, temp_dir) = create_temp_layers_file(LAYERS_BASIC);
    let output_path = temp_dir.path().join("karabiner.json");

    let output = Command::new(hyperforge_bin())
        .args([
            "build",
            "--layers",
            layers_path.to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
            "--profile",
            "Laptop",
        ])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(document["profiles"][0]["name"], "Laptop");
}

#[test]
fn test_build_empty_sublayer_warns_but_succeeds() {
    let (layers_path, temp_dir) = create_temp_layers_file("{ layers: { l: {} } }");
    let output_path = temp_dir.path().join("karabiner.json");

    let output = Command::new(hyperforge_bin())
        .args([
            "build",
            "--layers",
            layers_path.to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(output_path.exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("⚠"));
    assert!(stderr.contains("no-op"));
}

#[test]
fn test_build_without_layers_is_usage_error() {
    // No --layers and (in a clean environment) no configured default.
    let temp_dir = tempfile::TempDir::new().unwrap();

    let output = Command::new(hyperforge_bin())
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .env("HOME", temp_dir.path())
        .args(["build"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--layers"));
}
