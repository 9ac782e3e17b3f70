//! Flattens compiled rules into the engine's configuration document.
//!
//! Rule order in the output: the hyper-key definition, then the
//! document's hand-authored pass-through rules, then one rule per
//! sub-layer (arming manipulator first, firing manipulators after) and
//! per root binding, all in input order. Writing is atomic, with an
//! optional timestamped backup of the file being replaced.

use crate::compiler::{CompileOutput, GeneratedRule};
use crate::constants::HYPER_VARIABLE;
use crate::karabiner::schema::{
    ComplexModifications, FromEvent, GlobalSettings, KarabinerConfig, Manipulator, Profile, Rule,
    RuleEntry, ToEvent,
};
use crate::models::{Action, HyperBinding, LayerDocument};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Document-level emission settings, resolved by the caller from the
/// app config and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitSettings {
    /// Profile name (the document's `profile` section wins over this)
    pub profile_name: String,
    /// Engine menu-bar icon flag
    pub show_in_menu_bar: bool,
}

impl Default for EmitSettings {
    fn default() -> Self {
        Self {
            profile_name: "Default".to_string(),
            show_in_menu_bar: true,
        }
    }
}

/// Assembles the full engine configuration document.
#[must_use]
pub fn emit_document(
    document: &LayerDocument,
    output: &CompileOutput,
    settings: &EmitSettings,
) -> KarabinerConfig {
    let mut rules: Vec<RuleEntry> = Vec::new();

    rules.push(RuleEntry::Rule(hyper_rule(&document.hyper)));
    rules.extend(document.extra_rules.iter().cloned().map(RuleEntry::Raw));
    rules.extend(group_rules(&output.rules).into_iter().map(RuleEntry::Rule));

    let profile_name = document
        .profile
        .clone()
        .unwrap_or_else(|| settings.profile_name.clone());

    KarabinerConfig {
        global: GlobalSettings {
            show_in_menu_bar: settings.show_in_menu_bar,
        },
        profiles: vec![Profile {
            name: profile_name,
            complex_modifications: ComplexModifications { rules },
        }],
    }
}

/// Builds the independently authored hyper-key definition rule: the
/// physical key arms the hyper flag on press, clears it after key up,
/// and optionally acts when tapped alone.
fn hyper_rule(hyper: &HyperBinding) -> Rule {
    let mut manipulator = Manipulator::basic(FromEvent::key_with_any_modifiers(
        hyper.from.as_str(),
    ));
    manipulator.description = Some(format!("{} -> Hyper Key", hyper.from));
    manipulator.to = vec![ToEvent::set_variable(HYPER_VARIABLE, 1)];
    manipulator.to_after_key_up = vec![ToEvent::set_variable(HYPER_VARIABLE, 0)];
    manipulator.to_if_alone = hyper.alone.as_ref().map(Action::to_events).unwrap_or_default();

    Rule {
        description: format!("{} -> Hyper Key", hyper.from),
        manipulators: vec![manipulator],
    }
}

/// Groups generated rules into one engine rule per sub-layer and one
/// per root binding, preserving order.
fn group_rules(rules: &[GeneratedRule]) -> Vec<Rule> {
    let mut grouped: Vec<Rule> = Vec::new();
    let mut current_group: Option<String> = None;

    for rule in rules {
        match &rule.group {
            Some(group) => {
                let group = group.as_str().to_string();
                if current_group.as_deref() == Some(group.as_str()) {
                    grouped
                        .last_mut()
                        .expect("a rule opened this group")
                        .manipulators
                        .push(rule.clone().into_manipulator());
                } else {
                    current_group = Some(group.clone());
                    grouped.push(Rule {
                        description: format!("Hyper Key sublayer \"{group}\""),
                        manipulators: vec![rule.clone().into_manipulator()],
                    });
                }
            }
            None => {
                current_group = None;
                grouped.push(Rule {
                    description: format!("Hyper Key + {}", rule.from.key_code),
                    manipulators: vec![rule.clone().into_manipulator()],
                });
            }
        }
    }

    grouped
}

/// Renders the configuration as pretty-printed JSON.
///
/// Two-space indentation, stable field order, trailing newline: running
/// the compiler twice on the same input yields byte-identical files.
pub fn render(config: &KarabinerConfig) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;
    json.push('\n');
    Ok(json)
}

/// Writes the configuration to `path` atomically.
///
/// When `backup` is set and the target exists, the old file is first
/// copied to a timestamped `.bak` sibling; the backup path is returned.
pub fn write_config(
    path: &Path,
    config: &KarabinerConfig,
    backup: bool,
) -> Result<Option<PathBuf>> {
    let content = render(config)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    let backup_path = if backup && path.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let backup_path = path.with_extension(format!("json.{stamp}.bak"));
        std::fs::copy(path, &backup_path).with_context(|| {
            format!("Failed to back up existing file to: {}", backup_path.display())
        })?;
        Some(backup_path)
    } else {
        None
    };

    // Temp file + rename so the engine never sees a partial document.
    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write temporary file: {}", temp_path.display()))?;
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temporary file to: {}", path.display()))?;

    Ok(backup_path)
}
