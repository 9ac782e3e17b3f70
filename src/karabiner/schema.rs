//! Serde model of the Karabiner-Elements declarative rule format.
//!
//! Only the subset of the schema that compiled rules use is typed here.
//! Hand-authored pass-through rules travel as raw JSON values and are not
//! validated against this model.

use serde::{Deserialize, Serialize};

/// Top-level `karabiner.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KarabinerConfig {
    /// Global engine settings
    pub global: GlobalSettings,
    /// Configuration profiles (hyperforge writes exactly one)
    pub profiles: Vec<Profile>,
}

/// Global engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Whether the engine shows its icon in the macOS menu bar
    pub show_in_menu_bar: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            show_in_menu_bar: true,
        }
    }
}

/// A named configuration profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile display name
    pub name: String,
    /// The complex-modification rule list
    pub complex_modifications: ComplexModifications,
}

/// Container for the ordered rule list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexModifications {
    /// Rules, evaluated by the engine in list order
    pub rules: Vec<RuleEntry>,
}

/// A rule slot: either a rule built by the compiler or a hand-authored
/// rule passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleEntry {
    /// Compiler-built rule
    Rule(Rule),
    /// Verbatim pass-through JSON
    Raw(serde_json::Value),
}

/// One rule: a description plus its manipulators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Human-readable rule description
    pub description: String,
    /// Manipulators, matched by the engine in list order
    pub manipulators: Vec<Manipulator>,
}

/// A single key manipulator.
///
/// Field order matters only for diff-friendly output; serde serializes
/// fields in declaration order, so keep this stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manipulator {
    /// Manipulator type; always "basic" for compiled rules
    #[serde(rename = "type")]
    pub kind: String,
    /// Optional per-manipulator description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The physical event that triggers this manipulator
    pub from: FromEvent,
    /// Output events on key down
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<ToEvent>,
    /// Output events when the key is tapped alone
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_if_alone: Vec<ToEvent>,
    /// Output events on key up, fired unconditionally
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_after_key_up: Vec<ToEvent>,
    /// Conditions that must all hold for the manipulator to match
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl Manipulator {
    /// Creates an empty basic manipulator for the given trigger.
    #[must_use]
    pub fn basic(from: FromEvent) -> Self {
        Self {
            kind: "basic".to_string(),
            description: None,
            from,
            to: Vec::new(),
            to_if_alone: Vec::new(),
            to_after_key_up: Vec::new(),
            conditions: Vec::new(),
        }
    }
}

/// The triggering physical event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FromEvent {
    /// Karabiner key code of the physical key
    pub key_code: String,
    /// Modifier matching constraints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<FromModifiers>,
}

impl FromEvent {
    /// A trigger on a bare key with no modifier constraints.
    #[must_use]
    pub fn key(key_code: impl Into<String>) -> Self {
        Self {
            key_code: key_code.into(),
            modifiers: None,
        }
    }

    /// A trigger that matches regardless of which modifiers are held.
    ///
    /// Chord rules use this so the chord still fires when the user is
    /// sloppy about releasing other modifiers.
    #[must_use]
    pub fn key_with_any_modifiers(key_code: impl Into<String>) -> Self {
        Self {
            key_code: key_code.into(),
            modifiers: Some(FromModifiers {
                mandatory: Vec::new(),
                optional: vec!["any".to_string()],
            }),
        }
    }
}

/// Modifier constraints on a [`FromEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromModifiers {
    /// Modifiers that must be held
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mandatory: Vec<String>,
    /// Modifiers that may be held
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<String>,
}

/// One output event.
///
/// Exactly one of `key_code`, `shell_command`, or `set_variable` is set;
/// the constructors below maintain that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ToEvent {
    /// Key code to synthesize
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_code: Option<String>,
    /// Modifiers held while synthesizing `key_code`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
    /// Shell command to run via the engine's `/bin/sh -c`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell_command: Option<String>,
    /// Engine variable assignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_variable: Option<SetVariable>,
}

impl ToEvent {
    /// A key-synthesis output.
    #[must_use]
    pub fn key(key_code: impl Into<String>) -> Self {
        Self {
            key_code: Some(key_code.into()),
            ..Self::default()
        }
    }

    /// A key-synthesis output with held modifiers.
    #[must_use]
    pub fn key_with_modifiers(
        key_code: impl Into<String>,
        modifiers: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            key_code: Some(key_code.into()),
            modifiers: modifiers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// A shell-command output.
    #[must_use]
    pub fn shell(command: impl Into<String>) -> Self {
        Self {
            shell_command: Some(command.into()),
            ..Self::default()
        }
    }

    /// A variable-assignment output.
    #[must_use]
    pub fn set_variable(name: impl Into<String>, value: i64) -> Self {
        Self {
            set_variable: Some(SetVariable {
                name: name.into(),
                value,
            }),
            ..Self::default()
        }
    }
}

/// Engine variable assignment payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetVariable {
    /// Variable name
    pub name: String,
    /// Value to store (0 or 1 for flags)
    pub value: i64,
}

/// A `variable_if` condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Condition type; always "variable_if" for compiled rules
    #[serde(rename = "type")]
    pub kind: String,
    /// Variable name to test
    pub name: String,
    /// Required value
    pub value: i64,
}

impl Condition {
    /// A condition requiring `name == value`.
    #[must_use]
    pub fn variable_if(name: impl Into<String>, value: i64) -> Self {
        Self {
            kind: "variable_if".to_string(),
            name: name.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_event_serialization_omits_absent_fields() {
        let event = ToEvent::key("h");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json, serde_json::json!({ "key_code": "h" }));
    }

    #[test]
    fn test_set_variable_serialization() {
        let event = ToEvent::set_variable("hyper_sublayer_o", 1);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "set_variable": { "name": "hyper_sublayer_o", "value": 1 } })
        );
    }

    #[test]
    fn test_condition_serialization() {
        let cond = Condition::variable_if("hyper", 1);
        let json = serde_json::to_value(&cond).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "variable_if", "name": "hyper", "value": 1 })
        );
    }

    #[test]
    fn test_manipulator_skips_empty_collections() {
        let m = Manipulator::basic(FromEvent::key("o"));
        let json = serde_json::to_value(&m).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("type"));
        assert!(obj.contains_key("from"));
        assert!(!obj.contains_key("to"));
        assert!(!obj.contains_key("to_if_alone"));
        assert!(!obj.contains_key("conditions"));
    }

    #[test]
    fn test_from_event_any_optional_modifiers() {
        let from = FromEvent::key_with_any_modifiers("o");
        let json = serde_json::to_value(&from).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "key_code": "o", "modifiers": { "optional": ["any"] } })
        );
    }

    #[test]
    fn test_rule_entry_raw_passthrough() {
        let raw = serde_json::json!({ "description": "F6 -> chat setup", "manipulators": [] });
        let entry = RuleEntry::Raw(raw.clone());
        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
    }
}
