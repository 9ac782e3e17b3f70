//! Layer-document parsing.
//!
//! The input format is JSON5 so authors can comment out bindings and
//! leave trailing commas. A node is a leaf when it carries one of the
//! reserved action tags (`app`, `open`, `shell`, `window`, `key`, `to`);
//! any other object is a nested sub-layer. The discriminator is this
//! explicit tag set, never field sniffing, so a leaf can never be
//! mistaken for a one-deeper layer.

mod raw;

use crate::compiler::report::{CompileError, CompileErrorKind};
use crate::models::{Action, HyperBinding, KeySymbol, LayerDocument, LayerSet, Modifier, Node, SubLayer};
use anyhow::{Context, Result};
use raw::RawNode;
use std::path::Path;

/// Tags that mark an object as an action leaf.
const ACTION_TAGS: &[&str] = &["app", "open", "shell", "window", "key", "to"];

/// Tags permitted alongside the primary action tags.
const AUXILIARY_TAGS: &[&str] = &["modifiers", "description"];

/// Top-level document sections.
const DOCUMENT_SECTIONS: &[&str] = &["profile", "hyper", "extra", "layers"];

/// Parses a layer document from a file.
pub fn parse_layer_file(path: &Path) -> Result<LayerDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layer file: {}", path.display()))?;

    parse_layer_str(&content)
        .with_context(|| format!("Failed to parse layer file: {}", path.display()))
}

/// Parses a layer document from a string.
///
/// All structural problems surface as [`CompileError`] so callers can
/// report the machine-readable kind; JSON5 syntax errors map to
/// [`CompileErrorKind::InvalidDocument`].
pub fn parse_layer_str(input: &str) -> Result<LayerDocument, CompileError> {
    let raw: RawNode = json5::from_str(input).map_err(|e| {
        CompileError::new(CompileErrorKind::InvalidDocument, format!("JSON5 syntax error: {e}"))
    })?;

    let sections = raw.as_map().ok_or_else(|| {
        CompileError::new(
            CompileErrorKind::InvalidDocument,
            "the document root must be an object",
        )
    })?;

    let mut document = LayerDocument::default();
    let mut seen: Vec<&str> = Vec::new();

    for (section, value) in sections {
        if seen.contains(&section.as_str()) {
            return Err(CompileError::new(
                CompileErrorKind::InvalidDocument,
                format!("the '{section}' section appears more than once"),
            ));
        }
        seen.push(section.as_str());

        match section.as_str() {
            "profile" => {
                document.profile = Some(expect_string(value, "profile")?);
            }
            "hyper" => {
                document.hyper = convert_hyper(value)?;
            }
            "extra" => {
                document.extra_rules = convert_extra(value)?;
            }
            "layers" => {
                document.layers = convert_layer_set(value)?;
            }
            other => {
                return Err(CompileError::new(
                    CompileErrorKind::InvalidDocument,
                    format!("unknown document section '{other}'"),
                )
                .with_suggestion(format!(
                    "Valid sections are: {}",
                    DOCUMENT_SECTIONS.join(", ")
                )));
            }
        }
    }

    Ok(document)
}

/// Converts the `layers` section into the root layer set.
fn convert_layer_set(raw: &RawNode) -> Result<LayerSet, CompileError> {
    let pairs = raw.as_map().ok_or_else(|| {
        CompileError::new(
            CompileErrorKind::InvalidDocument,
            "the 'layers' section must be an object",
        )
    })?;

    let mut layers = LayerSet::new();
    for (key, value) in pairs {
        let node = convert_node(value, key)?;
        layers.bind(KeySymbol::new(key.clone()), node)?;
    }
    Ok(layers)
}

/// Converts one node: an action leaf or a nested sub-layer.
fn convert_node(raw: &RawNode, key: &str) -> Result<Node, CompileError> {
    let Some(pairs) = raw.as_map() else {
        return Err(CompileError::new(
            CompileErrorKind::UnknownActionKind,
            "expected an action object or a nested sub-layer object",
        )
        .with_key(key));
    };

    let has_action_tag = pairs
        .iter()
        .any(|(tag, _)| ACTION_TAGS.contains(&tag.as_str()));

    if has_action_tag {
        Ok(Node::Action(convert_action(pairs, key)?))
    } else {
        let mut layer = SubLayer::new();
        for (leaf_key, value) in pairs {
            let node = convert_node(value, leaf_key).map_err(|e| {
                if e.group.is_some() {
                    e
                } else {
                    e.with_group(key)
                }
            })?;
            layer
                .bind(KeySymbol::new(leaf_key.clone()), node)
                .map_err(|e| e.with_group(key))?;
        }
        Ok(Node::Layer(layer))
    }
}

/// Converts a leaf object into an action.
fn convert_action(pairs: &[(String, RawNode)], key: &str) -> Result<Action, CompileError> {
    for (tag, _) in pairs {
        if !ACTION_TAGS.contains(&tag.as_str()) && !AUXILIARY_TAGS.contains(&tag.as_str()) {
            return Err(CompileError::new(
                CompileErrorKind::UnknownActionKind,
                format!("field '{tag}' cannot appear in an action"),
            )
            .with_key(key)
            .with_suggestion(format!(
                "An action carries one of: {}",
                ACTION_TAGS.join(", ")
            )));
        }
    }

    let primary: Vec<&str> = pairs
        .iter()
        .map(|(tag, _)| tag.as_str())
        .filter(|tag| ACTION_TAGS.contains(tag))
        .collect();

    if primary.len() != 1 {
        return Err(CompileError::new(
            CompileErrorKind::UnknownActionKind,
            format!(
                "an action needs exactly one of {}, found: {}",
                ACTION_TAGS.join("/"),
                primary.join(", ")
            ),
        )
        .with_key(key));
    }

    let field = |name: &str| pairs.iter().find(|(tag, _)| tag == name).map(|(_, v)| v);
    let description = field("description")
        .map(|v| expect_string(v, "description"))
        .transpose()?;

    if description.is_some() && !matches!(primary[0], "shell" | "to") {
        return Err(CompileError::new(
            CompileErrorKind::UnknownActionKind,
            format!("'description' cannot accompany '{}'", primary[0]),
        )
        .with_key(key)
        .with_suggestion("Only 'shell' and 'to' actions take a custom description"));
    }

    if field("modifiers").is_some() && primary[0] != "key" {
        return Err(CompileError::new(
            CompileErrorKind::UnknownActionKind,
            format!("'modifiers' cannot accompany '{}'", primary[0]),
        )
        .with_key(key)
        .with_suggestion("Only 'key' actions take a modifier list"));
    }

    match primary[0] {
        "app" => {
            let name = expect_string(field("app").unwrap(), "app")?;
            Ok(Action::app(name))
        }
        "open" => {
            let target = expect_string(field("open").unwrap(), "open")?;
            Ok(Action::open(target))
        }
        "window" => {
            let action = expect_string(field("window").unwrap(), "window")?;
            Ok(Action::window(action))
        }
        "shell" => {
            let lines = expect_lines(field("shell").unwrap(), key)?;
            let mut action = Action::shell(lines);
            if description.is_some() {
                if let Action::Shell {
                    description: slot, ..
                } = &mut action
                {
                    *slot = description;
                }
            }
            Ok(action)
        }
        "key" => {
            let code = expect_string(field("key").unwrap(), "key")?;
            let modifiers = field("modifiers")
                .map(|v| expect_modifiers(v, key))
                .transpose()?
                .unwrap_or_default();
            Ok(Action::key(KeySymbol::new(code), modifiers))
        }
        "to" => {
            let value = field("to").unwrap().to_value();
            let to = serde_json::from_value(value).map_err(|e| {
                CompileError::new(
                    CompileErrorKind::UnknownActionKind,
                    format!("'to' is not a valid output-event list: {e}"),
                )
                .with_key(key)
            })?;
            Ok(Action::custom(description, to))
        }
        _ => unreachable!("primary tag already validated"),
    }
}

/// Converts the `hyper` section.
fn convert_hyper(raw: &RawNode) -> Result<HyperBinding, CompileError> {
    let pairs = raw.as_map().ok_or_else(|| {
        CompileError::new(
            CompileErrorKind::InvalidDocument,
            "the 'hyper' section must be an object",
        )
    })?;

    let mut from = None;
    let mut alone = None;

    for (tag, value) in pairs {
        match tag.as_str() {
            "from" => from = Some(expect_string(value, "hyper.from")?),
            "alone" => {
                let node = convert_node(value, "hyper.alone")?;
                match node {
                    Node::Action(action) => alone = Some(action),
                    Node::Layer(_) => {
                        return Err(CompileError::new(
                            CompileErrorKind::InvalidDocument,
                            "'hyper.alone' must be an action, not a sub-layer",
                        ));
                    }
                }
            }
            other => {
                return Err(CompileError::new(
                    CompileErrorKind::InvalidDocument,
                    format!("unknown field '{other}' in the 'hyper' section"),
                )
                .with_suggestion("Valid fields are: from, alone"));
            }
        }
    }

    let default = HyperBinding::default();
    Ok(HyperBinding {
        from: from.map_or(default.from, KeySymbol::new),
        alone,
    })
}

/// Converts the `extra` section: hand-authored rules, passed through.
fn convert_extra(raw: &RawNode) -> Result<Vec<serde_json::Value>, CompileError> {
    let value = raw.to_value();
    let serde_json::Value::Array(items) = value else {
        return Err(CompileError::new(
            CompileErrorKind::InvalidDocument,
            "the 'extra' section must be an array of rules",
        ));
    };

    for item in &items {
        if !item.is_object() {
            return Err(CompileError::new(
                CompileErrorKind::InvalidDocument,
                "every entry in 'extra' must be a rule object",
            ));
        }
    }

    Ok(items)
}

fn expect_string(raw: &RawNode, what: &str) -> Result<String, CompileError> {
    match raw {
        RawNode::Value(serde_json::Value::String(s)) => Ok(s.clone()),
        _ => Err(CompileError::new(
            CompileErrorKind::InvalidDocument,
            format!("'{what}' must be a string"),
        )),
    }
}

/// Accepts a single line or an array of lines.
fn expect_lines(raw: &RawNode, key: &str) -> Result<Vec<String>, CompileError> {
    match raw {
        RawNode::Value(serde_json::Value::String(s)) => Ok(vec![s.clone()]),
        RawNode::Value(serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(ToString::to_string).ok_or_else(|| {
                    CompileError::new(
                        CompileErrorKind::UnknownActionKind,
                        "'shell' lines must all be strings",
                    )
                    .with_key(key)
                })
            })
            .collect(),
        _ => Err(CompileError::new(
            CompileErrorKind::UnknownActionKind,
            "'shell' must be a string or an array of strings",
        )
        .with_key(key)),
    }
}

fn expect_modifiers(raw: &RawNode, key: &str) -> Result<Vec<Modifier>, CompileError> {
    let RawNode::Value(serde_json::Value::Array(items)) = raw else {
        return Err(CompileError::new(
            CompileErrorKind::UnknownActionKind,
            "'modifiers' must be an array of modifier names",
        )
        .with_key(key));
    };

    items
        .iter()
        .map(|item| {
            let name = item.as_str().ok_or_else(|| {
                CompileError::new(
                    CompileErrorKind::UnknownActionKind,
                    "'modifiers' entries must be strings",
                )
                .with_key(key)
            })?;
            Modifier::parse(name).ok_or_else(|| {
                CompileError::new(
                    CompileErrorKind::UnknownActionKind,
                    format!("unknown modifier '{name}'"),
                )
                .with_key(key)
            })
        })
        .collect()
}
