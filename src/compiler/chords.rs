//! The chord compiler.
//!
//! Walks the root layer set and produces, for every group key, one
//! arming rule (press the group key while hyper is held) and one firing
//! rule per leaf (press a leaf key while the group flag is armed). The
//! generated conditions chain the flags so that rule matching follows
//! physical key ordering: a group flag can only be observed armed while
//! hyper is armed, and a firing rule can only match while its own
//! group's flag is armed.

use crate::compiler::report::{CompileError, CompileErrorKind, CompileWarning};
use crate::compiler::variables::{arm, armed, disarm, idle, sublayer_variable_name};
use crate::karabiner::{Condition, FromEvent, Manipulator, ToEvent};
use crate::models::{Action, KeySymbol, LayerSet, Node};
use std::collections::HashMap;

/// One compiled rule, before serialization into the engine schema.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRule {
    /// Human-readable description
    pub description: String,
    /// Owning group key; None for root-level `Hyper + key` rules
    pub group: Option<KeySymbol>,
    /// Triggering event
    pub from: FromEvent,
    /// Output events on key down
    pub to: Vec<ToEvent>,
    /// Fallback events when the key is tapped alone
    pub to_if_alone: Vec<ToEvent>,
    /// Release hook, fired unconditionally on key up
    pub to_after_key_up: Vec<ToEvent>,
    /// Ordered variable conditions
    pub conditions: Vec<Condition>,
}

impl GeneratedRule {
    /// Lowers this rule into an engine manipulator.
    #[must_use]
    pub fn into_manipulator(self) -> Manipulator {
        let mut manipulator = Manipulator::basic(self.from);
        manipulator.description = Some(self.description);
        manipulator.to = self.to;
        manipulator.to_if_alone = self.to_if_alone;
        manipulator.to_after_key_up = self.to_after_key_up;
        manipulator.conditions = self.conditions;
        manipulator
    }
}

/// The compiler's output: rules in emission order plus collected
/// warnings. Fatal errors never produce an output value.
#[derive(Debug, Clone, Default)]
pub struct CompileOutput {
    /// Generated rules, in input order
    pub rules: Vec<GeneratedRule>,
    /// Non-fatal findings
    pub warnings: Vec<CompileWarning>,
}

/// Compiles the root layer set against the given hyper flag name.
///
/// Deterministic: the same input always yields the same output, in the
/// iteration order of the input. The hyper flag itself is armed by an
/// independently authored rule (see the emitter); this function only
/// assumes its name.
pub fn compile(layers: &LayerSet, hyper_variable: &str) -> Result<CompileOutput, CompileError> {
    let groups = collect_groups(layers)?;
    let mut output = CompileOutput::default();

    for binding in layers.bindings() {
        match &binding.node {
            Node::Layer(sub) => {
                compile_group(&mut output, &groups, hyper_variable, &binding.key, sub)?;
            }
            Node::Action(action) => {
                output
                    .rules
                    .push(root_rule(&groups, hyper_variable, &binding.key, action));
            }
        }
    }

    Ok(output)
}

/// Collects every group key with its flag name, rejecting collisions.
fn collect_groups(layers: &LayerSet) -> Result<Vec<(KeySymbol, String)>, CompileError> {
    let mut seen: HashMap<String, KeySymbol> = HashMap::new();
    let mut groups = Vec::new();

    for binding in layers.bindings() {
        if let Node::Layer(_) = &binding.node {
            let flag = sublayer_variable_name(&binding.key);
            if let Some(existing) = seen.get(&flag) {
                return Err(CompileError::new(
                    CompileErrorKind::FlagNameCollision,
                    format!(
                        "group keys '{existing}' and '{}' both normalize to flag '{flag}'",
                        binding.key
                    ),
                )
                .with_key(binding.key.as_str()));
            }
            seen.insert(flag.clone(), binding.key.clone());
            groups.push((binding.key.clone(), flag));
        }
    }

    Ok(groups)
}

/// Compiles one sub-layer group: the arming rule, then firing rules.
fn compile_group(
    output: &mut CompileOutput,
    groups: &[(KeySymbol, String)],
    hyper_variable: &str,
    group: &KeySymbol,
    sub: &crate::models::SubLayer,
) -> Result<(), CompileError> {
    let flag = sublayer_variable_name(group);

    // The arming rule must not race a firing rule of another, already
    // armed sub-layer that binds this group key as a leaf. Requiring
    // every other group flag to be idle pins resolution to the active
    // sub-layer.
    let mut conditions: Vec<Condition> = groups
        .iter()
        .filter(|(other, _)| other != group)
        .map(|(_, other_flag)| idle(other_flag))
        .collect();
    conditions.push(armed(hyper_variable));

    // A leaf bound to the group's own key becomes the tap-alone
    // fallback of the arming rule rather than a competing firing rule.
    let alone = match sub.get(group) {
        Some(Node::Action(action)) => Some(action),
        Some(Node::Layer(_)) => {
            return Err(CompileError::new(
                CompileErrorKind::NestedTooDeep,
                format!("key '{group}' binds a sub-layer inside sub-layer '{group}'"),
            )
            .with_group(group.as_str())
            .with_key(group.as_str()));
        }
        None => None,
    };

    output.rules.push(GeneratedRule {
        description: format!("Toggle Hyper sublayer {group}"),
        group: Some(group.clone()),
        from: FromEvent::key_with_any_modifiers(group.as_str()),
        to: vec![arm(&flag)],
        to_if_alone: alone.map(Action::to_events).unwrap_or_default(),
        to_after_key_up: vec![disarm(&flag)],
        conditions,
    });

    let mut fired = 0usize;
    for leaf in sub.bindings() {
        if &leaf.key == group {
            continue;
        }

        let action = match &leaf.node {
            Node::Action(action) => action,
            Node::Layer(_) => {
                return Err(CompileError::new(
                    CompileErrorKind::NestedTooDeep,
                    format!(
                        "key '{}' binds a sub-layer inside sub-layer '{group}'; chords are \
                         modifier + group + leaf",
                        leaf.key
                    ),
                )
                .with_group(group.as_str())
                .with_key(leaf.key.as_str()));
            }
        };

        output.rules.push(GeneratedRule {
            description: action
                .description()
                .map_or_else(|| format!("Hyper + {group} + {}", leaf.key), ToString::to_string),
            group: Some(group.clone()),
            from: FromEvent::key_with_any_modifiers(leaf.key.as_str()),
            to: action.to_events(),
            to_if_alone: Vec::new(),
            to_after_key_up: Vec::new(),
            conditions: vec![armed(hyper_variable), armed(&flag)],
        });
        fired += 1;
    }

    if fired == 0 && alone.is_none() {
        output.warnings.push(CompileWarning::new(format!(
            "sub-layer '{group}' has no bindings and no tap-alone action; it compiles to a \
             no-op arming rule"
        )));
    }

    Ok(())
}

/// Compiles a root-level action binding into a plain `Hyper + key` rule.
fn root_rule(
    groups: &[(KeySymbol, String)],
    hyper_variable: &str,
    key: &KeySymbol,
    action: &Action,
) -> GeneratedRule {
    let mut conditions: Vec<Condition> =
        groups.iter().map(|(_, flag)| idle(flag)).collect();
    conditions.push(armed(hyper_variable));

    GeneratedRule {
        description: action
            .description()
            .map_or_else(|| format!("Hyper + {key}"), ToString::to_string),
        group: None,
        from: FromEvent::key_with_any_modifiers(key.as_str()),
        to: action.to_events(),
        to_if_alone: Vec::new(),
        to_after_key_up: Vec::new(),
        conditions,
    }
}
