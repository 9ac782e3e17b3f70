//! The recursive chord tree: sub-layers and the root layer set.
//!
//! The discriminator between "leaf" and "nested layer" is the explicit
//! [`Node`] tag, never field sniffing. Bindings preserve insertion order
//! so compiled output is deterministic and diffable; duplicate keys are
//! rejected at insert rather than silently shadowed.

use crate::compiler::report::{CompileError, CompileErrorKind};
use crate::models::action::Action;
use crate::models::key::KeySymbol;

/// One entry of a mapping: a key bound to a leaf action or a nested layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The key symbol
    pub key: KeySymbol,
    /// What the key is bound to
    pub node: Node,
}

/// A node in the chord tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A terminal action
    Action(Action),
    /// A nested sub-layer
    Layer(SubLayer),
}

/// An insertion-ordered mapping from leaf key to node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubLayer {
    bindings: Vec<Binding>,
}

impl SubLayer {
    /// Creates an empty sub-layer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Binds a key, rejecting duplicates.
    pub fn bind(&mut self, key: KeySymbol, node: Node) -> Result<(), CompileError> {
        if self.get(&key).is_some() {
            return Err(CompileError::new(
                CompileErrorKind::DuplicateLeafKey,
                format!("leaf key '{key}' is bound more than once"),
            )
            .with_key(key.as_str())
            .with_suggestion("Remove or rename one of the bindings"));
        }
        self.bindings.push(Binding { key, node });
        Ok(())
    }

    /// Looks up a binding by key.
    #[must_use]
    pub fn get(&self, key: &KeySymbol) -> Option<&Node> {
        self.bindings
            .iter()
            .find(|b| &b.key == key)
            .map(|b| &b.node)
    }

    /// Returns the bindings in insertion order.
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if the sub-layer has no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// The root collection: group keys bound to sub-layers, plus plain
/// hyper-chord keys bound directly to actions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerSet {
    bindings: Vec<Binding>,
}

impl LayerSet {
    /// Creates an empty layer set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Binds a root key, rejecting duplicates.
    pub fn bind(&mut self, key: KeySymbol, node: Node) -> Result<(), CompileError> {
        if self.get(&key).is_some() {
            return Err(CompileError::new(
                CompileErrorKind::DuplicateGroupKey,
                format!("root key '{key}' is bound more than once"),
            )
            .with_key(key.as_str())
            .with_suggestion("Merge the two definitions or rename one group key"));
        }
        self.bindings.push(Binding { key, node });
        Ok(())
    }

    /// Looks up a binding by key.
    #[must_use]
    pub fn get(&self, key: &KeySymbol) -> Option<&Node> {
        self.bindings
            .iter()
            .find(|b| &b.key == key)
            .map(|b| &b.node)
    }

    /// Returns the bindings in insertion order.
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Returns the number of root bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if no keys are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
