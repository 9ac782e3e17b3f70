//! The parsed layer document: everything one input file describes.

use crate::models::action::Action;
use crate::models::key::KeySymbol;
use crate::models::node::LayerSet;

/// The hyper-key binding: which physical key arms the hyper flag and
/// what it does when tapped alone.
///
/// This is the independently authored rule the chord compiler's output
/// depends on; the emitter builds it ahead of the generated rules.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperBinding {
    /// Physical key that arms the hyper flag while held
    pub from: KeySymbol,
    /// Action when the key is tapped alone, if any
    pub alone: Option<Action>,
}

impl Default for HyperBinding {
    fn default() -> Self {
        Self {
            from: KeySymbol::new("caps_lock"),
            alone: Some(Action::key(KeySymbol::new("escape"), Vec::new())),
        }
    }
}

/// A fully parsed layer document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerDocument {
    /// Profile name override; falls back to the app config when absent
    pub profile: Option<String>,
    /// The hyper-key binding
    pub hyper: HyperBinding,
    /// Hand-authored engine rules merged into the output verbatim
    pub extra_rules: Vec<serde_json::Value>,
    /// The root chord tree
    pub layers: LayerSet,
}

impl LayerDocument {
    /// Creates an empty document with the default hyper binding.
    #[must_use]
    pub fn new(layers: LayerSet) -> Self {
        Self {
            profile: None,
            hyper: HyperBinding::default(),
            extra_rules: Vec::new(),
            layers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hyper_binding() {
        let hyper = HyperBinding::default();
        assert_eq!(hyper.from.as_str(), "caps_lock");
        let alone = hyper.alone.expect("default alone action");
        let events = alone.to_events();
        assert_eq!(events[0].key_code.as_deref(), Some("escape"));
    }
}
