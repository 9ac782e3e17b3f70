//! Engine-variable naming and condition construction.
//!
//! The variable state lives inside the remapping engine at runtime; the
//! compiler never holds a flag value. This module only names flags and
//! builds the condition / assignment payloads that make the engine hold
//! them: a flag is armed strictly on the press of its owning key while
//! its prerequisite flag is already armed, and disarmed on release of
//! that same key regardless of what fired in between.

use crate::constants::HYPER_VARIABLE;
use crate::karabiner::{Condition, ToEvent};
use crate::models::KeySymbol;

/// Derives the engine-variable name for a group key's sub-layer flag.
///
/// Deterministic and injective for distinct key codes: the key code is
/// embedded verbatim (e.g. "o" → "hyper_sublayer_o").
#[must_use]
pub fn sublayer_variable_name(group: &KeySymbol) -> String {
    format!("{HYPER_VARIABLE}_sublayer_{group}")
}

/// Condition: the named flag is armed.
#[must_use]
pub fn armed(name: &str) -> Condition {
    Condition::variable_if(name, 1)
}

/// Condition: the named flag is idle.
#[must_use]
pub fn idle(name: &str) -> Condition {
    Condition::variable_if(name, 0)
}

/// Output event that arms the named flag.
#[must_use]
pub fn arm(name: &str) -> ToEvent {
    ToEvent::set_variable(name, 1)
}

/// Output event that disarms the named flag.
#[must_use]
pub fn disarm(name: &str) -> ToEvent {
    ToEvent::set_variable(name, 0)
}
