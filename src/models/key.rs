//! Key symbol and modifier data structures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Karabiner key code (e.g., "o", "semicolon", "grave_accent_and_tilde").
///
/// Opaque to the compiler; validated against the key database before
/// compilation and passed through to generated rules unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeySymbol(String);

impl KeySymbol {
    /// Creates a new key symbol from a key code string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the key code string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for KeySymbol {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// A held modifier key in the Karabiner vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Left command
    LeftCommand,
    /// Left control
    LeftControl,
    /// Left option
    LeftOption,
    /// Left shift
    LeftShift,
    /// Right command
    RightCommand,
    /// Right control
    RightControl,
    /// Right option
    RightOption,
    /// Right shift
    RightShift,
    /// Either command
    Command,
    /// Either control
    Control,
    /// Either option
    Option,
    /// Either shift
    Shift,
    /// The fn key
    Fn,
    /// Caps lock
    CapsLock,
}

impl Modifier {
    /// Returns the Karabiner modifier name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeftCommand => "left_command",
            Self::LeftControl => "left_control",
            Self::LeftOption => "left_option",
            Self::LeftShift => "left_shift",
            Self::RightCommand => "right_command",
            Self::RightControl => "right_control",
            Self::RightOption => "right_option",
            Self::RightShift => "right_shift",
            Self::Command => "command",
            Self::Control => "control",
            Self::Option => "option",
            Self::Shift => "shift",
            Self::Fn => "fn",
            Self::CapsLock => "caps_lock",
        }
    }

    /// Parses a Karabiner modifier name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "left_command" => Some(Self::LeftCommand),
            "left_control" => Some(Self::LeftControl),
            "left_option" => Some(Self::LeftOption),
            "left_shift" => Some(Self::LeftShift),
            "right_command" => Some(Self::RightCommand),
            "right_control" => Some(Self::RightControl),
            "right_option" => Some(Self::RightOption),
            "right_shift" => Some(Self::RightShift),
            "command" => Some(Self::Command),
            "control" => Some(Self::Control),
            "option" => Some(Self::Option),
            "shift" => Some(Self::Shift),
            "fn" => Some(Self::Fn),
            "caps_lock" => Some(Self::CapsLock),
            _ => None,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deduplicates a modifier list while preserving first-seen order.
///
/// Modifier sets are unordered in meaning but the emitted order must be
/// stable for byte-identical output.
#[must_use]
pub fn dedup_modifiers(modifiers: Vec<Modifier>) -> Vec<Modifier> {
    let mut seen = std::collections::HashSet::new();
    modifiers.into_iter().filter(|m| seen.insert(*m)).collect()
}
