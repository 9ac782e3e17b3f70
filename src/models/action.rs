//! Terminal actions bound to chord leaves.
//!
//! An action is opaque to the chord compiler: it only needs the ordered
//! output events an action lowers to, plus an optional description. The
//! factory helpers mirror the conveniences a configuration author reaches
//! for (launch an app, open a URL or deep link, run a shell command, drive
//! a window manager).

use crate::karabiner::ToEvent;
use crate::models::key::{dedup_modifiers, KeySymbol, Modifier};

/// A key press to synthesize when a chord fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutput {
    /// Key code to send
    pub key: KeySymbol,
    /// Modifiers held while sending, deduplicated, first-seen order
    pub modifiers: Vec<Modifier>,
}

impl KeyOutput {
    /// Creates a key output with the given modifiers.
    #[must_use]
    pub fn new(key: KeySymbol, modifiers: Vec<Modifier>) -> Self {
        Self {
            key,
            modifiers: dedup_modifiers(modifiers),
        }
    }
}

/// A shell command built from ordered lines.
///
/// Lines are joined with `\n` when lowered to the engine's
/// `shell_command` payload; the join contract is part of this type so it
/// can be tested independently of shell quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    lines: Vec<String>,
}

impl ShellCommand {
    /// Creates a command from ordered lines.
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Creates a single-line command.
    pub fn single(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }

    /// Returns the ordered command lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Joins the lines into the payload handed to the engine.
    #[must_use]
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

/// An opaque terminal action attached to a chord leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Synthesize a key press
    Key(KeyOutput),
    /// Run a shell command
    Shell {
        /// Description for the generated rule
        description: Option<String>,
        /// The command payload
        command: ShellCommand,
    },
    /// Caller-supplied manipulator fragment, passed through verbatim
    Custom {
        /// Description overriding the default
        description: Option<String>,
        /// Explicit output events
        to: Vec<ToEvent>,
    },
}

impl Action {
    /// Builds an action that launches a named macOS application.
    pub fn app(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        Self::Shell {
            description: Some(format!("Open {name}")),
            command: ShellCommand::single(format!(
                "open -a {}",
                shell_single_quote(&format!("{name}.app"))
            )),
        }
    }

    /// Builds an action that opens a URL, deep link, or file path.
    pub fn open(target: impl AsRef<str>) -> Self {
        let target = target.as_ref();
        Self::Shell {
            description: Some(format!("Open {target}")),
            command: ShellCommand::single(format!("open {}", shell_single_quote(target))),
        }
    }

    /// Builds an action that runs a shell command (ordered lines).
    #[must_use]
    pub fn shell(lines: Vec<String>) -> Self {
        Self::Shell {
            description: None,
            command: ShellCommand::new(lines),
        }
    }

    /// Builds a window-management action via the window manager's
    /// `execute-action` deep link.
    pub fn window(action: impl AsRef<str>) -> Self {
        let action = action.as_ref();
        Self::Shell {
            description: Some(format!("Window: {action}")),
            command: ShellCommand::single(format!(
                "open -g {}",
                shell_single_quote(&format!("rectangle://execute-action?name={action}"))
            )),
        }
    }

    /// Builds a key-output action.
    #[must_use]
    pub fn key(key: KeySymbol, modifiers: Vec<Modifier>) -> Self {
        Self::Key(KeyOutput::new(key, modifiers))
    }

    /// Builds a verbatim manipulator fragment.
    #[must_use]
    pub fn custom(description: Option<String>, to: Vec<ToEvent>) -> Self {
        Self::Custom { description, to }
    }

    /// Returns the explicit description, if the action carries one.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Key(_) => None,
            Self::Shell { description, .. } | Self::Custom { description, .. } => {
                description.as_deref()
            }
        }
    }

    /// Lowers the action into the engine's output-event vocabulary.
    #[must_use]
    pub fn to_events(&self) -> Vec<ToEvent> {
        match self {
            Self::Key(output) => vec![ToEvent::key_with_modifiers(
                output.key.as_str(),
                output.modifiers.iter().map(|m| m.as_str().to_string()),
            )],
            Self::Shell { command, .. } => vec![ToEvent::shell(command.joined())],
            Self::Custom { to, .. } => to.clone(),
        }
    }
}

/// Wraps a string in single quotes for `/bin/sh`, escaping embedded
/// single quotes with the `'\''` idiom.
#[must_use]
pub fn shell_single_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}
