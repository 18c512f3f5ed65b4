//! Outbound command definitions.
//!
//! Commands are single ASCII lines terminated by `\n`. The verb comes first,
//! the rest of the line is passed through as given.
//!
//! # Commands
//!
//! | Variant | Line |
//! |---------|------|
//! | [`Command::SendOnce`] | `SEND_ONCE <remote> <button>` |
//! | [`Command::SendStart`] | `SEND_START <remote> <button>` |
//! | [`Command::SendStop`] | `SEND_STOP <remote> <button>` |
//! | [`Command::Version`] | `VERSION` |
//! | [`Command::List`] | `LIST [<remote>]` |
//! | [`Command::Raw`] | any text |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use crate::error::{Error, Result};

// ============================================================================
// Command
// ============================================================================

/// A command the daemon understands.
///
/// The `SEND_*` targets are `"<remote> <button>"`. Joining the two is left to
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Transmit a button once.
    SendOnce(String),
    /// Start repeating a button until [`Command::SendStop`].
    SendStart(String),
    /// Stop a repeat started by [`Command::SendStart`].
    SendStop(String),
    /// Ask for the daemon version.
    Version,
    /// List remotes, or the buttons of one remote.
    List(Option<String>),
    /// Arbitrary command text.
    Raw(String),
}

impl Command {
    /// Renders the command and checks that it fits on one line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCommand`] if the text is blank or contains a
    /// line break.
    pub fn to_line(&self) -> Result<String> {
        let line = self.to_string();

        if line.trim().is_empty() {
            return Err(Error::invalid_command("command text is empty"));
        }
        if line.contains(['\n', '\r']) {
            return Err(Error::invalid_command(format!(
                "command contains a line break: {line:?}"
            )));
        }

        Ok(line)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SendOnce(target) => write!(f, "SEND_ONCE {target}"),
            Self::SendStart(target) => write!(f, "SEND_START {target}"),
            Self::SendStop(target) => write!(f, "SEND_STOP {target}"),
            Self::Version => f.write_str("VERSION"),
            Self::List(None) => f.write_str("LIST"),
            Self::List(Some(remote)) => write!(f, "LIST {remote}"),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Command {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_string())
    }
}

impl From<String> for Command {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

// ============================================================================
// Tests
// ============================================================================
