//! Command reply type.
//!
//! A reply is framed by `BEGIN`/`END` and answers exactly one command.
//!
//! # Format
//!
//! Full form:
//!
//! ```text
//! BEGIN
//! SEND_ONCE tv KEY_UP
//! ERROR
//! DATA
//! 1
//! unknown button
//! END
//! ```
//!
//! Abbreviated form (implicit success, no data):
//!
//! ```text
//! BEGIN
//! SEND_ONCE tv KEY_UP
//! END
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// CommandReply
// ============================================================================

/// A completed reply to one command.
///
/// Built line by line by the demultiplexer and handed over only once it is
/// complete. `data.len()` always equals `data_length`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandReply {
    /// Command text echoed by the daemon.
    pub command: String,

    /// `true` for `SUCCESS` (or the abbreviated form), `false` for `ERROR`.
    pub success: bool,

    /// Number of data lines the daemon announced.
    pub data_length: usize,

    /// Data lines in arrival order.
    pub data: Vec<String>,
}

impl CommandReply {
    /// Creates an empty, unsuccessful reply for `command`.
    #[inline]
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    /// Returns the data lines joined with a single space.
    #[must_use]
    pub fn message(&self) -> String {
        self.data.join(" ")
    }

    /// Converts the reply into a result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandFailed`] carrying the joined data lines if the
    /// daemon reported `ERROR`.
    pub fn into_result(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Error::command_failed(&self.command, self.message()))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reply_is_unsuccessful_and_empty() {
        let reply = CommandReply::new("VERSION");

        assert_eq!(reply.command, "VERSION");
        assert!(!reply.success);
        assert_eq!(reply.data_length, 0);
        assert!(reply.data.is_empty());
    }

    #[test]
    fn test_into_result_success() {
        let reply = CommandReply {
            command: "VERSION".into(),
            success: true,
            data_length: 1,
            data: vec!["0.10.1".into()],
        };

        let reply = reply.into_result().expect("success");
        assert_eq!(reply.data, vec!["0.10.1"]);
    }

    #[test]
    fn test_into_result_error_joins_data() {
        let reply = CommandReply {
            command: "SEND_ONCE tv KEY_NOPE".into(),
            success: false,
            data_length: 2,
            data: vec!["unknown".into(), "button".into()],
        };

        let err = reply.into_result().unwrap_err();
        match err {
            Error::CommandFailed { command, message } => {
                assert_eq!(command, "SEND_ONCE tv KEY_NOPE");
                assert_eq!(message, "unknown button");
            }
            other => panic!("Expected CommandFailed, got {other:?}"),
        }
    }
}
