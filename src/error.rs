//! Error types for the LIRC client.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use lirc_client::{Client, Result};
//!
//! async fn example(client: &mut Client) -> Result<()> {
//!     client.send_once("tv KEY_POWER").await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::InvalidDuration`] |
//! | Connection | [`Error::Connect`], [`Error::ConnectionClosed`], [`Error::Io`] |
//! | Command | [`Error::InvalidCommand`], [`Error::CommandFailed`], [`Error::ReplyTimeout`] |
//!
//! Malformed lines from the daemon never show up here. The demultiplexer
//! recovers from them on its own and only logs them.

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::path::PathBuf;
use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when client options are invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Hold duration string could not be parsed.
    #[error("Invalid duration '{input}': {reason}")]
    InvalidDuration {
        /// The string that failed to parse.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// Socket could not be opened.
    #[error("Failed to connect to {}: {source}", path.display())]
    Connect {
        /// Socket path that was dialed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: IoError,
    },

    /// The daemon connection is gone.
    ///
    /// Returned when the stream ended or failed while a reply was expected.
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // Command Errors
    // ========================================================================
    /// Command text cannot be put on the wire.
    #[error("Invalid command: {message}")]
    InvalidCommand {
        /// Description of the problem.
        message: String,
    },

    /// The daemon answered the command with `ERROR`.
    ///
    /// The message is the reply's data lines joined with a space.
    #[error("Command '{command}' failed: {message}")]
    CommandFailed {
        /// Command text echoed by the daemon.
        command: String,
        /// Joined data lines of the reply.
        message: String,
    },

    /// No reply arrived within the configured timeout.
    #[error("No reply to '{command}' after {timeout_ms}ms")]
    ReplyTimeout {
        /// Command that was sent.
        command: String,
        /// Milliseconds waited before giving up.
        timeout_ms: u64,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid duration error.
    #[inline]
    pub fn invalid_duration(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates a connect error.
    #[inline]
    pub fn connect(path: impl Into<PathBuf>, source: IoError) -> Self {
        Self::Connect {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid command error.
    #[inline]
    pub fn invalid_command(message: impl Into<String>) -> Self {
        Self::InvalidCommand {
            message: message.into(),
        }
    }

    /// Creates a command failed error.
    #[inline]
    pub fn command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Creates a reply timeout error.
    #[inline]
    pub fn reply_timeout(command: impl Into<String>, timeout_ms: u64) -> Self {
        Self::ReplyTimeout {
            command: command.into(),
            timeout_ms,
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ReplyTimeout { .. })
    }

    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connect { .. } | Self::ConnectionClosed | Self::Io(_)
        )
    }

    /// Returns `true` if the daemon rejected the command.
    #[inline]
    #[must_use]
    pub fn is_command_error(&self) -> bool {
        matches!(self, Self::CommandFailed { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
