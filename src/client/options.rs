//! Client connection options.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use lirc_client::ClientOptions;
//!
//! let options = ClientOptions::new()
//!     .with_socket_path("/run/lirc/lircd")
//!     .with_reply_timeout(Duration::from_secs(2));
//!
//! assert!(options.validate().is_ok());
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Socket path the daemon listens on by default.
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/lirc/lircd";

/// Default number of events buffered between the reader and the listener.
pub const DEFAULT_EVENT_CAPACITY: usize = 1;

// ============================================================================
// ClientOptions
// ============================================================================

/// Connection and command settings for a [`Client`](super::Client).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Path of the daemon's Unix socket.
    pub socket_path: PathBuf,

    /// How long to wait for a reply. `None` waits forever.
    pub reply_timeout: Option<Duration>,

    /// Events buffered before the reader waits for the listener. At least 1.
    pub event_capacity: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            reply_timeout: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ClientOptions {
    /// Creates options with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the socket path.
    #[inline]
    #[must_use]
    pub fn with_socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.socket_path = path.into();
        self
    }

    /// Sets the reply timeout.
    #[inline]
    #[must_use]
    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = Some(timeout);
        self
    }

    /// Waits for replies without a limit.
    #[inline]
    #[must_use]
    pub fn without_reply_timeout(mut self) -> Self {
        self.reply_timeout = None;
        self
    }

    /// Sets the event buffer size.
    #[inline]
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ClientOptions {
    /// Checks the options for values the client cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the socket path is empty, the event
    /// capacity is zero, or the reply timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.socket_path.as_os_str().is_empty() {
            return Err(Error::config("socket path is empty"));
        }

        if self.event_capacity == 0 {
            return Err(Error::config("event capacity must be at least 1"));
        }

        if self.reply_timeout.is_some_and(|t| t.is_zero()) {
            return Err(Error::config(
                "reply timeout must be positive; use without_reply_timeout() to wait forever",
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ClientOptions::new();

        assert_eq!(options.socket_path, PathBuf::from("/var/run/lirc/lircd"));
        assert_eq!(options.reply_timeout, None);
        assert_eq!(options.event_capacity, 1);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let options = ClientOptions::new()
            .with_socket_path("/tmp/lircd")
            .with_reply_timeout(Duration::from_millis(250))
            .with_event_capacity(16);

        assert_eq!(options.socket_path, PathBuf::from("/tmp/lircd"));
        assert_eq!(options.reply_timeout, Some(Duration::from_millis(250)));
        assert_eq!(options.event_capacity, 16);

        let options = options.without_reply_timeout();
        assert_eq!(options.reply_timeout, None);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = ClientOptions::new().with_event_capacity(0).validate().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_empty_path_rejected() {
        let err = ClientOptions::new().with_socket_path("").validate().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = ClientOptions::new()
            .with_reply_timeout(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
