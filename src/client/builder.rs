//! Builder pattern for client configuration.
//!
//! Provides a fluent API for configuring and connecting a [`Client`].
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use lirc_client::Client;
//!
//! # async fn example() -> lirc_client::Result<()> {
//! // Events are not needed here; dropping the receiver discards them.
//! let (mut client, _) = Client::builder()
//!     .socket_path("/run/lirc/lircd")
//!     .reply_timeout(Duration::from_secs(2))
//!     .connect()
//!     .await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::transport::EventReceiver;

use super::core::Client;
use super::options::ClientOptions;

// ============================================================================
// ClientBuilder
// ============================================================================

/// Builder for configuring a [`Client`].
///
/// Use [`Client::builder()`] to create a new builder.
#[derive(Debug, Default, Clone)]
pub struct ClientBuilder {
    /// Options collected so far.
    options: ClientOptions,
}

// ============================================================================
// ClientBuilder Implementation
// ============================================================================

impl ClientBuilder {
    /// Creates a builder with default options.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the daemon socket path.
    #[inline]
    #[must_use]
    pub fn socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.socket_path = path.into();
        self
    }

    /// Gives up on a reply after `timeout`.
    #[inline]
    #[must_use]
    pub fn reply_timeout(mut self, timeout: Duration) -> Self {
        self.options.reply_timeout = Some(timeout);
        self
    }

    /// Sets how many events may queue before the reader waits.
    #[inline]
    #[must_use]
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.options.event_capacity = capacity;
        self
    }

    /// Replaces all options at once.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates the options and connects.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`](crate::Error::Config) if the options are invalid
    /// - [`Error::Connect`](crate::Error::Connect) if the socket cannot be opened
    pub async fn connect(self) -> Result<(Client, EventReceiver)> {
        Client::connect_with(self.options).await
    }
}

// ============================================================================
// Tests
// ============================================================================
