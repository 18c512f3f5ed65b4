//! Client for the remote-control daemon.
//!
//! This module provides the main entry point for sending commands.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Client`] | Command façade over one daemon connection |
//! | [`ClientBuilder`] | Fluent configuration builder |
//! | [`ClientOptions`] | Socket path, reply timeout, event buffer |
//! | [`parse_duration`] | Hold duration strings such as `"500ms"` |
//!
//! # Example
//!
//! ```no_run
//! use lirc_client::{Client, Result};
//!
//! # async fn example() -> Result<()> {
//! // Events are not needed here; dropping the receiver discards them.
//! let (mut client, _) = Client::builder()
//!     .socket_path("/var/run/lirc/lircd")
//!     .connect()
//!     .await?;
//!
//! client.send_once("tv KEY_POWER").await?;
//! client.send_long_str("tv KEY_VOLUMEUP", "1.5s").await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for client configuration.
pub mod builder;

/// Core client implementation.
pub mod core;

/// Hold duration parsing.
pub mod duration;

/// Connection and command options.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ClientBuilder;
pub use core::Client;
pub use duration::parse_duration;
pub use options::{ClientOptions, DEFAULT_EVENT_CAPACITY, DEFAULT_SOCKET_PATH};
