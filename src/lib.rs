//! LIRC client - Async client for the infrared remote-control daemon.
//!
//! This library talks to the daemon over its Unix socket: it receives
//! button-press broadcasts and sends transmit commands.
//!
//! # Architecture
//!
//! One socket carries two kinds of traffic:
//!
//! - **Broadcasts**: `"<code> <repeat> <button> <remote>"` lines, sent at any time
//! - **Replies**: `BEGIN` ... `END` blocks answering the last command
//!
//! Key design principles:
//!
//! - A single reader task owns the read half and demultiplexes every line
//! - Events go to an [`EventReceiver`], replies to the waiting command
//! - One command in flight at a time, enforced by `&mut self`
//! - Malformed input is logged and skipped, never fatal
//!
//! # Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use lirc_client::{Client, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let (mut client, mut events) = Client::connect("/var/run/lirc/lircd").await?;
//!
//!     // Transmit a button once, then hold another one
//!     client.send_once("tv KEY_POWER").await?;
//!     client.send_long("tv KEY_VOLUMEUP", Duration::from_millis(500)).await?;
//!
//!     // Listen for presses
//!     while let Some(event) = events.recv().await {
//!         println!("{} pressed on {}", event.button, event.remote);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Command façade and configuration |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`protocol`] | Events, replies and command lines |
//! | [`transport`] | Socket connection and line demultiplexer |

// ============================================================================
// Modules
// ============================================================================

/// Client façade and configuration.
///
/// Use [`Client::builder()`] to create a configured client.
pub mod client;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Daemon protocol message types.
pub mod protocol;

/// Socket transport layer.
///
/// Connection management and the line demultiplexer.
pub mod transport;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

// Client types
pub use client::{
    Client, ClientBuilder, ClientOptions, DEFAULT_EVENT_CAPACITY, DEFAULT_SOCKET_PATH,
    parse_duration,
};

// Error types
pub use error::{Error, Result};

// Protocol types
pub use protocol::{BroadcastError, Command, CommandReply, RemoteEvent};

// Transport types
pub use transport::{Connection, Demultiplexer, EventReceiver, Message, Phase};
