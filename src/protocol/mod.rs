//! Daemon protocol message types.
//!
//! This module defines the messages exchanged with the daemon.
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | `Command` | Client → Daemon | Single command line |
//! | `CommandReply` | Daemon → Client | `BEGIN`/`END` framed answer |
//! | `RemoteEvent` | Daemon → Client | Broadcast button press |
//!
//! The daemon answers at most one command at a time. Replies carry no
//! request id, so a reply belongs to the command sent before it.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Outbound command lines |
//! | `event` | Broadcast events |
//! | `reply` | Command replies |

// ============================================================================
// Submodules
// ============================================================================

/// Outbound command definitions.
pub mod command;

/// Broadcast event types.
pub mod event;

/// Command reply type.
pub mod reply;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::Command;
pub use event::{BroadcastError, RemoteEvent};
pub use reply::CommandReply;
