//! Daemon transport layer.
//!
//! This module handles the line stream between the client and the daemon.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐                         ┌─────────────────┐
//! │  Client              │        Unix socket      │  Daemon         │
//! │                      │                         │                 │
//! │  Connection (write) ─┼────── command line ────►│                 │
//! │                      │                         │                 │
//! │  reader task ◄───────┼── events + replies ─────┤                 │
//! │   └ Demultiplexer    │                         │                 │
//! └──────────────────────┘                         └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `Connection::connect` - Dial the socket, spawn the reader task
//! 2. `Connection::request` - Write a command, wait for its reply
//! 3. `EventReceiver` - Consume broadcast events concurrently
//! 4. `Connection::close` - Shut down the write half, stop the reader
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | Socket halves, reader task, reply handoff |
//! | `demux` | Line classification state machine |

// ============================================================================
// Submodules
// ============================================================================

/// Socket connection and reader task.
pub mod connection;

/// Event/reply demultiplexer.
pub mod demux;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{Connection, EventReceiver, MAX_LINE_LEN};
pub use demux::{Demultiplexer, Message, Phase};
