//! Broadcast event types.
//!
//! Events are unsolicited notifications the daemon broadcasts to every
//! connected client when a remote button is pressed.
//!
//! # Format
//!
//! ```text
//! <code> <repeat> <button> <remote>
//! 0000000000f40bf0 0 KEY_UP livingroom
//! ```
//!
//! `code` is 16 hex digits (8 bytes), `repeat` is the decimal repeat counter
//! for a held button.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

// ============================================================================
// Constants
// ============================================================================

/// Number of space separated fields in a broadcast line.
const FIELD_COUNT: usize = 4;

/// Number of bytes the hex code must decode to.
const CODE_LEN: usize = 8;

// ============================================================================
// RemoteEvent
// ============================================================================

/// A button press reported by the daemon.
///
/// Immutable once parsed. Clone it to hand the same event to several
/// listeners.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteEvent {
    /// Decoded 64-bit button code.
    pub code: u64,

    /// Repeat counter, `0` for the initial press.
    pub repeat: u32,

    /// Button name from the remote's config (e.g. `KEY_UP`).
    pub button: String,

    /// Remote name from the daemon's config.
    pub remote: String,
}

impl RemoteEvent {
    /// Parses a broadcast line.
    ///
    /// A bad code field rejects the whole line. A bad repeat counter is only
    /// logged and the event keeps a repeat of `0`.
    ///
    /// # Errors
    ///
    /// Returns [`BroadcastError`] if the line does not have four fields or the
    /// code is not 8 bytes of hex.
    pub fn parse(line: &str) -> Result<Self, BroadcastError> {
        let fields: Vec<&str> = line.split(' ').collect();
        if fields.len() != FIELD_COUNT {
            return Err(BroadcastError::FieldCount(fields.len()));
        }

        let bytes = hex::decode(fields[0])?;
        let bytes: [u8; CODE_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| BroadcastError::CodeLength(bytes.len()))?;

        let repeat = fields[1].parse().unwrap_or_else(|e| {
            warn!(repeat = %fields[1], error = %e, "Invalid repeat count in broadcast");
            0
        });

        Ok(Self {
            code: assemble_code(&bytes),
            repeat,
            button: fields[2].to_string(),
            remote: fields[3].to_string(),
        })
    }

    /// Returns `true` if this is a repeat of a held button.
    #[inline]
    #[must_use]
    pub fn is_repeat(&self) -> bool {
        self.repeat > 0
    }
}

/// Combines the decoded bytes into a code, least significant byte first.
#[inline]
fn assemble_code(bytes: &[u8; CODE_LEN]) -> u64 {
    bytes
        .iter()
        .enumerate()
        .fold(0, |code, (i, &byte)| code | (u64::from(byte) << (8 * i)))
}

// ============================================================================
// BroadcastError
// ============================================================================

/// Reason a broadcast line was skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BroadcastError {
    /// Wrong number of space separated fields.
    #[error("expected 4 fields, got {0}")]
    FieldCount(usize),

    /// Code field is not valid hex.
    #[error("code not parseable: {0}")]
    Code(#[from] hex::FromHexError),

    /// Code field decoded to the wrong number of bytes.
    #[error("code has {0} bytes, expected 8")]
    CodeLength(usize),
}

// ============================================================================
// Tests
// ============================================================================
