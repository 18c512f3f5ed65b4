//! Shared utilities for demos.
//!
//! Provides common functionality used across all demos:
//! - Command-line argument parsing
//! - Logging initialization

#![allow(dead_code)]

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;

use lirc_client::DEFAULT_SOCKET_PATH;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Types
// ============================================================================

/// Command-line arguments for demos.
#[derive(Debug, Clone)]
pub struct Args {
    pub debug: bool,
    pub json: bool,
    pub socket: PathBuf,
    pub positional: Vec<String>,
}

impl Args {
    /// Parse command-line arguments.
    ///
    /// Flags: `--debug`, `--json`, `--socket <path>`. Everything else is
    /// positional.
    pub fn parse() -> Self {
        let mut args = Self {
            debug: false,
            json: false,
            socket: PathBuf::from(DEFAULT_SOCKET_PATH),
            positional: Vec::new(),
        };

        let mut iter = std::env::args().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--debug" => args.debug = true,
                "--json" => args.json = true,
                "--socket" => {
                    if let Some(path) = iter.next() {
                        args.socket = PathBuf::from(path);
                    }
                }
                _ => args.positional.push(arg),
            }
        }

        args
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Initialize tracing/logging.
pub fn init_logging(debug: bool) {
    let filter = if debug {
        "lirc_client=debug"
    } else {
        "lirc_client=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}
