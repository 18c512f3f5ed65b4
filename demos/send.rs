//! Transmit a button, once or held.
//!
//! Demonstrates:
//! - `SEND_ONCE` through `Client::send_once`
//! - `SEND_START`/`SEND_STOP` through `Client::send_long_str`
//! - Reading the daemon's error message on failure
//!
//! Usage:
//!   cargo run --example send -- tv KEY_POWER
//!   cargo run --example send -- tv KEY_VOLUMEUP 1.5s
//!   cargo run --example send -- --socket /run/lirc/lircd tv KEY_MUTE

mod common;

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use anyhow::{Context, bail};
use common::Args;
use lirc_client::Client;

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let (remote, button, hold) = match args.positional.as_slice() {
        [remote, button] => (remote, button, None),
        [remote, button, hold] => (remote, button, Some(hold)),
        _ => bail!("usage: send [--socket <path>] <remote> <button> [hold]"),
    };
    let target = format!("{remote} {button}");

    // Events are not read here, so drop the receiver
    let (mut client, _) = Client::builder()
        .socket_path(&args.socket)
        .reply_timeout(Duration::from_secs(5))
        .connect()
        .await
        .with_context(|| format!("is lircd running on {}?", args.socket.display()))?;

    match hold {
        Some(hold) => {
            client.send_long_str(&target, hold).await?;
            println!("Held {target} for {hold}");
        }
        None => {
            client.send_once(&target).await?;
            println!("Sent {target}");
        }
    }

    client.close().await?;
    Ok(())
}
