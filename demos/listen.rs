//! Print button presses as they arrive.
//!
//! Demonstrates:
//! - Connecting with the builder
//! - Consuming the event receiver as a `Stream`
//! - Telling first presses from repeats
//!
//! Usage:
//!   cargo run --example listen
//!   cargo run --example listen -- --socket /run/lirc/lircd
//!   cargo run --example listen -- --json
//!   cargo run --example listen -- --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use anyhow::Context;
use common::Args;
use futures_util::StreamExt;
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
    let (client, mut events) = Client::builder()
        .socket_path(&args.socket)
        .event_capacity(16)
        .connect()
        .await
        .with_context(|| format!("is lircd running on {}?", args.socket.display()))?;

    println!("Listening on {} (Ctrl+C to exit)", args.socket.display());

    loop {
        tokio::select! {
            event = events.next() => {
                let Some(event) = event else {
                    println!("Daemon closed the connection");
                    break;
                };

                if args.json {
                    println!("{}", serde_json::to_string(&event)?);
                } else if event.is_repeat() {
                    println!("  {} {} (repeat {})", event.remote, event.button, event.repeat);
                } else {
                    println!("{} {} [{:#018x}]", event.remote, event.button, event.code);
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    client.close().await?;
    Ok(())
}
