//! Demultiplexer benchmark suite.
//!
//! Measures line classification throughput for:
//! - Event bursts of different sizes
//! - Replies with growing data blocks
//! - A full connection round trip over an in-memory stream
//!
//! Run with: cargo bench --bench demux
//! Results saved to: target/criterion/

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lirc_client::{Client, ClientOptions, Demultiplexer};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::runtime::Runtime;

// ============================================================================
// Benchmark Parameters
// ============================================================================

const EVENT_COUNTS: &[usize] = &[100, 1_000, 10_000];
const DATA_LENGTHS: &[usize] = &[1, 16, 256];

// ============================================================================
// Input Builders
// ============================================================================

fn event_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{:016x} {} KEY_{} remote1", (i as u64).swap_bytes(), i % 10, i % 64))
        .collect()
}

fn reply_lines(data_length: usize) -> Vec<String> {
    let mut lines = vec![
        "BEGIN".to_string(),
        "LIST remote1".to_string(),
        "SUCCESS".to_string(),
        "DATA".to_string(),
        data_length.to_string(),
    ];
    lines.extend((0..data_length).map(|i| format!("{i:016x} KEY_{i}")));
    lines.push("END".to_string());
    lines
}

// ============================================================================
// Benchmark: Event Parsing
// ============================================================================

fn bench_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("demux_events");

    for &count in EVENT_COUNTS {
        let lines = event_lines(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("events", count), &lines, |b, lines| {
            b.iter(|| {
                let mut demux = Demultiplexer::new();
                black_box(demux.feed_lines(lines.iter()))
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Reply Assembly
// ============================================================================

fn bench_replies(c: &mut Criterion) {
    let mut group = c.benchmark_group("demux_replies");

    for &length in DATA_LENGTHS {
        let lines = reply_lines(length);
        group.bench_with_input(BenchmarkId::new("data_lines", length), &lines, |b, lines| {
            b.iter(|| {
                let mut demux = Demultiplexer::new();
                black_box(demux.feed_lines(lines.iter()))
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Command Round Trip
// ============================================================================

fn bench_round_trip(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");

    c.bench_function("send_once_round_trip", |b| {
        b.to_async(&rt).iter(|| async {
            let (client_end, daemon_end) = tokio::io::duplex(4096);

            let daemon = tokio::spawn(async move {
                let (reader, mut writer) = tokio::io::split(daemon_end);
                let mut lines = BufReader::new(reader).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    let reply = format!("BEGIN\n{line}\nSUCCESS\nEND\n");
                    if writer.write_all(reply.as_bytes()).await.is_err() {
                        break;
                    }
                }
            });

            let (mut client, _) =
                Client::from_stream(client_end, ClientOptions::new()).expect("client");
            client.send_once("remote1 KEY_UP").await.expect("send_once");
            client.close().await.expect("close");
            daemon.await.expect("daemon task");
        });
    });
}

// ============================================================================
// Criterion Setup
// ============================================================================

criterion_group!(benches, bench_events, bench_replies, bench_round_trip);
criterion_main!(benches);
