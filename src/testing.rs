//! Fake daemon for tests.
//!
//! Serves one client: writes a greeting, then answers each received command
//! line with the next canned response. Every received line is recorded with
//! the time it arrived.

use std::path::Path;
use std::time::Instant;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, DuplexStream};
use tokio::net::UnixListener;
use tokio::task::JoinHandle;

/// A scripted daemon running on its own task.
pub(crate) struct FakeDaemon {
    handle: JoinHandle<Vec<(String, Instant)>>,
}

impl FakeDaemon {
    /// Spawns a daemon on an in-memory duplex and returns the client end.
    pub fn spawn(greeting: &str, responses: &[&str]) -> (DuplexStream, Self) {
        let (client, server) = tokio::io::duplex(4096);
        (client, Self::serve(server, greeting, responses))
    }

    /// Binds a Unix socket at `path` and serves the first client to connect.
    pub fn listen(path: &Path, greeting: &str, responses: &[&str]) -> Self {
        let listener = UnixListener::bind(path).expect("bind fake daemon socket");
        let greeting = greeting.to_string();
        let responses: Vec<String> = responses.iter().map(ToString::to_string).collect();

        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept client");
            Self::run(stream, greeting, responses).await
        });

        Self { handle }
    }

    /// Serves an already connected stream.
    pub fn serve<S>(stream: S, greeting: &str, responses: &[&str]) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
    {
        let greeting = greeting.to_string();
        let responses: Vec<String> = responses.iter().map(ToString::to_string).collect();

        Self {
            handle: tokio::spawn(Self::run(stream, greeting, responses)),
        }
    }

    /// Waits for the client to hang up and returns the received lines.
    pub async fn finish(self) -> Vec<String> {
        self.finish_timed()
            .await
            .into_iter()
            .map(|(line, _)| line)
            .collect()
    }

    /// Like [`FakeDaemon::finish`], with arrival times.
    pub async fn finish_timed(self) -> Vec<(String, Instant)> {
        self.handle.await.expect("fake daemon task panicked")
    }

    async fn run<S>(stream: S, greeting: String, responses: Vec<String>) -> Vec<(String, Instant)>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let (reader, mut writer) = tokio::io::split(stream);
        let mut lines = BufReader::new(reader).lines();
        let mut responses = responses.into_iter();
        let mut received = Vec::new();

        if writer.write_all(greeting.as_bytes()).await.is_err() {
            return received;
        }

        while let Ok(Some(line)) = lines.next_line().await {
            received.push((line, Instant::now()));

            if let Some(response) = responses.next()
                && writer.write_all(response.as_bytes()).await.is_err()
            {
                break;
            }
        }

        received
    }
}
