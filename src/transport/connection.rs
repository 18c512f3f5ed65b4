//! Daemon connection and reader task.
//!
//! This module owns the socket. The write half belongs to [`Connection`],
//! the read half to a background task that runs the [`Demultiplexer`].
//!
//! # Reader Task
//!
//! The connection spawns a tokio task that:
//!
//! - Reads newline terminated lines until the stream ends or fails
//! - Feeds each line to the demultiplexer
//! - Hands events to the [`EventReceiver`]
//! - Hands replies to the connection through a capacity-one channel
//!
//! Both handoffs wait for the consumer, so a slow consumer slows the reader
//! down instead of growing a queue. When the task stops it drops both senders
//! and waiting consumers see the end of the stream.

// ============================================================================
// Imports
// ============================================================================

use std::io;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures_util::Stream;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
    BufWriter,
};
use tokio::net::UnixStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, error, info, trace, warn};

use crate::error::{Error, Result};
use crate::protocol::{CommandReply, RemoteEvent};

use super::demux::{Demultiplexer, Message};

// ============================================================================
// Constants
// ============================================================================

/// Longest line accepted from the daemon, without the newline.
pub const MAX_LINE_LEN: usize = 64 * 1024;

// ============================================================================
// Types
// ============================================================================

/// Write half of the daemon stream.
type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Outcome of reading one line.
#[derive(Debug, PartialEq, Eq)]
enum LineRead {
    /// A line is in the buffer.
    Line,
    /// The line exceeded [`MAX_LINE_LEN`] and was skipped.
    TooLong,
    /// The stream ended.
    Eof,
}

// ============================================================================
// EventReceiver
// ============================================================================

/// Receiving end of the broadcast event channel.
///
/// Read it continuously or drop it. Once its buffer is full the reader task
/// waits for it, and replies queued behind the waiting event stall with it.
/// Dropping it tells the reader task to discard further events; replies are
/// not affected.
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::Receiver<RemoteEvent>,
}

impl EventReceiver {
    /// Waits for the next event.
    ///
    /// Returns `None` once the connection is closed.
    pub async fn recv(&mut self) -> Option<RemoteEvent> {
        self.rx.recv().await
    }

    /// Takes an event if one is ready.
    pub fn try_recv(&mut self) -> Option<RemoteEvent> {
        self.rx.try_recv().ok()
    }
}

impl Stream for EventReceiver {
    type Item = RemoteEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

// ============================================================================
// Connection
// ============================================================================

/// Connection to the daemon.
///
/// Sends command lines and receives the replies assembled by the reader
/// task. Only one command may be in flight; methods take `&mut self` so the
/// borrow checker enforces it.
pub struct Connection {
    /// Buffered write half.
    writer: BufWriter<BoxedWriter>,
    /// Completed replies from the reader task.
    reply_rx: mpsc::Receiver<CommandReply>,
    /// Reader task handle.
    reader_task: JoinHandle<()>,
}

impl Connection {
    /// Opens the daemon's Unix socket.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connect`] if the socket cannot be opened.
    pub async fn connect(
        path: impl AsRef<Path>,
        event_capacity: usize,
    ) -> Result<(Self, EventReceiver)> {
        let path = path.as_ref();
        let stream = UnixStream::connect(path)
            .await
            .map_err(|e| Error::connect(path, e))?;

        info!(path = %path.display(), "Connected to daemon");

        let (read_half, write_half) = stream.into_split();
        Ok(Self::from_parts(read_half, write_half, event_capacity))
    }

    /// Wraps an already established duplex stream.
    pub fn from_stream<S>(stream: S, event_capacity: usize) -> (Self, EventReceiver)
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (read_half, write_half) = tokio::io::split(stream);
        Self::from_parts(read_half, write_half, event_capacity)
    }

    /// Builds a connection from separate read and write halves.
    ///
    /// Spawns the reader task internally.
    pub fn from_parts<R, W>(reader: R, writer: W, event_capacity: usize) -> (Self, EventReceiver)
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let (event_tx, event_rx) = mpsc::channel(event_capacity.max(1));
        let (reply_tx, reply_rx) = mpsc::channel(1);

        let reader_task = tokio::spawn(Self::run_reader(reader, event_tx, reply_tx));

        let writer: BoxedWriter = Box::new(writer);
        let connection = Self {
            writer: BufWriter::new(writer),
            reply_rx,
            reader_task,
        };

        (connection, EventReceiver { rx: event_rx })
    }

    /// Writes `line` plus newline and flushes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the write or flush fails.
    pub async fn send_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;

        trace!(line = %line, "Command sent");
        Ok(())
    }

    /// Waits for the reply echoing `command`.
    ///
    /// Replies echoing any other command belong to a command that already
    /// timed out; they are logged and skipped. With `limit` set to `None`
    /// this waits for as long as it takes.
    ///
    /// # Errors
    ///
    /// - [`Error::ReplyTimeout`] if `limit` elapses first
    /// - [`Error::ConnectionClosed`] if the reader task has stopped
    pub async fn recv_reply(
        &mut self,
        command: &str,
        limit: Option<Duration>,
    ) -> Result<CommandReply> {
        match limit {
            Some(limit) => timeout(limit, self.recv_matching(command))
                .await
                .map_err(|_| Error::reply_timeout(command, whole_millis(limit)))?,
            None => self.recv_matching(command).await,
        }
    }

    /// Sends a command line and waits for its reply.
    ///
    /// Any reply still queued from a command that timed out earlier is
    /// discarded before the write. One that arrives later is skipped by
    /// [`Connection::recv_reply`].
    ///
    /// # Errors
    ///
    /// See [`Connection::send_line`] and [`Connection::recv_reply`].
    pub async fn request(&mut self, line: &str, limit: Option<Duration>) -> Result<CommandReply> {
        self.discard_stale_replies();
        self.send_line(line).await?;
        self.recv_reply(line, limit).await
    }

    /// Returns `true` while the reader task is running.
    #[inline]
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.reader_task.is_finished()
    }

    /// Shuts down the write half and stops the reader task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the shutdown fails. The reader task is
    /// stopped regardless.
    pub async fn close(&mut self) -> Result<()> {
        let result = self.writer.shutdown().await;
        self.reader_task.abort();

        debug!("Connection closed");
        result.map_err(Error::from)
    }

    async fn recv_matching(&mut self, command: &str) -> Result<CommandReply> {
        loop {
            let reply = self.reply_rx.recv().await.ok_or(Error::ConnectionClosed)?;
            if reply.command.trim() == command.trim() {
                return Ok(reply);
            }

            warn!(
                expected = %command,
                command = %reply.command,
                "Discarding reply to another command"
            );
        }
    }

    fn discard_stale_replies(&mut self) {
        while let Ok(stale) = self.reply_rx.try_recv() {
            warn!(command = %stale.command, "Discarding reply that arrived after its timeout");
        }
    }

    /// Reader loop: read, demultiplex, deliver.
    async fn run_reader<R>(
        reader: R,
        event_tx: mpsc::Sender<RemoteEvent>,
        reply_tx: mpsc::Sender<CommandReply>,
    ) where
        R: AsyncRead + Unpin,
    {
        let mut reader = BufReader::new(reader);
        let mut demux = Demultiplexer::new();
        let mut event_tx = Some(event_tx);
        let mut buf = Vec::with_capacity(256);

        loop {
            match Self::read_line(&mut reader, &mut buf).await {
                Ok(LineRead::Eof) => {
                    debug!("Daemon stream ended");
                    break;
                }
                Ok(LineRead::TooLong) => {
                    warn!(max = MAX_LINE_LEN, "Line too long, skipping");
                    demux.reset();
                }
                Ok(LineRead::Line) => {
                    while matches!(buf.last(), Some(b'\n' | b'\r')) {
                        buf.pop();
                    }

                    // Lossy so a stray non-UTF-8 byte only spoils its own line
                    let line = String::from_utf8_lossy(&buf);

                    match demux.feed(&line) {
                        Some(Message::Event(event)) => {
                            Self::deliver_event(&mut event_tx, event).await;
                        }
                        Some(Message::Reply(reply)) => {
                            if reply_tx.send(reply).await.is_err() {
                                debug!("Reply receiver dropped");
                                break;
                            }
                        }
                        None => {}
                    }
                }
                Err(e) => {
                    error!(error = %e, "Failed to read from daemon");
                    break;
                }
            }
        }

        debug!("Reader task terminated");
    }

    /// Reads one line into `buf`, newline included.
    ///
    /// Never buffers more than [`MAX_LINE_LEN`] + 1 bytes. The rest of an
    /// oversized line is read and thrown away.
    async fn read_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<LineRead>
    where
        R: AsyncBufRead + Unpin,
    {
        buf.clear();
        let limit = MAX_LINE_LEN as u64 + 1;

        if (&mut *reader).take(limit).read_until(b'\n', buf).await? == 0 {
            return Ok(LineRead::Eof);
        }
        if buf.last() == Some(&b'\n') || buf.len() <= MAX_LINE_LEN {
            return Ok(LineRead::Line);
        }

        loop {
            buf.clear();
            let n = (&mut *reader).take(limit).read_until(b'\n', buf).await?;
            if n == 0 || buf.last() == Some(&b'\n') {
                break;
            }
        }
        buf.clear();

        Ok(LineRead::TooLong)
    }

    async fn deliver_event(event_tx: &mut Option<mpsc::Sender<RemoteEvent>>, event: RemoteEvent) {
        let Some(tx) = event_tx else {
            return;
        };

        if tx.send(event).await.is_err() {
            debug!("Event receiver dropped, discarding further events");
            *event_tx = None;
        }
    }
}

/// Milliseconds in `duration`, saturating at `u64::MAX`.
fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.reader_task.abort();
    }
}

// ============================================================================
// Tests
// ============================================================================
