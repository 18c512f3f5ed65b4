//! Command façade over the daemon connection.
//!
//! The [`Client`] writes commands and waits for the matching reply.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use lirc_client::Client;
//!
//! # async fn example() -> lirc_client::Result<()> {
//! let (mut client, mut events) = Client::connect("/var/run/lirc/lircd").await?;
//!
//! client.send_once("tv KEY_POWER").await?;
//! client.send_long("tv KEY_VOLUMEUP", Duration::from_millis(800)).await?;
//!
//! while let Some(event) = events.recv().await {
//!     println!("{} {}", event.remote, event.button);
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::path::Path;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use crate::error::Result;
use crate::protocol::{Command, CommandReply};
use crate::transport::{Connection, EventReceiver};

use super::builder::ClientBuilder;
use super::duration::parse_duration;
use super::options::ClientOptions;

// ============================================================================
// Client
// ============================================================================

/// Client for the remote-control daemon.
///
/// The daemon answers one command at a time and its replies carry no id.
/// Every command method therefore takes `&mut self`; callers that share a
/// client across tasks must serialize access themselves (for example with a
/// `tokio::sync::Mutex`).
pub struct Client {
    /// Connection to the daemon.
    connection: Connection,
    /// Options the client was created with.
    options: ClientOptions,
}

// ============================================================================
// Client - Display
// ============================================================================

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("options", &self.options)
            .field("alive", &self.is_alive())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Client - Construction
// ============================================================================

impl Client {
    /// Creates a configuration builder for the client.
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Connects to the daemon socket at `path` with default options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connect`](crate::Error::Connect) if the socket cannot
    /// be opened.
    pub async fn connect(path: impl AsRef<Path>) -> Result<(Self, EventReceiver)> {
        let options = ClientOptions::new().with_socket_path(path.as_ref());
        Self::connect_with(options).await
    }

    /// Connects using `options`.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`](crate::Error::Config) if the options are invalid
    /// - [`Error::Connect`](crate::Error::Connect) if the socket cannot be opened
    pub async fn connect_with(options: ClientOptions) -> Result<(Self, EventReceiver)> {
        options.validate()?;

        let (connection, events) =
            Connection::connect(&options.socket_path, options.event_capacity).await?;

        Ok((
            Self {
                connection,
                options,
            },
            events,
        ))
    }

    /// Wraps an already connected stream. The socket path in `options` is
    /// not used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the options are
    /// invalid.
    pub fn from_stream<S>(stream: S, options: ClientOptions) -> Result<(Self, EventReceiver)>
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        options.validate()?;

        let (connection, events) = Connection::from_stream(stream, options.event_capacity);
        Ok((
            Self {
                connection,
                options,
            },
            events,
        ))
    }
}

// ============================================================================
// Client - Commands
// ============================================================================

impl Client {
    /// Sends a command and returns the daemon's reply.
    ///
    /// An `ERROR` reply is returned as a reply with `success == false`, not
    /// as an error. Waits for as long as the configured reply timeout allows.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCommand`](crate::Error::InvalidCommand) if the text is empty or
    ///   spans lines
    /// - [`Error::Io`](crate::Error::Io) if the write fails
    /// - [`Error::ReplyTimeout`](crate::Error::ReplyTimeout) if the timeout elapses
    /// - [`Error::ConnectionClosed`](crate::Error::ConnectionClosed) if the daemon hung up
    pub async fn execute(&mut self, command: impl Into<Command>) -> Result<CommandReply> {
        let limit = self.options.reply_timeout;
        self.execute_with_timeout(command, limit).await
    }

    /// Like [`Client::execute`] with an explicit reply timeout for this call.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn execute_with_timeout(
        &mut self,
        command: impl Into<Command>,
        limit: Option<Duration>,
    ) -> Result<CommandReply> {
        let line = command.into().to_line()?;
        let reply = self.connection.request(&line, limit).await?;

        debug!(command = %line, success = reply.success, "Command answered");
        Ok(reply)
    }

    /// Transmits `target` (`"<remote> <button>"`) once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandFailed`](crate::Error::CommandFailed) with the
    /// daemon's message if it rejects the command, plus the errors of
    /// [`Client::execute`].
    pub async fn send_once(&mut self, target: &str) -> Result<()> {
        self.execute(Command::SendOnce(target.to_string()))
            .await?
            .into_result()
            .map(drop)
    }

    /// Holds `target` for `hold`: `SEND_START`, wait, `SEND_STOP`.
    ///
    /// If `SEND_START` fails, `SEND_STOP` is not sent. Events keep arriving
    /// on the event receiver during the hold.
    ///
    /// # Errors
    ///
    /// Returns the failure of whichever command failed first.
    pub async fn send_long(&mut self, target: &str, hold: Duration) -> Result<()> {
        self.execute(Command::SendStart(target.to_string()))
            .await?
            .into_result()?;

        tokio::time::sleep(hold).await;

        self.execute(Command::SendStop(target.to_string()))
            .await?
            .into_result()
            .map(drop)
    }

    /// Like [`Client::send_long`] with the hold given as a string such as
    /// `"500ms"` or `"1.5s"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDuration`](crate::Error::InvalidDuration)
    /// before anything is sent if `hold` does not parse.
    pub async fn send_long_str(&mut self, target: &str, hold: &str) -> Result<()> {
        let hold = parse_duration(hold)?;
        self.send_long(target, hold).await
    }

    /// Returns the daemon's version string.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`] and [`CommandReply::into_result`].
    pub async fn version(&mut self) -> Result<String> {
        let reply = self.execute(Command::Version).await?.into_result()?;
        Ok(reply.message())
    }

    /// Lists the remotes the daemon knows.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`] and [`CommandReply::into_result`].
    pub async fn list_remotes(&mut self) -> Result<Vec<String>> {
        let reply = self.execute(Command::List(None)).await?.into_result()?;
        Ok(reply.data)
    }

    /// Lists the buttons of `remote`, one `"<code> <button>"` entry each.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`] and [`CommandReply::into_result`].
    pub async fn list_buttons(&mut self, remote: &str) -> Result<Vec<String>> {
        let reply = self
            .execute(Command::List(Some(remote.to_string())))
            .await?
            .into_result()?;
        Ok(reply.data)
    }
}

// ============================================================================
// Client - State
// ============================================================================

impl Client {
    /// Returns the options the client was created with.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Returns `true` while the daemon stream is still being read.
    #[inline]
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.connection.is_alive()
    }

    /// Closes the connection.
    ///
    /// The event receiver yields `None` afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if shutting down the socket fails.
    pub async fn close(mut self) -> Result<()> {
        self.connection.close().await
    }
}

// ============================================================================
// Tests
// ============================================================================
