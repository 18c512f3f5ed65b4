//! Line demultiplexer for the daemon stream.
//!
//! Every line the daemon writes is either a broadcast event or part of a
//! `BEGIN`/`END` framed reply. [`Demultiplexer`] tells the two apart and
//! assembles replies across lines.
//!
//! # State Machine
//!
//! ```text
//! RECEIVE ──BEGIN──► REPLY ──<cmd>──► STATUS ──SUCCESS/ERROR──► DATA_START ──DATA──► DATA_LEN
//!    ▲                                  │                          │                   │ N
//!    │                                  END (emit)                 END (emit)          ▼
//!    └─────────────── END (emit) ◄──── END ◄──── N lines ◄────────────────────────── DATA
//! ```
//!
//! A line that does not fit the current state drops the reply under
//! construction and returns to `RECEIVE`. A broadcast line that does not
//! parse is skipped. Neither stops the machine.

// ============================================================================
// Imports
// ============================================================================

use std::mem;

use tracing::{trace, warn};

use crate::protocol::{CommandReply, RemoteEvent};

// ============================================================================
// Constants
// ============================================================================

const BEGIN: &str = "BEGIN";
const END: &str = "END";
const SUCCESS: &str = "SUCCESS";
const ERROR: &str = "ERROR";
const DATA: &str = "DATA";

// ============================================================================
// Message
// ============================================================================

/// A complete message produced by the demultiplexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Broadcast button event.
    Event(RemoteEvent),
    /// Reply to the command in flight.
    Reply(CommandReply),
}

// ============================================================================
// Phase
// ============================================================================

/// State tag of the demultiplexer, without the reply under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for a broadcast or `BEGIN`.
    Receive,
    /// Expecting the echoed command.
    Reply,
    /// Expecting `SUCCESS`, `ERROR` or `END`.
    Status,
    /// Expecting `DATA` or `END`.
    DataStart,
    /// Expecting the data line count.
    DataLen,
    /// Collecting data lines.
    Data,
    /// Expecting the closing `END`.
    End,
}

// ============================================================================
// State
// ============================================================================

/// Parser state. Reply-building states own the reply under construction.
#[derive(Debug, Default)]
enum State {
    #[default]
    Receive,
    Reply,
    Status(CommandReply),
    DataStart(CommandReply),
    DataLen(CommandReply),
    Data { reply: CommandReply, seen: usize },
    End(CommandReply),
}

impl State {
    fn reply(&self) -> Option<&CommandReply> {
        match self {
            Self::Receive | Self::Reply => None,
            Self::Status(reply)
            | Self::DataStart(reply)
            | Self::DataLen(reply)
            | Self::Data { reply, .. }
            | Self::End(reply) => Some(reply),
        }
    }

    fn phase(&self) -> Phase {
        match self {
            Self::Receive => Phase::Receive,
            Self::Reply => Phase::Reply,
            Self::Status(_) => Phase::Status,
            Self::DataStart(_) => Phase::DataStart,
            Self::DataLen(_) => Phase::DataLen,
            Self::Data { .. } => Phase::Data,
            Self::End(_) => Phase::End,
        }
    }
}

// ============================================================================
// Demultiplexer
// ============================================================================

/// Classifies daemon lines into events and replies.
///
/// Feed it one line at a time, without the trailing newline.
///
/// # Example
///
/// ```
/// use lirc_client::transport::{Demultiplexer, Message};
///
/// let mut demux = Demultiplexer::new();
/// assert!(demux.feed("BEGIN").is_none());
/// assert!(demux.feed("SEND_ONCE tv KEY_UP").is_none());
///
/// match demux.feed("END") {
///     Some(Message::Reply(reply)) => assert!(reply.success),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[derive(Debug, Default)]
pub struct Demultiplexer {
    state: State,
}

impl Demultiplexer {
    /// Creates a demultiplexer in the `RECEIVE` state.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state tag.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Feeds one line. Returns a message once one is complete.
    pub fn feed(&mut self, line: &str) -> Option<Message> {
        let (next, message) = match mem::take(&mut self.state) {
            State::Receive => Self::on_receive(line),
            State::Reply => (State::Status(CommandReply::new(line)), None),
            State::Status(reply) => Self::on_status(reply, line),
            State::DataStart(reply) => Self::on_data_start(reply, line),
            State::DataLen(reply) => Self::on_data_len(reply, line),
            State::Data { reply, seen } => (Self::on_data(reply, seen, line), None),
            State::End(reply) => Self::on_end(reply, line),
        };

        self.state = next;
        message
    }

    /// Drops any reply under construction and returns to `RECEIVE`.
    pub fn reset(&mut self) {
        if let Some(reply) = self.state.reply() {
            warn!(command = %reply.command, "Reply interrupted, dropping");
        }
        self.state = State::Receive;
    }

    /// Feeds several lines and collects every completed message.
    pub fn feed_lines<I, S>(&mut self, lines: I) -> Vec<Message>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.feed(line.as_ref()))
            .collect()
    }

    fn on_receive(line: &str) -> (State, Option<Message>) {
        if line == BEGIN {
            return (State::Reply, None);
        }

        match RemoteEvent::parse(line) {
            Ok(event) => {
                trace!(
                    button = %event.button,
                    remote = %event.remote,
                    repeat = event.repeat,
                    "Event received"
                );
                (State::Receive, Some(Message::Event(event)))
            }
            Err(e) => {
                warn!(line = %line, error = %e, "Invalid broadcast message, skipping");
                (State::Receive, None)
            }
        }
    }

    fn on_status(mut reply: CommandReply, line: &str) -> (State, Option<Message>) {
        match line {
            SUCCESS => {
                reply.success = true;
                (State::DataStart(reply), None)
            }
            END => {
                reply.success = true;
                Self::complete(reply)
            }
            ERROR => {
                reply.success = false;
                (State::DataStart(reply), None)
            }
            _ => Self::abort(&reply, line, "invalid status"),
        }
    }

    fn on_data_start(reply: CommandReply, line: &str) -> (State, Option<Message>) {
        match line {
            END => Self::complete(reply),
            DATA => (State::DataLen(reply), None),
            _ => Self::abort(&reply, line, "invalid data start"),
        }
    }

    fn on_data_len(mut reply: CommandReply, line: &str) -> (State, Option<Message>) {
        let Ok(count) = line.parse::<usize>() else {
            return Self::abort(&reply, line, "invalid data length");
        };

        reply.data_length = count;
        reply.data.clear();

        if count == 0 {
            (State::End(reply), None)
        } else {
            (State::Data { reply, seen: 0 }, None)
        }
    }

    fn on_data(mut reply: CommandReply, seen: usize, line: &str) -> State {
        if seen < reply.data_length {
            reply.data.push(line.to_string());
        }

        let seen = seen + 1;
        if seen >= reply.data_length {
            State::End(reply)
        } else {
            State::Data { reply, seen }
        }
    }

    fn on_end(reply: CommandReply, line: &str) -> (State, Option<Message>) {
        if line == END {
            Self::complete(reply)
        } else {
            Self::abort(&reply, line, "invalid end")
        }
    }

    fn complete(reply: CommandReply) -> (State, Option<Message>) {
        trace!(
            command = %reply.command,
            success = reply.success,
            lines = reply.data.len(),
            "Reply complete"
        );
        (State::Receive, Some(Message::Reply(reply)))
    }

    fn abort(reply: &CommandReply, line: &str, reason: &str) -> (State, Option<Message>) {
        warn!(command = %reply.command, line = %line, reason, "Invalid reply message, dropping");
        (State::Receive, None)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn reply_of(messages: &[Message]) -> &CommandReply {
        match messages {
            [Message::Reply(reply)] => reply,
            other => panic!("Expected a single reply, got {other:?}"),
        }
    }

    #[test]
    fn test_broadcast_emits_event() {
        let mut demux = Demultiplexer::new();
        let message = demux.feed("0100000000000000 0 KEY_UP remote1");

        match message {
            Some(Message::Event(event)) => {
                assert_eq!(event.code, 1);
                assert_eq!(event.button, "KEY_UP");
                assert_eq!(event.remote, "remote1");
            }
            other => panic!("Expected Event, got {other:?}"),
        }
        assert_eq!(demux.phase(), Phase::Receive);
    }

    #[test]
    fn test_bad_broadcast_skipped_and_scanning_continues() {
        let mut demux = Demultiplexer::new();
        let messages = demux.feed_lines([
            "nothex 0 KEY_UP remote1",
            "00f4 0 KEY_UP remote1",
            "0200000000000000 1 KEY_DOWN remote1",
        ]);

        assert_eq!(messages.len(), 1);
        match &messages[0] {
            Message::Event(event) => {
                assert_eq!(event.code, 2);
                assert_eq!(event.repeat, 1);
            }
            other => panic!("Expected Event, got {other:?}"),
        }
    }

    #[test]
    fn test_success_with_data() {
        let mut demux = Demultiplexer::new();
        let messages = demux.feed_lines([
            "BEGIN", "LIST", "SUCCESS", "DATA", "2", "remote1", "remote2", "END",
        ]);

        let reply = reply_of(&messages);
        assert_eq!(reply.command, "LIST");
        assert!(reply.success);
        assert_eq!(reply.data_length, 2);
        assert_eq!(reply.data, vec!["remote1", "remote2"]);
        assert_eq!(demux.phase(), Phase::Receive);
    }

    #[test]
    fn test_abbreviated_reply() {
        let mut demux = Demultiplexer::new();
        let messages = demux.feed_lines(["BEGIN", "SEND_ONCE remote1 KEY_UP", "END"]);

        let reply = reply_of(&messages);
        assert_eq!(reply.command, "SEND_ONCE remote1 KEY_UP");
        assert!(reply.success);
        assert!(reply.data.is_empty());
    }

    #[test]
    fn test_success_without_data_block() {
        let mut demux = Demultiplexer::new();
        let messages = demux.feed_lines(["BEGIN", "SEND_ONCE remote1 KEY_UP", "SUCCESS", "END"]);

        let reply = reply_of(&messages);
        assert!(reply.success);
        assert_eq!(reply.data_length, 0);
    }

    #[test]
    fn test_error_with_data() {
        let mut demux = Demultiplexer::new();
        let messages = demux.feed_lines([
            "BEGIN",
            "SEND_ONCE remote1 KEY_NOPE",
            "ERROR",
            "DATA",
            "1",
            "unknown button",
            "END",
        ]);

        let reply = reply_of(&messages);
        assert!(!reply.success);
        assert_eq!(reply.data_length, 1);
        assert_eq!(reply.data, vec!["unknown button"]);
    }

    #[test]
    fn test_zero_data_lines_still_needs_end() {
        let mut demux = Demultiplexer::new();

        assert!(demux.feed_lines(["BEGIN", "LIST", "SUCCESS", "DATA", "0"]).is_empty());
        assert_eq!(demux.phase(), Phase::End);

        let messages = demux.feed_lines(["END"]);
        let reply = reply_of(&messages);
        assert_eq!(reply.data_length, 0);
        assert!(reply.data.is_empty());
    }

    #[test]
    fn test_data_lines_that_look_like_keywords() {
        let mut demux = Demultiplexer::new();
        let messages = demux.feed_lines([
            "BEGIN", "LIST", "SUCCESS", "DATA", "3", "BEGIN", "END", "DATA", "END",
        ]);

        let reply = reply_of(&messages);
        assert_eq!(reply.data, vec!["BEGIN", "END", "DATA"]);
    }

    #[test]
    fn test_invalid_status_aborts_and_recovers() {
        let mut demux = Demultiplexer::new();

        assert!(demux.feed_lines(["BEGIN", "VERSION", "MAYBE"]).is_empty());
        assert_eq!(demux.phase(), Phase::Receive);

        let messages = demux.feed_lines([
            "BEGIN", "VERSION", "SUCCESS", "DATA", "1", "0.10.1", "END",
        ]);
        let reply = reply_of(&messages);
        assert_eq!(reply.command, "VERSION");
        assert_eq!(reply.data, vec!["0.10.1"]);
    }

    #[test]
    fn test_invalid_data_start_aborts() {
        let mut demux = Demultiplexer::new();

        assert!(demux.feed_lines(["BEGIN", "VERSION", "SUCCESS", "0.10.1"]).is_empty());
        assert_eq!(demux.phase(), Phase::Receive);
    }

    #[test]
    fn test_invalid_data_len_aborts() {
        let mut demux = Demultiplexer::new();

        assert!(demux.feed_lines(["BEGIN", "LIST", "SUCCESS", "DATA", "two"]).is_empty());
        assert_eq!(demux.phase(), Phase::Receive);

        assert!(demux.feed_lines(["BEGIN", "LIST", "SUCCESS", "DATA", "-1"]).is_empty());
        assert_eq!(demux.phase(), Phase::Receive);
    }

    #[test]
    fn test_reset_drops_partial_reply() {
        let mut demux = Demultiplexer::new();

        assert!(demux.feed_lines(["BEGIN", "LIST", "SUCCESS", "DATA"]).is_empty());
        assert_eq!(demux.phase(), Phase::DataLen);

        demux.reset();
        assert_eq!(demux.phase(), Phase::Receive);
        assert!(demux.feed("END").is_none());
    }

    #[test]
    fn test_missing_end_aborts() {
        let mut demux = Demultiplexer::new();

        let messages = demux.feed_lines([
            "BEGIN", "LIST", "SUCCESS", "DATA", "1", "remote1", "extra",
        ]);
        assert!(messages.is_empty());
        assert_eq!(demux.phase(), Phase::Receive);
    }

    #[test]
    fn test_events_between_replies() {
        let mut demux = Demultiplexer::new();
        let messages = demux.feed_lines([
            "0100000000000000 0 KEY_UP remote1",
            "BEGIN",
            "SEND_ONCE remote1 KEY_UP",
            "END",
            "0100000000000000 1 KEY_UP remote1",
        ]);

        assert_eq!(messages.len(), 3);
        assert!(matches!(messages[0], Message::Event(_)));
        assert!(matches!(messages[1], Message::Reply(_)));
        assert!(matches!(messages[2], Message::Event(ref e) if e.repeat == 1));
    }

    #[test]
    fn test_phases_through_full_reply() {
        let mut demux = Demultiplexer::new();
        let expected = [
            ("BEGIN", Phase::Reply),
            ("LIST", Phase::Status),
            ("SUCCESS", Phase::DataStart),
            ("DATA", Phase::DataLen),
            ("2", Phase::Data),
            ("a", Phase::Data),
            ("b", Phase::End),
            ("END", Phase::Receive),
        ];

        for (line, phase) in expected {
            demux.feed(line);
            assert_eq!(demux.phase(), phase, "after {line:?}");
        }
    }

    proptest! {
        #[test]
        fn prop_data_lines_kept_in_order(
            lines in proptest::collection::vec("[ -~]{0,20}", 0..16),
            success in any::<bool>(),
        ) {
            let mut demux = Demultiplexer::new();
            let count = lines.len().to_string();
            let status = if success { SUCCESS } else { ERROR };

            let mut input = vec!["BEGIN", "LIST", status, "DATA", count.as_str()];
            input.extend(lines.iter().map(String::as_str));
            input.push("END");

            let messages = demux.feed_lines(input);
            prop_assert_eq!(messages.len(), 1);
            match &messages[0] {
                Message::Reply(reply) => {
                    prop_assert_eq!(reply.success, success);
                    prop_assert_eq!(reply.data_length, lines.len());
                    prop_assert_eq!(&reply.data, &lines);
                }
                Message::Event(_) => prop_assert!(false, "unexpected event"),
            }
        }
    }
}
