//! Raw keyboard decoding.
//!
//! `KeyDecoder` turns the byte stream of a terminal in raw mode into one
//! `KeyEvent` per call. The only multi-byte sequences recognized are the
//! cursor keys `ESC [ A|B|C|D`.
//!
//! ESC disambiguation: after an ESC byte the decoder polls the source with a
//! short bounded wait. If nothing follows in time the key is a plain Escape.
//! A producer slower than that window (e.g. a sequence typed by hand or split
//! across network packets) decodes as Escape followed by ordinary bytes; this
//! is an accepted limitation. Bytes consumed while rejecting an unknown
//! sequence are dropped.
//!
//! End of input and read failures decode as `Escape` so the edit loop exits
//! instead of spinning or blocking forever.

mod source;

pub use source::{ByteSource, ScriptedSource, StdinSource};

use core_events::{ESC, KeyEvent};
use std::time::Duration;

/// Default bounded wait used to decide whether an ESC starts a sequence.
pub const DEFAULT_ESCAPE_TIMEOUT: Duration = Duration::from_millis(10);

pub struct KeyDecoder<S> {
    source: S,
    escape_timeout: Duration,
}

impl<S: ByteSource> KeyDecoder<S> {
    pub fn new(source: S) -> Self {
        Self::with_escape_timeout(source, DEFAULT_ESCAPE_TIMEOUT)
    }

    pub fn with_escape_timeout(source: S, escape_timeout: Duration) -> Self {
        Self {
            source,
            escape_timeout,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Block for the next key. Never fails; exhaustion yields `Escape`.
    pub fn next_event(&mut self) -> KeyEvent {
        let byte = match self.source.read_byte() {
            Ok(Some(b)) => b,
            Ok(None) => {
                tracing::debug!(target: "input", "eof");
                return KeyEvent::Escape;
            }
            Err(e) => {
                tracing::warn!(target: "input", ?e, "read_failed");
                return KeyEvent::Escape;
            }
        };
        let event = if byte == ESC {
            self.decode_escape()
        } else {
            KeyEvent::from_byte(byte)
        };
        log_key(&event);
        event
    }

    fn decode_escape(&mut self) -> KeyEvent {
        match self.poll() {
            None => KeyEvent::Escape,
            Some(b'[') => match self.poll() {
                Some(final_byte) => KeyEvent::from_csi_final(final_byte).unwrap_or_else(|| {
                    tracing::trace!(target: "input", dropped = 2, "unknown_sequence");
                    KeyEvent::Escape
                }),
                None => {
                    tracing::trace!(target: "input", dropped = 1, "truncated_sequence");
                    KeyEvent::Escape
                }
            },
            Some(_) => {
                tracing::trace!(target: "input", dropped = 1, "unknown_sequence");
                KeyEvent::Escape
            }
        }
    }

    fn poll(&mut self) -> Option<u8> {
        match self.source.poll_byte(self.escape_timeout) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(target: "input", ?e, "poll_failed");
                None
            }
        }
    }
}

/// Typed characters are document content; only the kind of key is logged.
#[inline]
pub(crate) fn log_key(event: &KeyEvent) {
    let kind = match event {
        KeyEvent::Character(_) => "character",
        KeyEvent::Other(_) => "other",
        KeyEvent::Enter => "enter",
        KeyEvent::Backspace => "backspace",
        KeyEvent::Escape => "escape",
        KeyEvent::SaveShortcut => "save",
        KeyEvent::OpenShortcut => "open",
        KeyEvent::ArrowUp | KeyEvent::ArrowDown | KeyEvent::ArrowLeft | KeyEvent::ArrowRight => {
            "arrow"
        }
    };
    tracing::trace!(target: "input", kind, "key");
}
