//! Core event types for FastBox.
//!
//! A `KeyEvent` is produced by the decoder in `core-input` and consumed within
//! the same loop iteration by the controller in `core-actions`. It is never
//! stored. Keeping it in its own crate lets both sides depend on the type
//! without depending on each other.

/// Byte value of the escape key / CSI introducer.
pub const ESC: u8 = 27;
/// Ctrl+S.
pub const CTRL_S: u8 = 19;
/// Ctrl+O.
pub const CTRL_O: u8 = 15;

/// Decoded, logical representation of one keystroke or key sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// Printable ASCII (32..=126).
    Character(u8),
    Enter,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// Plain escape; also emitted when input is exhausted so the loop terminates.
    Escape,
    SaveShortcut,
    OpenShortcut,
    /// Any byte with no meaning to the editor. Ignored without a redraw.
    Other(u8),
}

impl KeyEvent {
    /// Classify a single byte that is not part of an escape sequence.
    ///
    /// `ESC` itself maps to `Escape`; callers that want arrow-key recognition
    /// must inspect the follow-up bytes before falling back to this.
    pub fn from_byte(b: u8) -> Self {
        match b {
            32..=126 => KeyEvent::Character(b),
            b'\r' | b'\n' => KeyEvent::Enter,
            8 | 127 => KeyEvent::Backspace,
            CTRL_S => KeyEvent::SaveShortcut,
            CTRL_O => KeyEvent::OpenShortcut,
            ESC => KeyEvent::Escape,
            other => KeyEvent::Other(other),
        }
    }

    /// Final byte of a `ESC [ x` cursor key sequence.
    pub fn from_csi_final(b: u8) -> Option<Self> {
        match b {
            b'A' => Some(KeyEvent::ArrowUp),
            b'B' => Some(KeyEvent::ArrowDown),
            b'C' => Some(KeyEvent::ArrowRight),
            b'D' => Some(KeyEvent::ArrowLeft),
            _ => None,
        }
    }
}
