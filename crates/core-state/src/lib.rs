//! Editor state: the document plus the one-line status message.
//!
//! The status message reports the outcome of save/open (or their
//! cancellation). It is set by the dispatcher, drawn by `core-render` below
//! the document, and cleared when the next handled key arrives.

use core_text::Document;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

impl MessageKind {
    pub fn label(&self) -> &'static str {
        match self {
            MessageKind::Info => "Info",
            MessageKind::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.label(), self.text)
    }
}

/// Top-level editor state container (single document).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub document: Document,
    pub status: Option<StatusMessage>,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            status: None,
        }
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::info(text));
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::error(text));
    }

    /// Drop the current message; returns whether one was present.
    pub fn clear_status(&mut self) -> bool {
        self.status.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lifecycle() {
        let mut st = EditorState::new();
        assert!(st.status.is_none());
        st.set_info("File loaded: a.txt");
        assert_eq!(
            st.status.as_ref().map(ToString::to_string).as_deref(),
            Some("[Info] File loaded: a.txt")
        );
        st.set_error("boom");
        assert_eq!(st.status.as_ref().unwrap().kind, MessageKind::Error);
        assert!(st.clear_status());
        assert!(!st.clear_status());
    }

    #[test]
    fn new_state_has_blank_document() {
        let st = EditorState::new();
        assert!(st.document.is_blank());
    }
}
