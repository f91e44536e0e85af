//! Key-to-action translation, dispatch and the edit loop.
//!
//! Flow per key: `KeyDecoder::next_event` -> `translate_key` -> `dispatch`
//! -> (maybe) `Renderer::draw`. `EditController` owns the state and the two
//! external collaborators (persistence and the file name prompt) for the
//! duration of a session.

pub mod controller;
pub mod dispatcher;
pub mod io_ops;
pub mod key_translator;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use controller::{EditController, SessionStats};
pub use dispatcher::{DispatchResult, dispatch};
pub use io_ops::{FsGateway, PersistenceError, PersistenceGateway, join_lines, split_lines};
pub use key_translator::translate_key;
#[cfg(any(test, feature = "test-util"))]
pub use testing::{MemoryGateway, ScriptedPrompt};

use core_text::Direction;

/// Document mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Insert(u8),
    SplitLine,
    DeleteBackward,
}

/// Everything a key can ask the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit(EditKind),
    Motion(Direction),
    Save,
    Open,
    Quit,
}

/// Source of file names for save/open.
pub trait Prompt {
    /// Ask for one line of input shown as `label` at screen `row`.
    /// `Ok(None)` (or an empty string) means the user cancelled.
    fn ask(&mut self, label: &str, row: u16) -> anyhow::Result<Option<String>>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn ask(&mut self, label: &str, row: u16) -> anyhow::Result<Option<String>> {
        (**self).ask(label, row)
    }
}
