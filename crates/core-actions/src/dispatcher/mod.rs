//! Dispatcher applying `Action` to mutable editor state.
//!
//! Sub-modules:
//! * `edit`   - document mutation (insert/split/backspace)
//! * `motion` - cursor movement
//! * `file`   - save/open through the prompt and persistence gateway
//!
//! Every action first clears the previous status message, so a save/open
//! report stays visible only until the next handled key.

use crate::{Action, PersistenceGateway, Prompt};
use core_state::EditorState;

mod edit;
mod file;
mod motion;

pub use file::open_path;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// A redraw is required.
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: false,
            quit: true,
        }
    }
}

/// Apply an action to editor state. Returns `DispatchResult` describing whether
/// a render is needed (`dirty`) or the editor should exit (`quit`).
pub fn dispatch<G, P>(
    action: Action,
    state: &mut EditorState,
    gateway: &mut G,
    prompt: &mut P,
) -> DispatchResult
where
    G: PersistenceGateway + ?Sized,
    P: Prompt + ?Sized,
{
    if matches!(action, Action::Quit) {
        tracing::debug!(target: "actions.dispatch", "quit");
        return DispatchResult::quit();
    }
    state.clear_status();
    let result = match action {
        Action::Edit(kind) => edit::handle_edit(kind, state),
        Action::Motion(dir) => motion::handle_motion(dir, state),
        Action::Save => file::handle_save(state, gateway, prompt),
        Action::Open => file::handle_open(state, gateway, prompt),
        Action::Quit => DispatchResult::quit(),
    };
    debug_assert!(state.document.invariants_hold());
    result
}
