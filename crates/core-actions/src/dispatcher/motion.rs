//! Motion sub-dispatch (cursor movement).
//!
//! Boundary motions are silent no-ops in the document but still count as
//! handled keys, so they redraw like any other arrow press.

use super::DispatchResult;
use core_state::EditorState;
use core_text::Direction;

pub(crate) fn handle_motion(dir: Direction, state: &mut EditorState) -> DispatchResult {
    let before = state.document.cursor();
    state.document.move_cursor(dir);
    let after = state.document.cursor();
    tracing::trace!(target: "actions.dispatch", ?dir, line=before.line, byte=before.byte, to_line=after.line, to_byte=after.byte, "motion");
    DispatchResult::dirty()
}
