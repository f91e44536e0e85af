//! Text edit action handling (insert/split/backspace).
//!
//! Positions are logged, content is not.

use super::DispatchResult;
use crate::EditKind;
use core_state::EditorState;

pub(crate) fn handle_edit(kind: EditKind, state: &mut EditorState) -> DispatchResult {
    let doc = &mut state.document;
    let before = doc.cursor();
    let op = match kind {
        EditKind::Insert(c) => {
            doc.insert_char(c);
            "insert"
        }
        EditKind::SplitLine => {
            doc.split_line();
            "split_line"
        }
        EditKind::DeleteBackward => {
            doc.delete_backward();
            "delete_backward"
        }
    };
    let after = doc.cursor();
    tracing::trace!(target: "actions.dispatch", op, line=before.line, byte=before.byte, to_line=after.line, to_byte=after.byte, lines=doc.line_count(), "edit");
    DispatchResult::dirty()
}
