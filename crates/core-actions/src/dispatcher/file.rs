//! Save / open sub-routines.
//!
//! Both ask the prompt for a file name first. An empty answer cancels with
//! an informational message and no state change. Persistence failures are
//! reported as an error message and leave the document exactly as it was.
//! A successful save resets the document to a single empty line.

use super::DispatchResult;
use crate::{PersistenceGateway, Prompt};
use core_render::prompt_row;
use core_state::EditorState;
use std::path::Path;

enum Asked {
    Name(String),
    Cancelled,
    Failed,
}

fn ask<P: Prompt + ?Sized>(prompt: &mut P, label: &str, state: &mut EditorState) -> Asked {
    let row = prompt_row(state);
    match prompt.ask(label, row) {
        Ok(Some(name)) if !name.is_empty() => Asked::Name(name),
        Ok(_) => Asked::Cancelled,
        Err(e) => {
            tracing::warn!(target: "actions.dispatch", error = %e, label, "prompt_failed");
            state.set_error(format!("Could not read file name: {e:#}"));
            Asked::Failed
        }
    }
}

pub(crate) fn handle_save<G, P>(
    state: &mut EditorState,
    gateway: &mut G,
    prompt: &mut P,
) -> DispatchResult
where
    G: PersistenceGateway + ?Sized,
    P: Prompt + ?Sized,
{
    let name = match ask(prompt, "Save as", state) {
        Asked::Name(name) => name,
        Asked::Cancelled => {
            state.set_info("Saving cancelled.");
            return DispatchResult::dirty();
        }
        Asked::Failed => return DispatchResult::dirty(),
    };
    match gateway.save(Path::new(&name), state.document.lines()) {
        Ok(()) => {
            tracing::info!(target: "io", lines = state.document.line_count(), "document_saved");
            state.document.reset();
            state.set_info(format!("File has been saved: {name}"));
        }
        Err(e) => state.set_error(e.to_string()),
    }
    DispatchResult::dirty()
}

pub(crate) fn handle_open<G, P>(
    state: &mut EditorState,
    gateway: &mut G,
    prompt: &mut P,
) -> DispatchResult
where
    G: PersistenceGateway + ?Sized,
    P: Prompt + ?Sized,
{
    match ask(prompt, "Open file", state) {
        Asked::Name(name) => {
            open_path(state, gateway, Path::new(&name));
        }
        Asked::Cancelled => state.set_info("Loading cancelled."),
        Asked::Failed => {}
    }
    DispatchResult::dirty()
}

/// Replace the document with the content of `path`, reporting the outcome in
/// the status message. Returns whether the load succeeded.
pub fn open_path<G>(state: &mut EditorState, gateway: &mut G, path: &Path) -> bool
where
    G: PersistenceGateway + ?Sized,
{
    match gateway.load(path) {
        Ok(lines) => {
            state.document.replace_lines(lines);
            tracing::info!(target: "io", lines = state.document.line_count(), "document_loaded");
            state.set_info(format!("File loaded: {}", path.display()));
            true
        }
        Err(e) => {
            state.set_error(e.to_string());
            false
        }
    }
}
