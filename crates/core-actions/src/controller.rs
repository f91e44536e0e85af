//! The synchronous edit loop.
//!
//! `run` draws once, then repeats: read key, translate, dispatch, redraw if
//! the dispatch asked for it. It returns when a `Quit` action is dispatched
//! (Escape, or input exhaustion which the decoder reports as Escape).
//! Only output failures end the loop with an error.

use crate::dispatcher::{self, DispatchResult, dispatch};
use crate::{PersistenceGateway, Prompt, translate_key};
use anyhow::Result;
use core_events::KeyEvent;
use core_input::{ByteSource, KeyDecoder};
use core_render::Renderer;
use core_state::EditorState;
use std::io::Write;
use std::path::Path;

pub struct EditController<G, P> {
    state: EditorState,
    gateway: G,
    prompt: P,
    renderer: Renderer,
}

/// Counters for one `run`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub keys: u64,
    pub ignored: u64,
    pub frames: u64,
}

impl<G: PersistenceGateway, P: Prompt> EditController<G, P> {
    pub fn new(state: EditorState, gateway: G, prompt: P) -> Self {
        Self {
            state,
            gateway,
            prompt,
            renderer: Renderer::new(),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Load `path` as the initial document (e.g. a path given on the command line).
    pub fn open(&mut self, path: &Path) -> bool {
        dispatcher::open_path(&mut self.state, &mut self.gateway, path)
    }

    /// Apply one key. `Other` bytes yield a clean result: no mutation, no redraw.
    pub fn handle_key(&mut self, key: KeyEvent) -> DispatchResult {
        match translate_key(key) {
            Some(action) => dispatch(action, &mut self.state, &mut self.gateway, &mut self.prompt),
            None => {
                tracing::trace!(target: "actions.dispatch", "ignored_key");
                DispatchResult::clean()
            }
        }
    }

    pub fn draw<W: Write>(&self, out: &mut W) -> Result<()> {
        self.renderer.draw(&self.state, out)
    }

    pub fn run<S: ByteSource, W: Write>(
        &mut self,
        decoder: &mut KeyDecoder<S>,
        out: &mut W,
    ) -> Result<SessionStats> {
        let mut stats = SessionStats::default();
        self.draw(out)?;
        stats.frames += 1;
        loop {
            let key = decoder.next_event();
            stats.keys += 1;
            let result = self.handle_key(key);
            if result.quit {
                break;
            }
            if result.dirty {
                self.draw(out)?;
                stats.frames += 1;
            } else {
                stats.ignored += 1;
            }
        }
        tracing::info!(target: "runtime", keys = stats.keys, ignored = stats.ignored, frames = stats.frames, "session_end");
        Ok(stats)
    }
}
