// Each test binary uses a subset of these helpers.
#![allow(dead_code)]

use core_actions::{EditController, MemoryGateway, ScriptedPrompt};
use core_events::KeyEvent;
use core_state::EditorState;
use core_text::{Document, Position};

pub type TestController = EditController<MemoryGateway, ScriptedPrompt>;

pub fn controller(lines: &[&str], line: usize, byte: usize) -> TestController {
    controller_with(lines, line, byte, MemoryGateway::new(), ScriptedPrompt::new())
}

pub fn controller_with(
    lines: &[&str],
    line: usize,
    byte: usize,
    gateway: MemoryGateway,
    prompt: ScriptedPrompt,
) -> TestController {
    let doc = Document::with_cursor(lines.iter().copied(), Position::new(line, byte));
    EditController::new(EditorState::with_document(doc), gateway, prompt)
}

pub fn press(c: &mut TestController, keys: &[KeyEvent]) {
    for key in keys {
        c.handle_key(*key);
    }
}

pub fn type_str(c: &mut TestController, s: &str) {
    for b in s.bytes() {
        c.handle_key(KeyEvent::Character(b));
    }
}

pub fn text(c: &TestController) -> Vec<String> {
    c.state()
        .document
        .lines()
        .iter()
        .map(|l| String::from_utf8_lossy(l).into_owned())
        .collect()
}

pub fn cursor(c: &TestController) -> (usize, usize) {
    let p = c.state().document.cursor();
    (p.line, p.byte)
}
