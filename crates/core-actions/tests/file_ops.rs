mod common;
use common::*;

use core_actions::{EditController, FsGateway, MemoryGateway, ScriptedPrompt};
use core_events::KeyEvent;
use core_state::{EditorState, MessageKind};

fn status(c: &TestController) -> Option<(MessageKind, String)> {
    c.state().status.as_ref().map(|m| (m.kind, m.text.clone()))
}

#[test]
fn cancelled_save_changes_nothing() {
    let mut c = controller_with(
        &["keep"],
        0,
        4,
        MemoryGateway::new(),
        ScriptedPrompt::new().cancel(),
    );
    let result = c.handle_key(KeyEvent::SaveShortcut);
    assert!(result.dirty);
    assert_eq!(text(&c), vec!["keep"]);
    assert_eq!(cursor(&c), (0, 4));
    assert_eq!(
        status(&c),
        Some((MessageKind::Info, "Saving cancelled.".to_string()))
    );
}

#[test]
fn empty_name_is_a_cancellation() {
    let mut c = controller_with(
        &["keep"],
        0,
        0,
        MemoryGateway::new(),
        ScriptedPrompt::new().answer(""),
    );
    c.handle_key(KeyEvent::OpenShortcut);
    assert_eq!(text(&c), vec!["keep"]);
    assert_eq!(
        status(&c),
        Some((MessageKind::Info, "Loading cancelled.".to_string()))
    );
}

#[test]
fn failed_save_leaves_document_untouched() {
    let mut c = controller_with(
        &["a", "b"],
        1,
        1,
        MemoryGateway::new().read_only(),
        ScriptedPrompt::new().answer("out.txt"),
    );
    c.handle_key(KeyEvent::SaveShortcut);
    assert_eq!(text(&c), vec!["a", "b"]);
    assert_eq!(cursor(&c), (1, 1));
    let (kind, msg) = status(&c).unwrap();
    assert_eq!(kind, MessageKind::Error);
    assert!(msg.contains("out.txt"), "{msg}");
}

#[test]
fn successful_save_reports_name() {
    let mut c = controller_with(
        &["a"],
        0,
        1,
        MemoryGateway::new(),
        ScriptedPrompt::new().answer("n.txt"),
    );
    c.handle_key(KeyEvent::SaveShortcut);
    assert_eq!(
        status(&c),
        Some((MessageKind::Info, "File has been saved: n.txt".to_string()))
    );
    // The next key clears the report.
    c.handle_key(KeyEvent::Character(b'z'));
    assert_eq!(status(&c), None);
}

#[test]
fn open_replaces_document_and_resets_cursor() {
    let gw = MemoryGateway::new().with_file("in.txt", "first\nsecond\n");
    let mut c = controller_with(&["old"], 0, 3, gw, ScriptedPrompt::new().answer("in.txt"));
    c.handle_key(KeyEvent::OpenShortcut);
    assert_eq!(text(&c), vec!["first", "second"]);
    assert_eq!(cursor(&c), (0, 0));
    assert_eq!(
        status(&c),
        Some((MessageKind::Info, "File loaded: in.txt".to_string()))
    );
}

#[test]
fn open_empty_file_yields_single_blank_line() {
    let gw = MemoryGateway::new().with_file("empty.txt", "");
    let mut c = controller_with(&["old"], 0, 3, gw, ScriptedPrompt::new().answer("empty.txt"));
    c.handle_key(KeyEvent::OpenShortcut);
    assert_eq!(text(&c), vec![""]);
    assert_eq!(cursor(&c), (0, 0));
}

#[test]
fn failed_open_leaves_document_untouched() {
    let mut c = controller_with(
        &["old", "doc"],
        1,
        2,
        MemoryGateway::new(),
        ScriptedPrompt::new().answer("missing.txt"),
    );
    c.handle_key(KeyEvent::OpenShortcut);
    assert_eq!(text(&c), vec!["old", "doc"]);
    assert_eq!(cursor(&c), (1, 2));
    let (kind, msg) = status(&c).unwrap();
    assert_eq!(kind, MessageKind::Error);
    assert!(msg.starts_with("Loading failed."), "{msg}");
}

#[test]
fn prompt_failure_is_reported_not_fatal() {
    let mut c = controller_with(
        &["x"],
        0,
        1,
        MemoryGateway::new(),
        ScriptedPrompt::new().fail("stdin closed"),
    );
    let result = c.handle_key(KeyEvent::SaveShortcut);
    assert!(!result.quit);
    assert_eq!(text(&c), vec!["x"]);
    let (kind, msg) = status(&c).unwrap();
    assert_eq!(kind, MessageKind::Error);
    assert!(msg.contains("stdin closed"));
}

#[test]
fn prompt_is_drawn_below_document() {
    let mut c = controller_with(
        &["a", "b", "c"],
        0,
        0,
        MemoryGateway::new(),
        ScriptedPrompt::new(),
    );
    c.handle_key(KeyEvent::SaveShortcut);
    c.handle_key(KeyEvent::OpenShortcut);
    assert_eq!(
        c.prompt().asked(),
        &[("Save as".to_string(), 5), ("Open file".to_string(), 5)]
    );
}

#[test]
fn save_then_open_round_trips_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.txt");
    let name = path.to_string_lossy().into_owned();
    let prompt = ScriptedPrompt::new().answer(name.clone()).answer(name);
    let mut c = EditController::new(EditorState::new(), FsGateway, prompt);
    for b in b"alpha" {
        c.handle_key(KeyEvent::Character(*b));
    }
    c.handle_key(KeyEvent::Enter);
    c.handle_key(KeyEvent::Enter);
    for b in b"gamma" {
        c.handle_key(KeyEvent::Character(*b));
    }
    c.handle_key(KeyEvent::SaveShortcut);
    assert!(c.state().document.is_blank());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "alpha\n\ngamma\n");

    c.handle_key(KeyEvent::OpenShortcut);
    let lines: Vec<&[u8]> = c
        .state()
        .document
        .lines()
        .iter()
        .map(Vec::as_slice)
        .collect();
    assert_eq!(lines, vec![&b"alpha"[..], b"", b"gamma"]);
}

#[test]
fn blank_document_round_trips() {
    let prompt = ScriptedPrompt::new().answer("blank.txt").answer("blank.txt");
    let mut c = controller_with(&[""], 0, 0, MemoryGateway::new(), prompt);
    c.handle_key(KeyEvent::SaveShortcut);
    c.handle_key(KeyEvent::OpenShortcut);
    assert_eq!(text(&c), vec![""]);
}

#[test]
fn open_on_startup_path() {
    let gw = MemoryGateway::new().with_file("start.txt", "hello\n");
    let mut c = controller_with(&[""], 0, 0, gw, ScriptedPrompt::new());
    assert!(c.open(std::path::Path::new("start.txt")));
    assert_eq!(text(&c), vec!["hello"]);
    assert!(!c.open(std::path::Path::new("absent.txt")));
    assert_eq!(text(&c), vec!["hello"]);
}
