//! Stateless KeyEvent -> Action mapping.
//!
//! The match is exhaustive over `KeyEvent`, so adding a key kind forces a
//! decision here. `Other` bytes map to no action: the loop neither mutates
//! state nor redraws for them.

use crate::{Action, EditKind};
use core_events::KeyEvent;
use core_text::Direction;

pub fn translate_key(key: KeyEvent) -> Option<Action> {
    let action = match key {
        KeyEvent::Character(c) => Action::Edit(EditKind::Insert(c)),
        KeyEvent::Enter => Action::Edit(EditKind::SplitLine),
        KeyEvent::Backspace => Action::Edit(EditKind::DeleteBackward),
        KeyEvent::ArrowUp => Action::Motion(Direction::Up),
        KeyEvent::ArrowDown => Action::Motion(Direction::Down),
        KeyEvent::ArrowLeft => Action::Motion(Direction::Left),
        KeyEvent::ArrowRight => Action::Motion(Direction::Right),
        KeyEvent::SaveShortcut => Action::Save,
        KeyEvent::OpenShortcut => Action::Open,
        KeyEvent::Escape => Action::Quit,
        KeyEvent::Other(_) => return None,
    };
    Some(action)
}
