use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    PageLeft,
    PageRight,
    FirstPage,
    LastPage,
    ToggleReadingMode,
    /// Zoom the current image one level, as a double tap at its centre would
    Zoom,
    /// Reload the gallery from scratch
    Reload,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, keymap: &Keymap) -> Action {
    if let Some(action) = keymap.get(&KeyBinding::new(key.code, key.modifiers)) {
        return *action;
    }

    // Some terminals report uppercase letters without SHIFT
    if let KeyCode::Char(c) = key.code {
        if c.is_ascii_uppercase() && key.modifiers == KeyModifiers::NONE {
            if let Some(action) = keymap.get(&KeyBinding::shift(key.code)) {
                return *action;
            }
        }
    }

    Action::None
}
