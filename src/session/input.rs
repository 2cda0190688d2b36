use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Engine-level action decoded from a raw key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Type(char),
    Backspace { whole_word: bool },
    /// Enter or Esc: start a new round (or dismiss results).
    Reset,
    /// Tab: switch difficulty, which also starts a new round.
    ToggleDifficulty,
}

/// Map a key press to an engine action. Returns `None` for anything the
/// engine should ignore: modified characters, navigation keys, function
/// keys. Ctrl-C is handled by the caller before this runs.
pub fn classify(key: &KeyEvent) -> Option<InputAction> {
    let word_mods = KeyModifiers::CONTROL | KeyModifiers::ALT;
    match key.code {
        KeyCode::Enter | KeyCode::Esc => Some(InputAction::Reset),
        KeyCode::Tab => Some(InputAction::ToggleDifficulty),
        KeyCode::Backspace => Some(InputAction::Backspace {
            whole_word: key.modifiers.intersects(word_mods),
        }),
        // Ctrl-W is the usual terminal word-delete
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputAction::Backspace { whole_word: true })
        }
        KeyCode::Char(ch) => {
            if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                None
            } else {
                Some(InputAction::Type(ch))
            }
        }
        _ => None,
    }
}
