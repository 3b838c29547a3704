//! Key mapping from terminal events to game inputs.

use crate::game::GameInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key event to a game input. Returns `None` for release and repeat
/// events so a held key only counts once.
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let input = match key.code {
        KeyCode::Char(' ') | KeyCode::Up => GameInput::Jump,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => GameInput::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => GameInput::Restart,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => GameInput::Quit,
        _ => GameInput::Other,
    };
    Some(input)
}
