//! Key mapping from terminal events to game commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to a one-shot command.
///
/// Soft drop is not mapped here; it is a held key and goes through
/// [`crate::InputHandler`].
pub fn map_key_press(key: KeyEvent) -> Option<Command> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveRight),

        // Rotation
        KeyCode::Up | KeyCode::Char('e') | KeyCode::Char('E') => Some(Command::RotateCw),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::RotateCcw),

        // Session
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Enter => Some(Command::Start),

        _ => None,
    }
}

/// Keys that hold the soft drop.
pub fn is_soft_drop_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S'))
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}
