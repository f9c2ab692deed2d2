//! Input handling - convert key events to viewer commands

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use mw_core::Direction;

/// Something the user asked the viewer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the avatar one cell
    Move(Direction),
    /// Throw away the current map and start over with a fresh seed
    Regenerate,
    /// Finish the current run without animating
    Skip,
    Quit,
}

/// Convert a key event to a command.
///
/// Vi keys and arrows move. Up is toward the top of the screen, which is the
/// highest row of the grid.
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('h') | KeyCode::Left => Some(Command::Move(Direction::Left)),
        KeyCode::Char('j') | KeyCode::Down => Some(Command::Move(Direction::Down)),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::Move(Direction::Up)),
        KeyCode::Char('l') | KeyCode::Right => Some(Command::Move(Direction::Right)),

        KeyCode::Char('r') => Some(Command::Regenerate),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Command::Skip),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
