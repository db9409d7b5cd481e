//! Key bindings: wasd and arrows for moves, single letters for the rest.

use crate::engine::Direction;
use crate::session::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key event to a session command. Letters are case-insensitive.
pub fn key_to_command(key: KeyEvent) -> Command {
    let KeyEvent { code, modifiers, .. } = key;
    if modifiers == KeyModifiers::CONTROL {
        return match code {
            KeyCode::Char('c' | 'C') => Command::Quit,
            _ => Command::None,
        };
    }
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return Command::None;
    }
    match code {
        KeyCode::Up => Command::Move(Direction::Up),
        KeyCode::Left => Command::Move(Direction::Left),
        KeyCode::Down => Command::Move(Direction::Down),
        KeyCode::Right => Command::Move(Direction::Right),
        KeyCode::Esc => Command::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Command::Move(Direction::Up),
            'a' => Command::Move(Direction::Left),
            's' => Command::Move(Direction::Down),
            'd' => Command::Move(Direction::Right),
            'n' => Command::Preview,
            'r' => Command::Reset,
            'u' => Command::Undo,
            'v' => Command::Stats,
            'q' => Command::Quit,
            'y' => Command::Yes,
            _ => Command::None,
        },
        _ => Command::None,
    }
}

/// Startup prompt: `u` picks interactive play, anything else the driver.
pub fn is_user_mode_key(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('u' | 'U'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_move_keys() {
        assert_eq!(key_to_command(key(KeyCode::Char('w'))), Command::Move(Direction::Up));
        assert_eq!(key_to_command(key(KeyCode::Char('D'))), Command::Move(Direction::Right));
        assert_eq!(key_to_command(key(KeyCode::Left)), Command::Move(Direction::Left));
        assert_eq!(key_to_command(key(KeyCode::Down)), Command::Move(Direction::Down));
    }

    #[test]
    fn test_command_keys() {
        assert_eq!(key_to_command(key(KeyCode::Char('n'))), Command::Preview);
        assert_eq!(key_to_command(key(KeyCode::Char('r'))), Command::Reset);
        assert_eq!(key_to_command(key(KeyCode::Char('u'))), Command::Undo);
        assert_eq!(key_to_command(key(KeyCode::Char('v'))), Command::Stats);
        assert_eq!(key_to_command(key(KeyCode::Char('q'))), Command::Quit);
        assert_eq!(key_to_command(key(KeyCode::Esc)), Command::Quit);
        assert_eq!(
            key_to_command(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Command::Quit
        );
    }

    #[test]
    fn test_unbound_keys_ignored() {
        assert_eq!(key_to_command(key(KeyCode::Char('x'))), Command::None);
        assert_eq!(key_to_command(key(KeyCode::Enter)), Command::None);
        assert_eq!(
            key_to_command(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::ALT)),
            Command::None
        );
    }

    #[test]
    fn test_start_prompt_key() {
        assert!(is_user_mode_key(key(KeyCode::Char('u'))));
        assert!(!is_user_mode_key(key(KeyCode::Char('x'))));
        assert!(!is_user_mode_key(key(KeyCode::Enter)));
    }
}
