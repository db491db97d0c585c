use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => Self::steer(Direction::Up),
            KeyCode::Down => Self::steer(Direction::Down),
            KeyCode::Left => Self::steer(Direction::Left),
            KeyCode::Right => Self::steer(Direction::Right),

            KeyCode::Char('w') | KeyCode::Char('W') => Self::steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => Self::steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => Self::steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => Self::steer(Direction::Right),

            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                KeyAction::GameAction(Action::TogglePause)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }

    fn steer(direction: Direction) -> KeyAction {
        KeyAction::GameAction(Action::Steer(direction))
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
