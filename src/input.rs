use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use arcade_snake::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Confirm,
    Pause,
    Quit,
}

impl Command {
    pub fn from_key_event(ev: &KeyEvent) -> Option<Command> {
        if is_ctrl_c(ev) {
            return Some(Command::Quit);
        }

        match ev.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Command::Turn(Direction::Up)),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Command::Turn(Direction::Left)),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Command::Turn(Direction::Down)),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Command::Turn(Direction::Right)),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Command::Confirm),
            KeyCode::Esc => Some(Command::Pause),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
            _ => None,
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
