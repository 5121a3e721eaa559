use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use log::info;
use rand::Rng;

use arcade_snake::{Cell, Direction, EndReason, GameSession, Phase, StepOutcome};

use crate::input::Command;
use crate::term::{Coords, TermInt, TermManager};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';
const EMPTY_CHAR: char = ' ';

/// Terminal front-end: draws a [`GameSession`] and feeds it key presses and ticks.
pub struct SnakeGame<R> {
    session: GameSession<R>,
    term: TermManager,
    paused: bool,
    origin: Coords,
}

impl<R: Rng> SnakeGame<R> {
    pub fn new(session: GameSession<R>) -> Result<Self> {
        let term = TermManager::new().context("Failed to read terminal size")?;

        let (term_w, term_h) = term.size();
        let (board_w, board_h) = board_size(&session);
        if board_w > term_w || board_h > term_h {
            bail!(
                "terminal is {}x{} but a {}x{} grid needs at least {}x{}",
                term_w, term_h, session.grid().width(), session.grid().height(), board_w, board_h
            );
        }

        let origin = ((term_w - board_w) / 2, (term_h - board_h) / 2);
        Ok(SnakeGame { session, term, paused: false, origin })
    }

    /// Runs until the player quits, restoring the terminal on the way out.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup().context("Failed to set up terminal")?;
        let result = self.main_loop();
        self.term.restore().context("Failed to restore terminal")?;
        result
    }

    fn main_loop(&mut self) -> Result<()> {
        self.term.clear()?;
        self.draw_frame()?;

        loop {
            let keep_going = match self.session.phase() {
                Phase::AwaitingStart => self.show_intro()?,
                Phase::Playing => self.play()?,
                Phase::GameOver => self.game_over()?,
            };

            if !keep_going {
                info!("player quit");
                return Ok(());
            }
        }
    }

    fn show_intro(&mut self) -> Result<bool> {
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "q or CTRL+C to quit",
            "",
            "Press Space to begin",
        ])?;

        self.wait_for_confirm()
    }

    fn play(&mut self) -> Result<bool> {
        let mut last_step = Instant::now();

        loop {
            for key_ev in self.term.read_key_events_queue(POLL_INTERVAL)? {
                match Command::from_key_event(&key_ev) {
                    Some(Command::Quit) => return Ok(false),
                    Some(Command::Pause) => self.toggle_pause()?,
                    Some(Command::Turn(dir)) if !self.paused => self.session.submit_direction(dir)?,
                    _ => {}
                }
            }

            if self.paused || last_step.elapsed() < self.session.tick_interval() {
                continue;
            }

            last_step = Instant::now();
            let outcome = self.session.step()?;
            self.render()?;

            if let StepOutcome::Ended(_) = outcome {
                return Ok(true);
            }
        }
    }

    fn game_over(&mut self) -> Result<bool> {
        let won = self.session.end_reason() == Some(EndReason::BoardFull);

        if !won {
            let body: Vec<Cell> = self.session.body_cells().iter().copied().collect();
            for cell in body {
                let pos = self.to_screen(cell);
                self.term.print_at(pos, DEAD_SNAKE_CHAR)?;
            }
        }

        let title = if won {"You won!"} else {"Game over!"};
        let score = format!("Score: {}", self.session.score());
        self.term.show_message(&[
            title,
            &score,
            "",
            "Press Space to play again,",
            "or q to quit.",
        ])?;

        self.wait_for_confirm()
    }

    /// Blocks until the player confirms (restarting the session) or quits.
    fn wait_for_confirm(&mut self) -> Result<bool> {
        loop {
            match Command::from_key_event(&self.term.read_key_blocking()?) {
                Some(Command::Quit) => return Ok(false),
                Some(Command::Confirm) => break,
                _ => {}
            }
        }

        self.term.hide_message()?;
        self.session.restart()?;
        self.paused = false;
        self.render()?;
        Ok(true)
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or q to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_frame(&mut self) -> Result<()> {
        let size = board_size(&self.session);
        self.term.draw_borders(self.origin, size)?;
        self.render()
    }

    fn render(&mut self) -> Result<()> {
        let grid = *self.session.grid();
        let head = self.session.body_cells()[0];
        let food = self.session.food_cell();

        for cell in grid.cells() {
            let ch = if cell == head {
                head_char(self.session.direction())
            } else if self.session.body_cells().contains(&cell) {
                SNAKE_BODY_CHAR
            } else if cell == food {
                FOOD_CHAR
            } else {
                EMPTY_CHAR
            };
            let pos = self.to_screen(cell);
            self.term.print_at(pos, ch)?;
        }

        self.draw_hud()?;
        self.term.flush()
    }

    /// Score and speed level, written into the top border when it fits.
    fn draw_hud(&mut self) -> Result<()> {
        let level = self.session.current_tick_rate() - self.session.difficulty().base_rate() + 1;
        let hud = format!(" Score: {:<5} Speed: {:<2} ", self.session.score(), level);

        let (board_w, _) = board_size(&self.session);
        if hud.chars().count() as TermInt + 2 <= board_w {
            self.term.print_str_at((self.origin.0 + 1, self.origin.1), &hud)?;
        }
        Ok(())
    }

    fn to_screen(&self, cell: Cell) -> Coords {
        (
            self.origin.0 + 1 + cell.col as TermInt,
            self.origin.1 + 1 + cell.row as TermInt,
        )
    }
}

/// Terminal footprint of the grid including its border.
fn board_size<R>(session: &GameSession<R>) -> Coords {
    let grid = session.grid();
    let side = |len: i32| (len.max(0) as TermInt).saturating_add(2);
    (side(grid.width()), side(grid.height()))
}

fn head_char(direction: Direction) -> char {
    match direction {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}
