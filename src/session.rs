use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, info, trace};
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::GameConfig;
use crate::difficulty::Difficulty;
use crate::error::SessionError;
use crate::food::Food;
use crate::grid::{Cell, Grid};
use crate::snake::{Collision, Direction, MoveResult, Snake};

pub const FOOD_SCORE: u32 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingStart,
    Playing,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndReason {
    Crashed(Collision),
    /// The snake covers every cell, so there is nowhere left to put food.
    BoardFull,
}

/// What a single step did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate { score: u32 },
    Ended(EndReason),
}

/// One play-through: owns the snake, the food and the score.
///
/// The session has no notion of wall-clock time. A driver calls [`step`]
/// once every [`tick_interval`] and renders from the accessors in between.
///
/// [`step`]: GameSession::step
/// [`tick_interval`]: GameSession::tick_interval
pub struct GameSession<R = ThreadRng> {
    grid: Grid,
    difficulty: Difficulty,
    rng: R,
    phase: Phase,
    end_reason: Option<EndReason>,
    snake: Snake,
    food: Food,
    score: u32,
    tick_rate: u32,
    pending_direction: Option<Direction>,
}

impl GameSession<ThreadRng> {
    pub fn new(config: GameConfig) -> Result<Self, SessionError> {
        GameSession::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameSession<R> {
    /// Builds a session waiting to be started. Snake and food are already laid
    /// out so a start screen can draw them.
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, SessionError> {
        config.validate()?;

        let grid = config.grid();
        let difficulty = Difficulty::from_config(&config);
        let snake = Snake::centered(&grid);
        let food = Food::spawn(&grid, snake.body(), &mut rng)?;

        Ok(GameSession {
            grid,
            difficulty,
            rng,
            phase: Phase::AwaitingStart,
            end_reason: None,
            snake,
            food,
            score: 0,
            tick_rate: difficulty.tick_rate(0),
            pending_direction: None,
        })
    }

    /// Starts a fresh play-through. Valid while awaiting start or after game over.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        if self.phase == Phase::Playing {
            return Err(SessionError::AlreadyPlaying);
        }

        let snake = Snake::centered(&self.grid);
        let food = Food::spawn(&self.grid, snake.body(), &mut self.rng)?;

        self.snake = snake;
        self.food = food;
        self.score = 0;
        self.tick_rate = self.difficulty.tick_rate(0);
        self.pending_direction = None;
        self.end_reason = None;
        self.phase = Phase::Playing;

        info!(
            "session started on a {}x{} grid at {} ticks/s",
            self.grid.width(),
            self.grid.height(),
            self.tick_rate
        );
        Ok(())
    }

    /// Buffers a turn for the next step. Only the latest call before a step counts.
    pub fn submit_direction(&mut self, direction: Direction) -> Result<(), SessionError> {
        self.ensure_playing()?;
        self.pending_direction = Some(direction);
        Ok(())
    }

    pub fn step(&mut self) -> Result<StepOutcome, SessionError> {
        self.ensure_playing()?;

        if let Some(direction) = self.pending_direction.take() {
            self.snake.change_direction(direction);
        }

        // Growth has to be known before the move so the tail stays put this tick
        let eating = self.snake.next_head() == self.food.position();
        if eating {
            self.snake.grow();
        }

        if let MoveResult::Collided(collision) = self.snake.step(&self.grid) {
            return Ok(self.finish(EndReason::Crashed(collision)));
        }

        if !eating {
            trace!("head moved to {}", self.snake.head());
            return Ok(StepOutcome::Moved);
        }

        self.score += FOOD_SCORE;
        debug!("food eaten at {}, score {}", self.snake.head(), self.score);

        let rate = self.difficulty.tick_rate(self.score);
        if rate != self.tick_rate {
            debug!("tick rate {} -> {}", self.tick_rate, rate);
            self.tick_rate = rate;
        }

        if let Err(err) = self.food.respawn(&self.grid, self.snake.body(), &mut self.rng) {
            debug!("{}", err);
            return Ok(self.finish(EndReason::BoardFull));
        }

        Ok(StepOutcome::Ate { score: self.score })
    }

    fn finish(&mut self, reason: EndReason) -> StepOutcome {
        self.phase = Phase::GameOver;
        self.end_reason = Some(reason);
        self.pending_direction = None;
        info!("game over ({:?}) with score {}", reason, self.score);
        StepOutcome::Ended(reason)
    }

    fn ensure_playing(&self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Playing => Ok(()),
            Phase::AwaitingStart => Err(SessionError::NotStarted),
            Phase::GameOver => Err(SessionError::GameOver),
        }
    }
}

impl<R> GameSession<R> {
    /// Head first.
    pub fn body_cells(&self) -> &VecDeque<Cell> {
        self.snake.body()
    }

    pub fn food_cell(&self) -> Cell {
        self.food.position()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Steps per second the driver should run at for the current score.
    pub fn current_tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn tick_interval(&self) -> Duration {
        self.difficulty.tick_interval(self.score)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn playing(width: u16, height: u16) -> GameSession<StdRng> {
        let mut session = GameSession::with_rng(GameConfig::new(width, height), StdRng::seed_from_u64(42)).unwrap();
        session.restart().unwrap();
        session
    }

    fn body(session: &GameSession<StdRng>) -> Vec<Cell> {
        session.body_cells().iter().copied().collect()
    }

    #[test]
    fn test_new_session_awaits_start() {
        let mut session = GameSession::with_rng(GameConfig::new(5, 5), StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(session.phase(), Phase::AwaitingStart);
        assert!(!session.is_game_over());
        assert_eq!(session.step(), Err(SessionError::NotStarted));
        assert_eq!(session.submit_direction(Direction::Up), Err(SessionError::NotStarted));
        assert!(!session.body_cells().contains(&session.food_cell()));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = GameSession::with_rng(GameConfig::new(2, 2), StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn test_step_moves_head_right() {
        let mut session = playing(5, 5);
        session.food = Food::at(Cell::new(0, 0));
        assert_eq!(body(&session), vec![Cell::new(2, 2), Cell::new(1, 2), Cell::new(0, 2)]);

        assert_eq!(session.step(), Ok(StepOutcome::Moved));

        assert_eq!(body(&session), vec![Cell::new(3, 2), Cell::new(2, 2), Cell::new(1, 2)]);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_eating_food_ahead() {
        let mut session = playing(5, 5);
        session.food = Food::at(Cell::new(3, 2));

        assert_eq!(session.step(), Ok(StepOutcome::Ate { score: 10 }));

        assert_eq!(session.score(), 10);
        assert_eq!(session.body_cells().len(), 4);
        assert_eq!(session.body_cells()[0], Cell::new(3, 2));
        assert!(!session.body_cells().contains(&session.food_cell()));
    }

    #[test]
    fn test_left_wall_ends_session() {
        let mut session = playing(5, 5);
        session.food = Food::at(Cell::new(4, 4));

        session.submit_direction(Direction::Up).unwrap();
        assert_eq!(session.step(), Ok(StepOutcome::Moved));
        session.submit_direction(Direction::Left).unwrap();
        assert_eq!(session.step(), Ok(StepOutcome::Moved));
        assert_eq!(session.step(), Ok(StepOutcome::Moved));
        assert_eq!(session.body_cells()[0], Cell::new(0, 1));

        assert_eq!(session.step(), Ok(StepOutcome::Ended(EndReason::Crashed(Collision::Wall))));
        assert!(session.is_game_over());
        assert_eq!(session.end_reason(), Some(EndReason::Crashed(Collision::Wall)));

        let frozen = body(&session);
        assert_eq!(session.step(), Err(SessionError::GameOver));
        assert_eq!(session.submit_direction(Direction::Down), Err(SessionError::GameOver));
        assert_eq!(body(&session), frozen);

        session.restart().unwrap();
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.end_reason(), None);
        assert_eq!(session.body_cells()[0], Cell::new(2, 2));
        assert!(session.step().is_ok());
    }

    #[test]
    fn test_restart_while_playing_is_rejected() {
        let mut session = playing(5, 5);
        assert_eq!(session.restart(), Err(SessionError::AlreadyPlaying));
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut session = playing(5, 5);
        session.food = Food::at(Cell::new(0, 0));

        session.submit_direction(Direction::Left).unwrap();
        session.step().unwrap();

        assert_eq!(session.direction(), Direction::Right);
        assert_eq!(session.body_cells()[0], Cell::new(3, 2));
    }

    #[test]
    fn test_last_submitted_direction_wins() {
        let mut session = playing(5, 5);
        session.food = Food::at(Cell::new(0, 0));

        session.submit_direction(Direction::Up).unwrap();
        session.submit_direction(Direction::Down).unwrap();
        session.step().unwrap();

        assert_eq!(session.body_cells()[0], Cell::new(2, 3));
    }

    #[test]
    fn test_tick_rate_follows_score() {
        let mut session = playing(10, 10);
        assert_eq!(session.current_tick_rate(), 8);
        assert_eq!(session.tick_interval(), Duration::from_millis(125));

        session.score = 40;
        session.food = Food::at(session.snake.next_head());
        session.step().unwrap();

        assert_eq!(session.score(), 50);
        assert_eq!(session.current_tick_rate(), 9);

        session.score = 0;
        session.phase = Phase::GameOver;
        session.restart().unwrap();
        assert_eq!(session.current_tick_rate(), 8);
    }

    #[test]
    fn test_filling_the_board_ends_session() {
        let mut session = playing(3, 3);
        let path = [(1, 0), (2, 0), (2, 1), (1, 1), (0, 1), (0, 2), (1, 2), (2, 2)];
        session.snake = Snake::from_cells(path.iter().copied().map(Cell::from).collect(), Direction::Left);
        session.food = Food::at(Cell::new(0, 0));

        assert_eq!(session.step(), Ok(StepOutcome::Ended(EndReason::BoardFull)));
        assert_eq!(session.score(), 10);
        assert_eq!(session.body_cells().len(), 9);
        assert!(session.is_game_over());
    }

    #[test]
    fn test_filling_the_board_updates_tick_rate() {
        let mut config = GameConfig::new(3, 3);
        config.score_threshold = 10;
        let mut session = GameSession::with_rng(config, StdRng::seed_from_u64(5)).unwrap();
        session.restart().unwrap();
        let path = [(1, 0), (2, 0), (2, 1), (1, 1), (0, 1), (0, 2), (1, 2), (2, 2)];
        session.snake = Snake::from_cells(path.iter().copied().map(Cell::from).collect(), Direction::Left);
        session.food = Food::at(Cell::new(0, 0));

        assert_eq!(session.step(), Ok(StepOutcome::Ended(EndReason::BoardFull)));
        assert_eq!(session.current_tick_rate(), 9);
        assert_eq!(session.current_tick_rate(), session.difficulty().tick_rate(session.score()));
        assert_eq!(session.tick_interval(), Duration::from_secs(1) / 9);
    }

    #[test]
    fn test_self_collision_ends_session() {
        let mut session = playing(10, 10);
        let path = [(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)];
        session.snake = Snake::from_cells(path.iter().copied().map(Cell::from).collect(), Direction::Left);
        session.food = Food::at(Cell::new(0, 0));

        session.submit_direction(Direction::Up).unwrap();

        assert_eq!(session.step(), Ok(StepOutcome::Ended(EndReason::Crashed(Collision::SelfBody))));
        assert_eq!(session.body_cells().len(), 5);
    }
}
