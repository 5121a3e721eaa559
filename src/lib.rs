//! Simulation core for a single-player snake game.
//!
//! The core is free of any terminal or rendering code: a driver owns the
//! clock, calls [`GameSession::step`] once per tick and draws from the
//! session's accessors.

pub mod config;
pub mod difficulty;
pub mod error;
pub mod food;
pub mod grid;
pub mod session;
pub mod snake;

pub use config::GameConfig;
pub use difficulty::Difficulty;
pub use error::{ConfigError, PlacementError, SessionError};
pub use food::Food;
pub use grid::{Cell, Grid};
pub use session::{EndReason, GameSession, Phase, StepOutcome};
pub use snake::{Collision, Direction, MoveResult, Snake};
