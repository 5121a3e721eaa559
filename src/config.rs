use crate::error::ConfigError;
use crate::grid::Grid;

pub const MIN_GRID_SIDE: u16 = 3;
pub const MAX_GRID_SIDE: u16 = 1000;

const WORLD_WIDTH: u32 = 800;
const WORLD_HEIGHT: u32 = 600;
const CELL_SIZE: u32 = 20;

/// Grid dimensions and difficulty constants for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub grid_width: u16,
    pub grid_height: u16,
    /// Steps per second at score 0
    pub base_rate: u32,
    pub max_rate: u32,
    /// Rate added per threshold crossed
    pub increment: u32,
    pub score_threshold: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_world(WORLD_WIDTH, WORLD_HEIGHT, CELL_SIZE)
    }
}

impl GameConfig {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    pub fn from_world(world_width: u32, world_height: u32, cell_size: u32) -> Self {
        let grid = Grid::from_world(world_width, world_height, cell_size);
        Self {
            grid_width: grid.width() as u16,
            grid_height: grid.height() as u16,
            base_rate: 8,
            max_rate: 20,
            increment: 1,
            score_threshold: 50,
        }
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < MIN_GRID_SIDE || self.grid_height < MIN_GRID_SIDE {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
                min: MIN_GRID_SIDE,
            });
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                max: MAX_GRID_SIDE,
            });
        }
        if self.base_rate == 0 {
            return Err(ConfigError::ZeroBaseRate);
        }
        if self.base_rate > self.max_rate {
            return Err(ConfigError::RateBoundsInverted { base: self.base_rate, max: self.max_rate });
        }
        if self.increment == 0 {
            return Err(ConfigError::ZeroIncrement);
        }
        if self.score_threshold == 0 {
            return Err(ConfigError::ZeroScoreThreshold);
        }
        Ok(())
    }
}
