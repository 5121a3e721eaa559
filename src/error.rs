use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no free cell left on a grid of {cells} cells")]
    NoFreeCell { cells: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must be at least {min}x{min}, got {width}x{height}")]
    GridTooSmall { width: u16, height: u16, min: u16 },
    #[error("grid must be at most {max}x{max}, got {width}x{height}")]
    GridTooLarge { width: u16, height: u16, max: u16 },
    #[error("base rate must be non-zero")]
    ZeroBaseRate,
    #[error("base rate {base} exceeds max rate {max}")]
    RateBoundsInverted { base: u32, max: u32 },
    #[error("rate increment must be non-zero")]
    ZeroIncrement,
    #[error("score threshold must be non-zero")]
    ZeroScoreThreshold,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not place food: {0}")]
    Placement(#[from] PlacementError),
    #[error("session has not been started")]
    NotStarted,
    #[error("session is over, restart it first")]
    GameOver,
    #[error("session is already in play")]
    AlreadyPlaying,
}
