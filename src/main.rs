mod game;
mod input;
mod term;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use arcade_snake::{GameConfig, GameSession};

#[derive(Parser)]
#[command(name = "arcade-snake")]
#[command(version, about = "Terminal snake that speeds up as you score")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value_t = GameConfig::default().grid_width)]
    width: u16,

    /// Grid height in cells
    #[arg(long, default_value_t = GameConfig::default().grid_height)]
    height: u16,

    /// Steps per second at the start of a game
    #[arg(long, default_value_t = GameConfig::default().base_rate)]
    base_rate: u32,

    /// Upper bound on steps per second
    #[arg(long, default_value_t = GameConfig::default().max_rate)]
    max_rate: u32,

    /// Steps per second added each time the score crosses a threshold
    #[arg(long, default_value_t = GameConfig::default().increment)]
    increment: u32,

    /// Points between speed-ups
    #[arg(long, default_value_t = GameConfig::default().score_threshold)]
    score_threshold: u32,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn config(&self) -> GameConfig {
        GameConfig {
            grid_width: self.width,
            grid_height: self.height,
            base_rate: self.base_rate,
            max_rate: self.max_rate,
            increment: self.increment,
            score_threshold: self.score_threshold,
        }
    }
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let config = cli.config();
    config.validate().context("Invalid game settings")?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!("starting with {:?}", config);

    let session = GameSession::with_rng(config, rng)?;
    game::SnakeGame::new(session)?.run()
}
