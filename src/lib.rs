//! Grid Snake - A real-time grid movement game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, food economy, effects, progression)
//! - `game`: Composition root driving the variable-interval tick loop
//! - `platform`: Clock and random source abstraction
//! - `tuning`: Data-driven game balance
//! - `leaderboard`: Nickname claims, score submission and top players
//! - `autopilot`: Greedy steering used by the headless runner

pub mod autopilot;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::{ApiError, ConfigError, StoreError, SubmitError};
pub use game::Game;
pub use tuning::GameTuning;

/// Reference balance constants (defaults for [`GameTuning`])
pub mod consts {
    /// Cells per side of the square grid
    pub const GRID_SIZE: i32 = 20;
    /// Spawn cell of the snake head
    pub const INITIAL_POS: (i32, i32) = (10, 10);

    /// Tick interval at level 1 (milliseconds)
    pub const BASE_SPEED_MS: u32 = 150;
    /// Fastest allowed tick interval (milliseconds)
    pub const MIN_SPEED_MS: u32 = 70;
    /// Consumptions needed for the next level
    pub const SPEED_INTERVAL: u32 = 5;
    /// Highest reachable level
    pub const LEVEL_MAX: u32 = 8;
    /// Interval reduction per level (milliseconds)
    pub const SPEED_STEP_MS: u32 = 10;

    /// Combo charges granted by a cherry
    pub const COMBO_CHARGES: u32 = 3;
    /// Golden glow duration (milliseconds)
    pub const GLOW_MS: u64 = 2000;
    /// Palette cycle duration (milliseconds)
    pub const PALETTE_CYCLE_MS: u64 = 5000;

    /// Hubris berry starting multiplier
    pub const HUBRIS_BASE_MULTIPLIER: f64 = 3.0;
    /// Hubris berry multiplier lost per second
    pub const HUBRIS_DECAY_RATE: f64 = 0.5;
    /// Lowest hubris berry multiplier
    pub const HUBRIS_FLOOR: f64 = -3.0;
}
