//! Cross Blast - A grid-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, movement, bombs, round state)
//! - `timer`: Elapsed round time display
//! - `config`: Constructor-time configuration and validation

pub mod config;
pub mod sim;
pub mod timer;

pub use config::{ConfigError, GameConfig};
pub use timer::{Timer, TimerState};

/// Game configuration constants
pub mod consts {
    /// Board placement used by the reference scene (top-left corner of the board art)
    pub const BOARD_CORNER: (f32, f32) = (1.0, 1.0);

    /// Tile defaults
    pub const TILE_SIZE: f32 = 60.0;
    pub const TILE_GAP: f32 = 4.0;
    pub const COLUMN_COUNT: u32 = 8;
    pub const ROW_COUNT: u32 = 8;

    /// Smallest playable board (per axis)
    pub const MIN_GRID_DIM: u32 = 3;
    /// Largest board (per axis). Keeps tile indices well inside `i32`.
    pub const MAX_GRID_DIM: u32 = 1024;

    /// Bomb pool is this many smaller than the short side of the board
    pub const BOMB_COUNT_MARGIN: u32 = 2;

    /// Time between bomb waves (ms)
    pub const REARM_INTERVAL_MS: f32 = 3500.0;
    /// How far into the interval a new round starts, so the first wave comes early (ms)
    pub const FIRST_WAVE_LEAD_MS: f32 = 1000.0;
    /// Fuse length (ms). Wave interval minus lead, so a wave detonates before the next arms.
    pub const FUSE_MS: f32 = REARM_INTERVAL_MS - FIRST_WAVE_LEAD_MS;
    /// How long a blast stays visible and lethal (ms)
    pub const BLAST_DURATION_MS: f32 = 600.0;

    /// Player movement speed (pixels per ms)
    pub const MOVE_SPEED: f32 = 0.3;

    /// Default RNG seed for the bomb placement sampler
    pub const DEFAULT_SEED: u64 = 42;
}
