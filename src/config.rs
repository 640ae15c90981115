//! Game configuration
//!
//! Fixed for the lifetime of a world. Loaded from JSON (missing fields fall
//! back to defaults) and validated once before anything is built.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::bomb::{BlastPattern, BombConfig};
use crate::sim::grid::GridSpec;

/// Configuration errors. All are fatal: no world is built.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("grid must be at least 3x3 tiles (got {columns}x{rows})")]
    GridTooSmall { columns: u32, rows: u32 },

    #[error("no bombs: short side of {short_side} tiles minus margin {margin} leaves none")]
    NoDevices { short_side: u32, margin: u32 },

    #[error("invalid timing: {0}")]
    InvalidTiming(String),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Board ===
    /// World position of tile (0, 0)
    pub origin: Vec2,
    pub tile_size: f32,
    pub gap: f32,
    pub columns: u32,
    pub rows: u32,
    /// Tile the player starts each round on
    pub spawn_tile: (u32, u32),

    // === Bombs ===
    /// Bomb pool size is `min(columns, rows) - bomb_count_margin`
    pub bomb_count_margin: u32,
    /// Time between waves (ms)
    pub rearm_interval_ms: f32,
    /// How much earlier than a full interval the first wave of a round arms (ms)
    pub first_wave_lead_ms: f32,
    pub fuse_ms: f32,
    pub blast_duration_ms: f32,
    pub pattern: BlastPattern,

    // === Player ===
    /// Pixels per ms
    pub move_speed: f32,

    /// Seed for bomb placement
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        let corner = Vec2::new(BOARD_CORNER.0, BOARD_CORNER.1);
        Self {
            origin: GridSpec::origin_for_corner(corner, TILE_SIZE, TILE_GAP),
            tile_size: TILE_SIZE,
            gap: TILE_GAP,
            columns: COLUMN_COUNT,
            rows: ROW_COUNT,
            spawn_tile: (0, 0),

            bomb_count_margin: BOMB_COUNT_MARGIN,
            rearm_interval_ms: REARM_INTERVAL_MS,
            first_wave_lead_ms: FIRST_WAVE_LEAD_MS,
            fuse_ms: FUSE_MS,
            blast_duration_ms: BLAST_DURATION_MS,
            pattern: BlastPattern::BoardSpanning,

            move_speed: MOVE_SPEED,

            seed: DEFAULT_SEED,
        }
    }
}

impl GameConfig {
    /// Parse from JSON; omitted fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every parameter, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = self.grid()?;
        self.bomb_count()?;

        if let BlastPattern::Cross { reach } = self.pattern {
            let long_side = grid.columns.max(grid.rows);
            if reach > long_side {
                return Err(ConfigError::InvalidGrid(format!(
                    "cross reach {reach} is longer than the board ({long_side} tiles)"
                )));
            }
        }

        let (col, row) = self.spawn_tile;
        if col >= grid.columns || row >= grid.rows {
            return Err(ConfigError::InvalidGrid(format!(
                "spawn tile ({col}, {row}) is off the {}x{} board",
                grid.columns, grid.rows
            )));
        }

        let positive = [
            ("rearm_interval_ms", self.rearm_interval_ms),
            ("fuse_ms", self.fuse_ms),
            ("blast_duration_ms", self.blast_duration_ms),
            ("move_speed", self.move_speed),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTiming(format!(
                    "{name} must be > 0 (got {value})"
                )));
            }
        }

        let lead = self.first_wave_lead_ms;
        if !lead.is_finite() || lead < 0.0 || lead > self.rearm_interval_ms {
            return Err(ConfigError::InvalidTiming(format!(
                "first_wave_lead_ms must be within 0..={} (got {lead})",
                self.rearm_interval_ms
            )));
        }

        Ok(())
    }

    pub fn grid(&self) -> Result<GridSpec, ConfigError> {
        GridSpec::new(
            self.origin,
            self.tile_size,
            self.gap,
            self.columns,
            self.rows,
        )
    }

    /// Size of the bomb pool
    pub fn bomb_count(&self) -> Result<usize, ConfigError> {
        let short_side = self.grid()?.short_side();
        match short_side.checked_sub(self.bomb_count_margin) {
            Some(n) if n >= 1 => Ok(n as usize),
            _ => Err(ConfigError::NoDevices {
                short_side,
                margin: self.bomb_count_margin,
            }),
        }
    }

    pub fn bomb_config(&self) -> BombConfig {
        BombConfig {
            fuse_ms: self.fuse_ms,
            blast_duration_ms: self.blast_duration_ms,
            pattern: self.pattern,
        }
    }
}
