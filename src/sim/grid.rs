//! Grid geometry: tile <-> world conversions and bounds checks
//!
//! Tiles are addressed by integer (col, row). World positions are the
//! top-left corner of a tile: `origin + (col, row) * step`. Every lattice
//! coordinate in the game goes through [`GridSpec::world_of`], so two
//! lattice points computed anywhere compare equal with `==`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::consts::{MAX_GRID_DIM, MIN_GRID_DIM};

/// One of the four cardinal move directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// True for Up/Down (moves along the y axis)
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Tile offset of one step in this direction (y grows downward)
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Immutable board layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// World position of tile (0, 0)
    pub origin: Vec2,
    /// Edge length of one tile (pixels)
    pub tile_size: f32,
    /// Spacing between adjacent tiles (pixels)
    pub gap: f32,
    pub columns: u32,
    pub rows: u32,
}

impl GridSpec {
    /// Build a grid, rejecting degenerate layouts
    pub fn new(
        origin: Vec2,
        tile_size: f32,
        gap: f32,
        columns: u32,
        rows: u32,
    ) -> Result<Self, ConfigError> {
        let tile_ok = tile_size.is_finite() && tile_size > 0.0;
        let gap_ok = gap.is_finite() && gap >= 0.0;
        if !tile_ok || !gap_ok {
            return Err(ConfigError::InvalidGrid(format!(
                "tile_size must be > 0 and gap >= 0 (got tile_size={tile_size}, gap={gap})"
            )));
        }
        if !origin.is_finite() {
            return Err(ConfigError::InvalidGrid(format!(
                "origin must be finite (got {origin})"
            )));
        }
        if columns < MIN_GRID_DIM || rows < MIN_GRID_DIM {
            return Err(ConfigError::GridTooSmall { columns, rows });
        }
        if columns > MAX_GRID_DIM || rows > MAX_GRID_DIM {
            return Err(ConfigError::InvalidGrid(format!(
                "grid must be at most {MAX_GRID_DIM}x{MAX_GRID_DIM} tiles (got {columns}x{rows})"
            )));
        }
        Ok(Self {
            origin,
            tile_size,
            gap,
            columns,
            rows,
        })
    }

    /// Origin of tile (0, 0) for board art whose top-left corner is `corner`.
    ///
    /// The first tile sits half a tile plus one gap inside the corner,
    /// leaving a margin of board art around the tiles.
    pub fn origin_for_corner(corner: Vec2, tile_size: f32, gap: f32) -> Vec2 {
        corner + Vec2::splat(tile_size / 2.0 + gap)
    }

    /// Distance between the corners of adjacent tiles
    #[inline]
    pub fn step(&self) -> f32 {
        self.tile_size + self.gap
    }

    /// World position of a tile (indices may lie off the board)
    #[inline]
    pub fn world_of(&self, col: i32, row: i32) -> Vec2 {
        let step = self.step();
        Vec2::new(
            self.origin.x + col as f32 * step,
            self.origin.y + row as f32 * step,
        )
    }

    /// Fractional tile index of a world position (not integral mid-move)
    #[inline]
    pub fn tile_index_of(&self, pos: Vec2) -> Vec2 {
        (pos - self.origin) / self.step()
    }

    /// Closest integer tile to a world position
    pub fn nearest_tile(&self, pos: Vec2) -> (i32, i32) {
        let idx = self.tile_index_of(pos).round();
        (idx.x as i32, idx.y as i32)
    }

    /// Whether (col, row) addresses a tile on the board
    #[inline]
    pub fn contains(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && (col as u32) < self.columns && (row as u32) < self.rows
    }

    /// Whether one step in `dir` from (col, row) stays on the board.
    ///
    /// Only the axis the direction moves along is checked.
    pub fn is_in_bounds(&self, col: i32, row: i32, dir: Direction) -> bool {
        let (dc, dr) = dir.offset();
        if dir.is_vertical() {
            let next = row + dr;
            next >= 0 && (next as u32) < self.rows
        } else {
            let next = col + dc;
            next >= 0 && (next as u32) < self.columns
        }
    }

    /// World coordinate of the adjacent tile along the direction's axis
    pub fn target_coordinate_for(&self, col: i32, row: i32, dir: Direction) -> f32 {
        let (dc, dr) = dir.offset();
        let next = self.world_of(col + dc, row + dr);
        if dir.is_vertical() { next.y } else { next.x }
    }

    /// Full board extent including the one-step margin of board art
    pub fn board_size(&self) -> Vec2 {
        let step = self.step();
        Vec2::new(
            step * (self.columns + 1) as f32,
            step * (self.rows + 1) as f32,
        )
    }

    /// Tile count of the short side
    #[inline]
    pub fn short_side(&self) -> u32 {
        self.columns.min(self.rows)
    }
}
