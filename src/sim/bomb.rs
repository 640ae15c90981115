//! Cross bombs: arm, count down, detonate, cool down
//!
//! ```text
//! Idle --activate--> Armed --fuse spent--> Exploded --window spent--> Idle
//!                                             |
//!                                          freeze (window stops until reset)
//! ```
//!
//! `activate` is the only way to (re)arm a bomb and always discards any
//! blast still on screen first. Blast cells are allocated once at
//! construction; detonation only rewrites their positions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::GridSpec;

/// Shape of a detonation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlastPattern {
    /// Center plus `reach` tiles in each cardinal direction (may extend off the board)
    Cross { reach: u32 },
    /// Center plus the whole row and column it sits on, clipped to the board
    #[default]
    BoardSpanning,
}

impl BlastPattern {
    /// Number of blast cells this pattern produces on `grid`
    pub fn cell_count(&self, grid: &GridSpec) -> usize {
        match *self {
            BlastPattern::Cross { reach } => (reach as usize).saturating_mul(4).saturating_add(1),
            BlastPattern::BoardSpanning => {
                (grid.columns as usize + grid.rows as usize).saturating_sub(1)
            }
        }
    }

    /// Whether a blast at `center` would reach `tile`
    pub fn covers(&self, grid: &GridSpec, center: (i32, i32), tile: (i32, i32)) -> bool {
        let (dc, dr) = (tile.0 - center.0, tile.1 - center.1);
        match *self {
            BlastPattern::Cross { reach } => {
                let reach = reach as i32;
                (dr == 0 && dc.abs() <= reach) || (dc == 0 && dr.abs() <= reach)
            }
            BlastPattern::BoardSpanning => {
                grid.contains(tile.0, tile.1) && (dr == 0 || dc == 0)
            }
        }
    }

    /// Write the blast cells around `center` into `out`.
    ///
    /// `out` must hold exactly `cell_count` entries.
    pub fn fill(&self, grid: &GridSpec, center: (i32, i32), out: &mut [Vec2]) {
        debug_assert_eq!(out.len(), self.cell_count(grid));
        let (cx, cy) = center;
        let mut cells = out.iter_mut();
        let mut put = |col: i32, row: i32| {
            if let Some(slot) = cells.next() {
                *slot = grid.world_of(col, row);
            }
        };

        match *self {
            BlastPattern::Cross { reach } => {
                let reach = reach as i32;
                for k in 1..=reach {
                    put(cx + k, cy);
                }
                for k in 1..=reach {
                    put(cx - k, cy);
                }
                for k in 1..=reach {
                    put(cx, cy + k);
                }
                for k in 1..=reach {
                    put(cx, cy - k);
                }
                put(cx, cy);
            }
            BlastPattern::BoardSpanning => {
                put(cx, cy);
                for col in (0..grid.columns as i32).filter(|&c| c != cx) {
                    put(col, cy);
                }
                for row in (0..grid.rows as i32).filter(|&r| r != cy) {
                    put(cx, row);
                }
            }
        }
    }
}

/// Per-bomb timing and shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BombConfig {
    /// Countdown from arming to detonation (ms)
    pub fuse_ms: f32,
    /// How long the blast stays out (ms)
    pub blast_duration_ms: f32,
    pub pattern: BlastPattern,
}

/// Lifecycle state of a bomb
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BombState {
    /// Invisible and inert
    Idle,
    /// Counting down
    Armed { remaining_ms: f32 },
    /// Blast is out. A frozen blast never times out.
    Exploded { window_ms: f32, frozen: bool },
}

/// State change produced by [`Bomb::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BombTransition {
    Detonated,
    Cleared,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    grid: GridSpec,
    config: BombConfig,
    state: BombState,
    center: (i32, i32),
    cells: Vec<Vec2>,
}

impl Bomb {
    pub fn new(grid: GridSpec, config: BombConfig) -> Self {
        let cells = vec![Vec2::ZERO; config.pattern.cell_count(&grid)];
        Self {
            grid,
            config,
            state: BombState::Idle,
            center: (0, 0),
            cells,
        }
    }

    #[inline]
    pub fn state(&self) -> BombState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &BombConfig {
        &self.config
    }

    /// Tile the bomb was last armed on
    #[inline]
    pub fn center_tile(&self) -> (i32, i32) {
        self.center
    }

    /// World position of the bomb body
    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.grid.world_of(self.center.0, self.center.1)
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, BombState::Idle)
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        matches!(self.state, BombState::Armed { .. })
    }

    #[inline]
    pub fn is_exploded(&self) -> bool {
        matches!(self.state, BombState::Exploded { .. })
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        matches!(self.state, BombState::Exploded { frozen: true, .. })
    }

    /// Lethal cells; empty unless exploded
    pub fn blast_cells(&self) -> &[Vec2] {
        if self.is_exploded() { &self.cells } else { &[] }
    }

    /// Remaining fuse formatted as seconds with one decimal (armed only)
    pub fn countdown_text(&self) -> Option<String> {
        match self.state {
            BombState::Armed { remaining_ms } => {
                Some(format!("{:.1}", remaining_ms.max(0.0) / 1000.0))
            }
            _ => None,
        }
    }

    /// Arm on `tile` with a fresh fuse, discarding any blast in progress
    pub fn activate(&mut self, tile: (i32, i32)) {
        self.force_idle();
        self.center = tile;
        self.state = BombState::Armed {
            remaining_ms: self.config.fuse_ms,
        };
    }

    /// Hide the bomb and any blast immediately
    pub fn force_idle(&mut self) {
        self.state = BombState::Idle;
    }

    /// Stop the blast window so the blast stays out until reset.
    ///
    /// No-op unless exploded.
    pub fn freeze(&mut self) {
        if let BombState::Exploded { ref mut frozen, .. } = self.state {
            *frozen = true;
        }
    }

    pub fn advance(&mut self, dt_ms: f32) -> Option<BombTransition> {
        match self.state {
            BombState::Idle => None,
            BombState::Armed { remaining_ms } => {
                let remaining_ms = remaining_ms - dt_ms;
                if remaining_ms > 0.0 {
                    self.state = BombState::Armed { remaining_ms };
                    None
                } else {
                    self.detonate();
                    Some(BombTransition::Detonated)
                }
            }
            BombState::Exploded { frozen: true, .. } => None,
            BombState::Exploded { window_ms, .. } => {
                let window_ms = window_ms - dt_ms;
                if window_ms > 0.0 {
                    self.state = BombState::Exploded {
                        window_ms,
                        frozen: false,
                    };
                    None
                } else {
                    self.state = BombState::Idle;
                    Some(BombTransition::Cleared)
                }
            }
        }
    }

    fn detonate(&mut self) {
        self.config
            .pattern
            .fill(&self.grid, self.center, &mut self.cells);
        self.state = BombState::Exploded {
            window_ms: self.config.blast_duration_ms,
            frozen: false,
        };
    }
}
