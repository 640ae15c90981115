//! Tile-to-tile movement resolution
//!
//! A mover travels along one axis at a time toward a target coordinate.
//! Motion is clamped with min/max against the target, so the final step
//! lands on the literal target value and the intent clears on exact
//! equality.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::Direction;

/// A single in-flight move along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub dir: Direction,
    /// Destination coordinate on the direction's axis (x for Left/Right, y for Up/Down)
    pub target: f32,
}

/// Movement controller for one entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mover {
    pub pos: Vec2,
    /// Pixels per millisecond
    speed: f32,
    intent: Option<MoveIntent>,
}

impl Mover {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            speed,
            intent: None,
        }
    }

    /// Install a move unless one is already in flight.
    ///
    /// Returns whether the move was accepted. Rejection is not an error:
    /// held keys re-issue requests every frame.
    pub fn request_move(&mut self, dir: Direction, target: f32) -> bool {
        if self.intent.is_some() {
            return false;
        }
        self.intent = Some(MoveIntent { dir, target });
        true
    }

    /// Advance toward the target.
    ///
    /// Returns the resting position when a move completes during this call.
    pub fn advance(&mut self, dt_ms: f32) -> Option<Vec2> {
        let MoveIntent { dir, target } = self.intent?;
        let delta = self.speed * dt_ms.max(0.0);

        let reached = match dir {
            Direction::Up => {
                self.pos.y = (self.pos.y - delta).max(target);
                self.pos.y == target
            }
            Direction::Down => {
                self.pos.y = (self.pos.y + delta).min(target);
                self.pos.y == target
            }
            Direction::Left => {
                self.pos.x = (self.pos.x - delta).max(target);
                self.pos.x == target
            }
            Direction::Right => {
                self.pos.x = (self.pos.x + delta).min(target);
                self.pos.x == target
            }
        };

        if reached {
            self.intent = None;
            Some(self.pos)
        } else {
            None
        }
    }

    /// Drop any in-flight move and snap to `pos`
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.intent = None;
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.intent.is_some()
    }

    #[inline]
    pub fn intent(&self) -> Option<MoveIntent> {
        self.intent
    }
}
