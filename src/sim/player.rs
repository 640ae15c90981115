//! The player character

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::Direction;
use super::movement::{MoveIntent, Mover};

/// Whether the player is still in the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifeState {
    #[default]
    Alive,
    /// Terminal until the round is restarted
    Dead,
}

/// Animation discriminant for the renderer (never read by the sim)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionStatus {
    Idle,
    Running,
    Dead,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    mover: Mover,
    life: LifeState,
}

impl Player {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            mover: Mover::new(pos, speed),
            life: LifeState::Alive,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.mover.pos
    }

    #[inline]
    pub fn life(&self) -> LifeState {
        self.life
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life == LifeState::Dead
    }

    #[inline]
    pub fn intent(&self) -> Option<MoveIntent> {
        self.mover.intent()
    }

    /// Start a move; ignored while dead or already moving
    pub fn request_move(&mut self, dir: Direction, target: f32) -> bool {
        if self.is_dead() {
            return false;
        }
        self.mover.request_move(dir, target)
    }

    /// Advance movement, returning the resting position if a move finished
    pub fn advance(&mut self, dt_ms: f32) -> Option<Vec2> {
        self.mover.advance(dt_ms)
    }

    /// Kill the player where they stand
    pub fn die(&mut self) {
        self.life = LifeState::Dead;
        let pos = self.mover.pos;
        self.mover.reset(pos);
    }

    /// Back to life at `spawn`, with no move in flight
    pub fn reset(&mut self, spawn: Vec2) {
        self.mover.reset(spawn);
        self.life = LifeState::Alive;
    }

    pub fn motion_status(&self) -> MotionStatus {
        match (self.life, self.mover.is_moving()) {
            (LifeState::Dead, _) => MotionStatus::Dead,
            (LifeState::Alive, true) => MotionStatus::Running,
            (LifeState::Alive, false) => MotionStatus::Idle,
        }
    }
}
