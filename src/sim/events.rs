//! Events emitted by the simulation for renderer/audio feedback.
//!
//! The world queues these during `start` and `advance`; the frontend
//! drains them once per frame after polling the snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RoundEvent {
    /// A (re)started round: player at spawn, board clear
    RoundStarted,
    /// The player finished a move and is resting on a tile
    PlayerMoved { pos: Vec2 },
    /// A wave armed every bomb; tiles listed in pool order
    BombsArmed { tiles: Vec<(i32, i32)> },
    BombExploded { bomb: usize, tile: (i32, i32) },
    /// A blast timed out and the bomb went idle
    BlastCleared { bomb: usize },
    /// The player touched a blast; the round is over
    PlayerDied { pos: Vec2, bomb: usize },
}
