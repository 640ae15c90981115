//! Read-only per-frame view of the world for the renderer.
//!
//! The renderer takes one after each `advance` with [`World::snapshot`],
//! which also hands over the events queued since the last one, and maps
//! every discriminant to its own visuals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bomb::BombState;
use super::events::RoundEvent;
use super::player::{LifeState, MotionStatus};
use super::rng::ShuffleSource;
use super::world::{RoundState, World};
use crate::timer::TimerState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub life: LifeState,
    pub motion: MotionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BombView {
    pub state: BombState,
    /// Body position (meaningful while armed)
    pub pos: Vec2,
    /// Seconds left, one decimal; only while armed
    pub countdown: Option<String>,
    /// Blast cells; empty unless exploded
    pub cells: Vec<Vec2>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    pub state: TimerState,
    pub visible: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub round: RoundState,
    /// Top-left of tile (0, 0) and the step between tiles
    pub origin: Vec2,
    pub step: f32,
    pub columns: u32,
    pub rows: u32,
    pub player: PlayerView,
    pub bombs: Vec<BombView>,
    pub timer: TimerView,
    /// Events since the previous snapshot (or drain)
    pub events: Vec<RoundEvent>,
}

/// Build a snapshot of the current world state
pub fn build_snapshot<S: ShuffleSource>(
    world: &World<S>,
    events: Vec<RoundEvent>,
) -> WorldSnapshot {
    let grid = world.grid();
    let player = world.player();
    let timer = world.timer();

    WorldSnapshot {
        round: world.round_state(),
        origin: grid.origin,
        step: grid.step(),
        columns: grid.columns,
        rows: grid.rows,
        player: PlayerView {
            pos: player.pos(),
            life: player.life(),
            motion: player.motion_status(),
        },
        bombs: world
            .bombs()
            .iter()
            .map(|bomb| BombView {
                state: bomb.state(),
                pos: bomb.pos(),
                countdown: bomb.countdown_text(),
                cells: bomb.blast_cells().to_vec(),
            })
            .collect(),
        timer: TimerView {
            state: timer.state(),
            visible: timer.is_visible(),
            text: timer.text(),
        },
        events,
    }
}
