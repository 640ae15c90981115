//! Per-frame driver
//!
//! Applies one frame of input to the world, then advances it. This is the
//! frontend's whole contact surface with the simulation besides polling
//! snapshots and draining events.

use super::grid::Direction;
use super::rng::ShuffleSource;
use super::world::World;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held direction key, if any. Re-sent every frame while held.
    pub direction: Option<Direction>,
    /// Restart key; only honored once the round is over
    pub restart: bool,
    /// Demo mode - steer the player off threatened tiles automatically
    pub autopilot: bool,
}

/// Advance the world by one frame of `dt_ms` milliseconds
pub fn tick<S: ShuffleSource>(world: &mut World<S>, input: &TickInput, dt_ms: f32) {
    if input.restart && !world.is_active() {
        world.restart();
    }

    let direction = if input.autopilot {
        input.direction.or_else(|| autopilot_direction(world))
    } else {
        input.direction
    };
    if let Some(dir) = direction {
        world.handle_directional_input(dir);
    }

    world.advance(dt_ms);
}

/// Pick a step off the player's tile if an armed or exploded bomb threatens it.
///
/// Looks one tile ahead only; returns `None` when the player is safe, dead,
/// or every neighbor is threatened too.
pub fn autopilot_direction<S: ShuffleSource>(world: &World<S>) -> Option<Direction> {
    if !world.is_active() || world.player().is_dead() {
        return None;
    }

    let grid = world.grid();
    let threatened = |tile: (i32, i32)| {
        world.bombs().iter().any(|bomb| {
            !bomb.is_idle() && bomb.config().pattern.covers(grid, bomb.center_tile(), tile)
        })
    };

    let (col, row) = world.player_tile();
    if !threatened((col, row)) {
        return None;
    }

    Direction::ALL
        .into_iter()
        .filter(|&dir| grid.is_in_bounds(col, row, dir))
        .find(|&dir| {
            let (dc, dr) = dir.offset();
            !threatened((col + dc, row + dr))
        })
}
