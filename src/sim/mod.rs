//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame deltas in, snapshots and events out
//! - Seeded (or scripted) placement only
//! - Stable iteration order (bomb pool order)
//! - No rendering or platform dependencies

pub mod bomb;
pub mod collision;
pub mod events;
pub mod grid;
pub mod movement;
pub mod player;
pub mod rng;
pub mod snapshot;
pub mod tick;
pub mod world;

pub use bomb::{BlastPattern, Bomb, BombConfig, BombState, BombTransition};
pub use collision::{blast_hits, first_lethal_bomb};
pub use events::RoundEvent;
pub use grid::{Direction, GridSpec};
pub use movement::{MoveIntent, Mover};
pub use player::{LifeState, MotionStatus, Player};
pub use rng::{ScriptedShuffle, SeededShuffle, ShuffleSource};
pub use snapshot::{BombView, PlayerView, TimerView, WorldSnapshot, build_snapshot};
pub use tick::{TickInput, autopilot_direction, tick};
pub use world::{RoundState, World};
