//! The round: board, player, bomb pool and the rules tying them together
//!
//! All state that changes during play lives here. The world is advanced
//! once per frame with the frame's elapsed milliseconds; within a frame the
//! order is fixed:
//!
//! 1. player movement
//! 2. wave schedule (re-arm every bomb when the interval is exceeded)
//! 3. bomb timers
//! 4. round timer
//! 5. player vs blast contact, against post-advance bomb state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bomb::{Bomb, BombTransition};
use super::collision::first_lethal_bomb;
use super::events::RoundEvent;
use super::grid::{Direction, GridSpec};
use super::player::Player;
use super::rng::{SeededShuffle, ShuffleSource};
use super::snapshot::{WorldSnapshot, build_snapshot};
use crate::config::{ConfigError, GameConfig};
use crate::timer::Timer;

/// Whether the round is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundState {
    Active,
    /// Player is dead (or the round never started); waiting for a restart
    #[default]
    Inactive,
}

#[derive(Debug, Clone)]
pub struct World<S = SeededShuffle> {
    grid: GridSpec,
    spawn: (i32, i32),
    player: Player,
    bombs: Vec<Bomb>,
    round: RoundState,
    timer: Timer,

    rearm_interval_ms: f32,
    first_wave_lead_ms: f32,
    /// Time since the last wave (starts a round part-way through an interval)
    rearm_elapsed_ms: f32,

    sampler: S,
    /// Scratch index lists for wave placement
    column_pool: Vec<i32>,
    row_pool: Vec<i32>,

    /// Emptied only by `snapshot`, `drain_events` and `start`; a frontend
    /// must call one of the first two every frame.
    events: Vec<RoundEvent>,
}

impl World<SeededShuffle> {
    /// Build a world placing bombs with a PCG shuffle seeded from the config
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Self::with_sampler(config, SeededShuffle::new(config.seed))
    }
}

impl<S: ShuffleSource> World<S> {
    /// Build a world with a custom placement source.
    ///
    /// The world starts Inactive with a hidden timer; call [`World::start`]
    /// to begin the first round.
    pub fn with_sampler(config: &GameConfig, sampler: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid()?;
        let bomb_count = config.bomb_count()?;
        let bomb_config = config.bomb_config();

        let spawn = (config.spawn_tile.0 as i32, config.spawn_tile.1 as i32);
        let bombs = (0..bomb_count)
            .map(|_| Bomb::new(grid, bomb_config))
            .collect();

        log::info!(
            "World {}x{} (step {}), {} bombs, pattern {:?}",
            grid.columns,
            grid.rows,
            grid.step(),
            bomb_count,
            bomb_config.pattern
        );

        Ok(Self {
            grid,
            spawn,
            player: Player::new(grid.world_of(spawn.0, spawn.1), config.move_speed),
            bombs,
            round: RoundState::Inactive,
            timer: Timer::new(),
            rearm_interval_ms: config.rearm_interval_ms,
            first_wave_lead_ms: config.first_wave_lead_ms,
            rearm_elapsed_ms: 0.0,
            sampler,
            column_pool: Vec::with_capacity(grid.columns as usize),
            row_pool: Vec::with_capacity(grid.rows as usize),
            events: Vec::new(),
        })
    }

    /// Begin a fresh round. Hard reset of every timer and state.
    ///
    /// Calling it twice in a row is the same as calling it once.
    pub fn start(&mut self) {
        self.round = RoundState::Active;
        // Start part-way through the interval so the first wave comes early
        self.rearm_elapsed_ms = self.rearm_interval_ms - self.first_wave_lead_ms;
        for bomb in &mut self.bombs {
            bomb.force_idle();
        }
        self.player
            .reset(self.grid.world_of(self.spawn.0, self.spawn.1));
        self.timer.start();

        self.events.clear();
        self.events.push(RoundEvent::RoundStarted);
        log::info!("Round started at tile {:?}", self.spawn);
    }

    #[inline]
    pub fn restart(&mut self) {
        self.start();
    }

    /// Try to move the player one tile.
    ///
    /// Silently ignored while the round is inactive, the player is dead or
    /// already moving, or the move would leave the board. Returns whether a
    /// move started.
    pub fn handle_directional_input(&mut self, dir: Direction) -> bool {
        if self.round != RoundState::Active || self.player.is_dead() {
            return false;
        }
        if self.player.intent().is_some() {
            return false;
        }

        let (col, row) = self.grid.nearest_tile(self.player.pos());
        if !self.grid.is_in_bounds(col, row, dir) {
            return false;
        }
        let target = self.grid.target_coordinate_for(col, row, dir);
        let accepted = self.player.request_move(dir, target);
        if accepted {
            log::trace!("Player moving {dir:?} from ({col}, {row})");
        }
        accepted
    }

    /// Arm one bomb on `tile` outside the wave schedule.
    ///
    /// Ignored while the round is inactive, for an unknown bomb index or an
    /// off-board tile.
    pub fn arm_bomb(&mut self, index: usize, tile: (i32, i32)) -> bool {
        if self.round != RoundState::Active || !self.grid.contains(tile.0, tile.1) {
            return false;
        }
        let Some(bomb) = self.bombs.get_mut(index) else {
            return false;
        };
        bomb.activate(tile);
        self.events.push(RoundEvent::BombsArmed { tiles: vec![tile] });
        true
    }

    /// Advance the simulation by one frame
    pub fn advance(&mut self, dt_ms: f32) {
        let dt_ms = dt_ms.max(0.0);

        // 1. Movement
        if let Some(pos) = self.player.advance(dt_ms) {
            self.events.push(RoundEvent::PlayerMoved { pos });
        }

        // 2. Wave schedule. The accumulator keeps running after death; only
        //    placement is gated on the round.
        self.rearm_elapsed_ms += dt_ms;
        if self.rearm_elapsed_ms > self.rearm_interval_ms {
            self.rearm_elapsed_ms = 0.0;
            if self.round == RoundState::Active {
                self.arm_wave();
            }
        }

        // 3. Bomb timers
        for (index, bomb) in self.bombs.iter_mut().enumerate() {
            match bomb.advance(dt_ms) {
                Some(BombTransition::Detonated) => {
                    log::debug!("Bomb {index} exploded at {:?}", bomb.center_tile());
                    self.events.push(RoundEvent::BombExploded {
                        bomb: index,
                        tile: bomb.center_tile(),
                    });
                }
                Some(BombTransition::Cleared) => {
                    self.events.push(RoundEvent::BlastCleared { bomb: index });
                }
                None => {}
            }
        }

        // 4. Round timer
        self.timer.advance(dt_ms);

        // 5. Contact
        if !self.player.is_dead() {
            let pos = self.player.pos();
            if let Some(index) = first_lethal_bomb(pos, &self.bombs) {
                self.kill_player(pos, index);
            }
        }
    }

    /// Re-arm every bomb on distinct columns and distinct rows
    fn arm_wave(&mut self) {
        self.column_pool.clear();
        self.column_pool.extend(0..self.grid.columns as i32);
        self.row_pool.clear();
        self.row_pool.extend(0..self.grid.rows as i32);

        self.sampler.shuffle(&mut self.column_pool);
        self.sampler.shuffle(&mut self.row_pool);

        let tiles: Vec<(i32, i32)> = self
            .column_pool
            .iter()
            .copied()
            .zip(self.row_pool.iter().copied())
            .take(self.bombs.len())
            .collect();
        for (bomb, &tile) in self.bombs.iter_mut().zip(&tiles) {
            bomb.activate(tile);
        }

        log::debug!("Armed wave: {tiles:?}");
        self.events.push(RoundEvent::BombsArmed { tiles });
    }

    fn kill_player(&mut self, pos: Vec2, bomb: usize) {
        self.player.die();
        // Every blast on screen stays put, not only the lethal one
        for b in &mut self.bombs {
            b.freeze();
        }
        self.timer.stop();
        self.round = RoundState::Inactive;

        log::info!(
            "Player hit by bomb {bomb} at {pos} after {}",
            self.timer.text()
        );
        self.events.push(RoundEvent::PlayerDied { pos, bomb });
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// Per-frame view for the renderer. Takes the pending events with it.
    pub fn snapshot(&mut self) -> WorldSnapshot {
        let events = std::mem::take(&mut self.events);
        build_snapshot(self, events)
    }

    #[inline]
    pub fn events(&self) -> &[RoundEvent] {
        &self.events
    }

    #[inline]
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn bombs(&self) -> &[Bomb] {
        &self.bombs
    }

    #[inline]
    pub fn round_state(&self) -> RoundState {
        self.round
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.round == RoundState::Active
    }

    #[inline]
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    #[inline]
    pub fn rearm_elapsed_ms(&self) -> f32 {
        self.rearm_elapsed_ms
    }

    /// Tile the player is on (nearest tile while moving)
    #[inline]
    pub fn player_tile(&self) -> (i32, i32) {
        self.grid.nearest_tile(self.player.pos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bomb::{BlastPattern, BombState};
    use crate::sim::player::LifeState;
    use crate::sim::rng::ScriptedShuffle;
    use crate::timer::TimerState;

    /// 8x8 board, tile 60, gap 4, a single board-spanning bomb with a 3 s fuse
    fn single_bomb_config(spawn: (u32, u32)) -> GameConfig {
        GameConfig {
            origin: Vec2::ZERO,
            tile_size: 60.0,
            gap: 4.0,
            columns: 8,
            rows: 8,
            spawn_tile: spawn,
            bomb_count_margin: 7,
            // Schedule starts at zero and no wave lands during a scenario
            rearm_interval_ms: 60_000.0,
            first_wave_lead_ms: 60_000.0,
            fuse_ms: 3000.0,
            blast_duration_ms: 600.0,
            pattern: BlastPattern::BoardSpanning,
            ..Default::default()
        }
    }

    fn scripted(config: &GameConfig, script: Vec<Vec<i32>>) -> World<ScriptedShuffle> {
        let mut world = World::with_sampler(config, ScriptedShuffle::new(script)).unwrap();
        world.start();
        world
    }

    #[test]
    fn test_new_world_waits_for_start() {
        let mut world = World::new(&GameConfig::default()).unwrap();
        assert_eq!(world.round_state(), RoundState::Inactive);
        assert_eq!(world.bombs().len(), 6);
        assert!(!world.handle_directional_input(Direction::Right));
        assert!(!world.timer().is_visible());

        world.start();
        assert!(world.is_active());
        assert_eq!(world.timer().state(), TimerState::Active);
        assert_eq!(world.drain_events(), vec![RoundEvent::RoundStarted]);
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = GameConfig {
            rows: 2,
            ..Default::default()
        };
        assert!(matches!(
            World::new(&config),
            Err(ConfigError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn test_collision_kills_player() {
        let config = single_bomb_config((3, 3));
        let mut world = scripted(&config, vec![]);
        let g = *world.grid();
        assert!(world.arm_bomb(0, (3, 3)));

        world.advance(3000.0);

        let bomb = &world.bombs()[0];
        assert!(bomb.is_exploded());
        let cells = bomb.blast_cells();
        assert!(cells.contains(&g.world_of(3, 3)));
        for i in 0..8 {
            assert!(cells.contains(&g.world_of(i, 3)));
            assert!(cells.contains(&g.world_of(3, i)));
        }

        assert_eq!(world.player().life(), LifeState::Dead);
        assert_eq!(world.round_state(), RoundState::Inactive);
        assert_eq!(world.timer().state(), TimerState::Inactive);
        assert!(bomb.is_frozen());
        assert!(world.events().contains(&RoundEvent::PlayerDied {
            pos: g.world_of(3, 3),
            bomb: 0
        }));
    }

    #[test]
    fn test_no_collision_off_the_cross() {
        let config = single_bomb_config((0, 0));
        let mut world = scripted(&config, vec![]);
        world.arm_bomb(0, (3, 3));

        world.advance(3000.0);

        assert!(world.bombs()[0].is_exploded());
        assert_eq!(world.player().life(), LifeState::Alive);
        assert!(world.is_active());

        // Blast times out and the round carries on
        world.advance(600.0);
        assert!(world.bombs()[0].is_idle());
        assert!(world.is_active());
    }

    #[test]
    fn test_blast_expiring_this_frame_is_harmless() {
        // Player steps into the bomb's row on the same frame the blast ends
        let mut config = single_bomb_config((4, 4));
        config.blast_duration_ms = 100.0;
        let mut world = scripted(&config, vec![]);
        world.arm_bomb(0, (5, 5));
        world.advance(3000.0);
        assert!(world.bombs()[0].is_exploded());

        assert!(world.handle_directional_input(Direction::Down));
        world.advance(250.0);
        assert_eq!(world.player_tile(), (4, 5));
        assert!(world.bombs()[0].is_idle());
        assert_eq!(world.player().life(), LifeState::Alive);

        // Same walk into a blast that is still out
        config.blast_duration_ms = 300.0;
        let mut world = scripted(&config, vec![]);
        world.arm_bomb(0, (5, 5));
        world.advance(3000.0);
        world.handle_directional_input(Direction::Down);
        world.advance(250.0);
        assert_eq!(world.player().life(), LifeState::Dead);
    }

    #[test]
    fn test_first_wave_comes_early() {
        let config = GameConfig {
            rearm_interval_ms: 3500.0,
            first_wave_lead_ms: 1000.0,
            ..Default::default()
        };
        let mut world = World::new(&config).unwrap();
        world.start();
        assert_eq!(world.rearm_elapsed_ms(), 2500.0);

        // Accumulator reaches the interval but has not exceeded it
        world.advance(1000.0);
        assert!(world.bombs().iter().all(Bomb::is_idle));

        world.advance(1.0);
        assert!(world.bombs().iter().all(Bomb::is_armed));
        assert_eq!(world.rearm_elapsed_ms(), 0.0);

        // Following waves wait a full interval
        world.advance(3500.0);
        assert_eq!(world.rearm_elapsed_ms(), 3500.0);
    }

    #[test]
    fn test_wave_uses_distinct_rows_and_columns() {
        let config = GameConfig::default();
        let mut world = scripted(
            &config,
            vec![vec![7, 6, 5, 4, 3, 2, 1, 0], vec![0, 2, 4, 6, 1, 3, 5, 7]],
        );
        world.advance(1001.0);

        let tiles: Vec<_> = world.bombs().iter().map(Bomb::center_tile).collect();
        assert_eq!(
            tiles,
            vec![(7, 0), (6, 2), (5, 4), (4, 6), (3, 1), (2, 3)]
        );
        assert!(world.events().contains(&RoundEvent::BombsArmed {
            tiles: tiles.clone()
        }));
    }

    #[test]
    fn test_seeded_waves_are_reproducible() {
        let config = GameConfig::default();
        let mut a = World::new(&config).unwrap();
        let mut b = World::new(&config).unwrap();
        a.start();
        b.start();
        for _ in 0..600 {
            a.advance(16.0);
            b.advance(16.0);
        }
        let ta: Vec<_> = a.bombs().iter().map(Bomb::center_tile).collect();
        let tb: Vec<_> = b.bombs().iter().map(Bomb::center_tile).collect();
        assert_eq!(ta, tb);
        assert_eq!(a.drain_events(), b.drain_events());
    }

    #[test]
    fn test_death_freezes_every_blast() {
        let config = GameConfig {
            origin: Vec2::ZERO,
            fuse_ms: 1000.0,
            blast_duration_ms: 600.0,
            // First wave arms on the very first frame
            first_wave_lead_ms: 0.0,
            ..Default::default()
        };
        // Player spawns at (0,0); bomb 0 lands on (0,5) and covers column 0
        let mut world = scripted(
            &config,
            vec![vec![0, 1, 2, 3, 4, 5, 6, 7], vec![5, 6, 7, 1, 2, 3, 0, 4]],
        );
        world.advance(1.0);
        assert!(world.bombs().iter().all(Bomb::is_armed));
        world.advance(999.0);

        assert!(world.player().is_dead());
        assert!(world.bombs().iter().all(Bomb::is_frozen));

        // Frozen blasts stay out and nothing re-arms while inactive
        for _ in 0..10 {
            world.advance(1000.0);
        }
        assert!(world.bombs().iter().all(Bomb::is_frozen));
        assert!(world.bombs().iter().all(|b| !b.blast_cells().is_empty()));
        assert_eq!(world.timer().text(), "00:01.000");
    }

    #[test]
    fn test_input_ignored_after_death() {
        let config = single_bomb_config((3, 3));
        let mut world = scripted(&config, vec![]);
        world.arm_bomb(0, (3, 3));
        world.advance(3000.0);
        assert!(world.player().is_dead());

        assert!(!world.handle_directional_input(Direction::Left));
        assert!(!world.arm_bomb(0, (1, 1)));
        world.advance(10.0);
        assert_eq!(world.player().pos(), world.grid().world_of(3, 3));
    }

    #[test]
    fn test_restart_is_hard_reset() {
        let config = single_bomb_config((3, 3));
        let mut world = scripted(&config, vec![]);
        world.arm_bomb(0, (3, 3));
        world.advance(3000.0);
        assert!(!world.is_active());

        world.restart();
        assert!(world.is_active());
        assert_eq!(world.player().life(), LifeState::Alive);
        assert_eq!(world.player().pos(), world.grid().world_of(3, 3));
        assert_eq!(world.bombs()[0].state(), BombState::Idle);
        assert_eq!(world.timer().text(), "00:00.000");
        assert_eq!(world.rearm_elapsed_ms(), 0.0);
        assert_eq!(world.events(), &[RoundEvent::RoundStarted]);
    }

    #[test]
    fn test_restart_twice_equals_once() {
        let config = GameConfig::default();
        let mut once = World::new(&config).unwrap();
        let mut twice = World::new(&config).unwrap();
        for w in [&mut once, &mut twice] {
            w.start();
            w.handle_directional_input(Direction::Down);
            w.advance(1800.0);
        }
        once.restart();
        twice.restart();
        twice.restart();

        assert_eq!(once.round_state(), twice.round_state());
        assert_eq!(once.player().pos(), twice.player().pos());
        assert_eq!(once.player().life(), twice.player().life());
        assert_eq!(once.rearm_elapsed_ms(), twice.rearm_elapsed_ms());
        assert_eq!(once.timer().text(), twice.timer().text());
        assert_eq!(once.events(), twice.events());
        let states = |w: &World| w.bombs().iter().map(Bomb::state).collect::<Vec<_>>();
        assert_eq!(states(&once), states(&twice));
    }

    #[test]
    fn test_player_walks_and_stops_at_edge() {
        let mut world = World::new(&GameConfig::default()).unwrap();
        world.start();
        let g = *world.grid();

        assert!(!world.handle_directional_input(Direction::Up));
        assert!(!world.handle_directional_input(Direction::Left));

        assert!(world.handle_directional_input(Direction::Right));
        // Held key while moving is a no-op
        assert!(!world.handle_directional_input(Direction::Down));
        world.advance(100.0);
        assert!(world.player().pos().x > g.world_of(0, 0).x);
        world.advance(200.0);
        assert_eq!(world.player().pos(), g.world_of(1, 0));
        assert!(world.events().contains(&RoundEvent::PlayerMoved {
            pos: g.world_of(1, 0)
        }));
        assert_eq!(world.player_tile(), (1, 0));
    }

    #[test]
    fn test_arm_bomb_rejects_bad_targets() {
        let mut world = World::new(&GameConfig::default()).unwrap();
        world.start();
        assert!(!world.arm_bomb(99, (1, 1)));
        assert!(!world.arm_bomb(0, (8, 1)));
        assert!(world.arm_bomb(0, (7, 7)));
        assert!(world.bombs()[0].is_armed());
    }

    #[test]
    fn test_every_step_lands_on_a_neighbor_or_stays() {
        for col in 0..8u32 {
            for row in 0..8u32 {
                for dir in Direction::ALL {
                    let config = single_bomb_config((col, row));
                    let mut world = scripted(&config, vec![]);
                    let g = *world.grid();
                    let start = g.world_of(col as i32, row as i32);
                    let (dc, dr) = dir.offset();
                    let next = (col as i32 + dc, row as i32 + dr);

                    let accepted = world.handle_directional_input(dir);
                    let label = format!("{dir:?} from ({col}, {row})");
                    assert_eq!(accepted, g.contains(next.0, next.1), "{label}");
                    world.advance(1000.0);

                    let expected = if accepted { g.world_of(next.0, next.1) } else { start };
                    assert_eq!(world.player().pos(), expected, "{label}");
                    assert!(world.player().intent().is_none());
                }
            }
        }
    }
}
