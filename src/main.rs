//! Cross Blast headless entry point
//!
//! Runs the simulation with the autopilot at a fixed frame rate and logs how
//! each round ends. Usage: `cross-blast [config.json]`

use cross_blast::GameConfig;
use cross_blast::sim::{RoundEvent, TickInput, World, tick};

/// Frame length fed to the simulation (60 Hz)
const FRAME_MS: f32 = 1000.0 / 60.0;
/// Stop after this much simulated time per round
const MAX_ROUND_MS: f32 = 60_000.0;
const ROUNDS: u32 = 3;

fn main() {
    env_logger::init();
    log::info!("Cross Blast (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let mut world = match World::new(&config) {
        Ok(world) => world,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    log::info!("Game initialized with seed: {}", config.seed);

    let autopilot = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let restart = TickInput {
        restart: true,
        ..autopilot.clone()
    };

    world.start();
    for round in 1..=ROUNDS {
        let mut elapsed = 0.0;
        let mut waves = 0u32;
        while world.is_active() && elapsed < MAX_ROUND_MS {
            tick(&mut world, &autopilot, FRAME_MS);
            elapsed += FRAME_MS;
            for event in world.snapshot().events {
                if matches!(event, RoundEvent::BombsArmed { .. }) {
                    waves += 1;
                }
            }
        }

        let outcome = if world.is_active() { "survived" } else { "died" };
        log::info!(
            "Round {round}: {outcome} after {} ({waves} waves)",
            world.timer().text()
        );

        if round < ROUNDS {
            // The restart key only works on a finished round
            if world.is_active() {
                world.restart();
            } else {
                tick(&mut world, &restart, FRAME_MS);
            }
            world.drain_events();
        }
    }

    match serde_json::to_string_pretty(&world.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}
