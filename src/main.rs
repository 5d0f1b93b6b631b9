//! Tank Duel headless demo
//!
//! Stands in for the host game loop: builds an arena, runs a scripted duel at
//! a fixed step, and logs the events each tick produces. Rendering would read
//! the state after each `tick` call; here we just print a summary instead.

use glam::DVec2;

use tank_duel::Config;
use tank_duel::sim::{Arena, GameEvent, GameState, PlayerId, TickInput, tick};

/// Frame step, milliseconds (~60 Hz)
const STEP_MS: f64 = 16.0;

fn main() {
    env_logger::init();
    log::info!("Tank Duel demo starting...");

    let mut config = Config::default();
    config.tank_speed = 3.0;
    config.shot_speed = 0.01;

    let arena = Arena::bounded(
        24.0,
        12.0,
        1.0,
        vec![
            DVec2::new(4.0, 6.0),
            DVec2::new(20.0, 6.0),
            DVec2::new(12.0, 2.0),
            DVec2::new(12.0, 10.0),
        ],
    );

    let seed = 0xD0E1;
    let mut state = GameState::new(config, arena, seed);
    log::info!("Match initialized with seed: {seed}");

    // Scripted inputs: player one charges and fires, player two backs off
    // while turning, then returns fire.
    let charge = TickInput {
        forward: true,
        fire: true,
        ..Default::default()
    };
    let evade = TickInput {
        backward: true,
        turn_left: true,
        fire: true,
        ..Default::default()
    };

    let mut frames = 0u32;
    while state.clock_ms < 10_000.0 {
        tick(&mut state, &[charge, evade], STEP_MS);
        frames += 1;

        for event in &state.events {
            match event {
                GameEvent::ShotFired { shot, owner } => {
                    println!("[{:7.0}ms] {owner:?} fired shot {shot}", state.clock_ms)
                }
                GameEvent::ShotBounced { shot } => {
                    println!("[{:7.0}ms] shot {shot} bounced off a wall", state.clock_ms)
                }
                GameEvent::ShotExpired { shot } => {
                    println!("[{:7.0}ms] shot {shot} fizzled out", state.clock_ms)
                }
                GameEvent::TankDestroyed { victim, shot } => {
                    println!(
                        "[{:7.0}ms] {victim:?} destroyed by shot {shot}",
                        state.clock_ms
                    )
                }
                GameEvent::TankRespawned { player } => {
                    println!("[{:7.0}ms] {player:?} is back in the fight", state.clock_ms)
                }
            }
        }
    }

    let one = state.tank(PlayerId::One);
    let two = state.tank(PlayerId::Two);
    println!("--- after {frames} frames ---");
    println!(
        "Player One: pos ({:.2}, {:.2}), facing {:.1} deg, alive: {}",
        one.pos.x,
        one.pos.y,
        one.facing_deg,
        one.is_alive()
    );
    println!(
        "Player Two: pos ({:.2}, {:.2}), facing {:.1} deg, alive: {}",
        two.pos.x,
        two.pos.y,
        two.facing_deg,
        two.is_alive()
    );
    println!("Shots still in flight: {}", state.shots.len());
}
