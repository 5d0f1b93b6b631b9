//! Per-frame simulation step
//!
//! The host game loop calls [`tick`] once per rendered frame with the elapsed
//! milliseconds. Order within a tick is fixed and observable: respawns, then
//! inputs, then shot movement, then collisions (walls before tanks), then
//! pruning. Render reads happen after the tick returns.

use super::state::{GameEvent, GameState, PlayerId};

/// Input state for one tank for one tick (deterministic; key polling is the
/// host's job)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub fire: bool,
}

/// Advance the match by `delta_ms` milliseconds
pub fn tick(state: &mut GameState, inputs: &[TickInput; 2], delta_ms: f64) {
    state.clock_ms += delta_ms;
    state.events.clear();

    respawn_pass(state);
    input_pass(state, inputs, delta_ms);
    movement_pass(state, delta_ms);
    collision_pass(state);

    // Inactive shots are dropped here and never reused; ids stay stable
    state.shots.retain(|s| s.is_active());
}

/// Revive tanks whose respawn delay has elapsed, relocating them to a random
/// spawn point. This is the only place a dead tank's position changes.
fn respawn_pass(state: &mut GameState) {
    let now = state.clock_ms;
    let delay = state.config.respawn_delay_ms;

    for id in [PlayerId::One, PlayerId::Two] {
        if state.tank(id).respawn_due(now, delay) {
            let spawn = state.pick_spawn_point();
            state.tank_mut(id).respawn_at(spawn);
            log::info!("{id:?} respawned at {:.2},{:.2}", spawn.x, spawn.y);
            state.events.push(GameEvent::TankRespawned { player: id });
        }
    }
}

/// Apply held inputs. Movement and firing are silently ignored for downed
/// tanks inside the tank/fire methods themselves.
fn input_pass(state: &mut GameState, inputs: &[TickInput; 2], delta_ms: f64) {
    for (tank, input) in state.tanks.iter_mut().zip(inputs) {
        if input.turn_left {
            tank.rotate_left(delta_ms);
        }
        if input.turn_right {
            tank.rotate_right(delta_ms);
        }
        if input.forward {
            tank.move_forwards(delta_ms);
        }
        if input.backward {
            tank.move_backwards(delta_ms);
        }
    }

    for (id, input) in [PlayerId::One, PlayerId::Two].into_iter().zip(inputs) {
        if input.fire {
            state.fire(id);
        }
    }
}

/// Integrate every live shot; lifetime expiry happens here
fn movement_pass(state: &mut GameState, delta_ms: f64) {
    for shot in state.shots.iter_mut().filter(|s| s.is_active()) {
        shot.advance(delta_ms);
        if !shot.is_active() {
            log::debug!("shot {} expired", shot.id);
            state.events.push(GameEvent::ShotExpired { shot: shot.id });
        }
    }
}

/// Test every live shot against the arena, walls first. A shot that bounced
/// this tick skips the tank check, so it can never bounce and score in the
/// same frame.
fn collision_pass(state: &mut GameState) {
    let GameState {
        shots,
        tanks,
        arena,
        events,
        clock_ms,
        ..
    } = state;

    for shot in shots.iter_mut().filter(|s| s.is_active()) {
        let mut bounced = false;
        for wall in &arena.walls {
            if let Some(overlap) = shot.hits_wall(wall) {
                shot.bounce(overlap);
                log::debug!("shot {} bounced", shot.id);
                events.push(GameEvent::ShotBounced { shot: shot.id });
                bounced = true;
                break;
            }
        }
        if bounced {
            continue;
        }

        let target = &mut tanks[shot.owner.opponent().index()];
        if shot.hits_tank(target) {
            shot.expend();
            target.kill(*clock_ms);
            log::info!("{:?} destroyed by shot {}", target.id, shot.id);
            events.push(GameEvent::TankDestroyed {
                victim: target.id,
                shot: shot.id,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::state::{Arena, GameState, Wall};
    use glam::DVec2;

    fn open_arena() -> Arena {
        // No walls; spawn points well away from the action
        Arena::new(vec![], vec![DVec2::new(50.0, 50.0), DVec2::new(60.0, 60.0)])
    }

    fn duel(arena: Arena) -> GameState {
        GameState::new(Config::default(), arena, 42)
    }

    fn fire_only() -> [TickInput; 2] {
        [
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ]
    }

    #[test]
    fn test_fire_registers_single_outstanding_shot() {
        let mut state = duel(open_arena());

        tick(&mut state, &fire_only(), 16.0);
        assert_eq!(state.shots.len(), 1);
        assert!(matches!(
            state.events[..],
            [GameEvent::ShotFired {
                owner: PlayerId::One,
                ..
            }]
        ));
        assert_eq!(
            state.shot_color(&state.shots[0]),
            state.tank(PlayerId::One).color
        );

        // Holding fire while the shot is still in flight does nothing
        tick(&mut state, &fire_only(), 16.0);
        assert_eq!(state.shots.len(), 1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_shot_expiry_frees_the_gate() {
        let mut state = duel(open_arena());
        tick(&mut state, &fire_only(), 16.0);
        let first_id = state.shots[0].id;

        // Run past the lifetime bound; the shot expires and is pruned
        tick(&mut state, &[TickInput::default(); 2], 3500.0);
        assert!(state.shots.is_empty());
        assert_eq!(
            state.events,
            vec![GameEvent::ShotExpired { shot: first_id }]
        );

        // The gate reopens for the owner
        assert!(state.can_fire(PlayerId::One));
        tick(&mut state, &fire_only(), 16.0);
        assert_eq!(state.shots.len(), 1);
        assert_ne!(state.shots[0].id, first_id);
    }

    #[test]
    fn test_shot_kills_opponent_and_respawns_after_delay() {
        // Tanks adjacent, player one facing player two point-blank
        let arena = Arena::new(vec![], vec![DVec2::new(0.0, 0.0), DVec2::new(0.4, 0.0)]);
        let mut state = duel(arena);

        tick(&mut state, &fire_only(), 16.0);
        assert!(!state.tank(PlayerId::Two).is_alive());
        assert!(state
            .events
            .contains(&GameEvent::TankDestroyed {
                victim: PlayerId::Two,
                shot: 1
            }));
        assert!(state.shots.is_empty(), "hit shots are pruned");

        let death_pos = state.tank(PlayerId::Two).pos;
        let died_at = state.clock_ms;

        // 499 ms after death: still down, unmoved
        let dt = 499.0 - (state.clock_ms - died_at);
        tick(&mut state, &[TickInput::default(); 2], dt);
        assert!(!state.tank(PlayerId::Two).is_alive());
        assert_eq!(state.tank(PlayerId::Two).pos, death_pos);

        // 501 ms after death: revived and relocated to a spawn point
        tick(&mut state, &[TickInput::default(); 2], 2.0);
        assert!(state.tank(PlayerId::Two).is_alive());
        let pos = state.tank(PlayerId::Two).pos;
        assert!(state.arena.spawn_points().contains(&pos));
        assert!(state
            .events
            .contains(&GameEvent::TankRespawned {
                player: PlayerId::Two
            }));
    }

    #[test]
    fn test_dead_tank_ignores_inputs() {
        let arena = Arena::new(vec![], vec![DVec2::new(0.0, 0.0), DVec2::new(0.4, 0.0)]);
        let mut state = duel(arena);
        tick(&mut state, &fire_only(), 16.0);
        assert!(!state.tank(PlayerId::Two).is_alive());

        let pos = state.tank(PlayerId::Two).pos;
        let facing = state.tank(PlayerId::Two).facing_deg;
        let everything = TickInput {
            forward: true,
            backward: false,
            turn_left: true,
            turn_right: false,
            fire: true,
        };
        tick(&mut state, &[TickInput::default(), everything], 100.0);

        assert_eq!(state.tank(PlayerId::Two).pos, pos);
        assert_eq!(state.tank(PlayerId::Two).facing_deg, facing);
        assert!(!state.shots.iter().any(|s| s.owner == PlayerId::Two));
    }

    #[test]
    fn test_wall_bounce_reflects_x() {
        // Shot fired at 0 degrees into a wall centered at (10, 0)
        let arena = Arena::new(
            vec![Wall::new(DVec2::new(10.0, 0.0), DVec2::new(1.0, 1.0))],
            vec![DVec2::new(0.0, 0.0), DVec2::new(0.0, 40.0)],
        );
        let mut config = Config::default();
        config.shot_speed = 0.05; // covers the distance within the lifetime
        let mut state = GameState::new(config, arena, 7);

        tick(&mut state, &fire_only(), 16.0);
        assert_eq!(state.shots.len(), 1);
        assert!(state.shots[0].dir.x > 0.0);

        // Step until the bounce lands
        let mut bounced = false;
        for _ in 0..200 {
            tick(&mut state, &[TickInput::default(); 2], 16.0);
            if state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::ShotBounced { .. }))
            {
                bounced = true;
                break;
            }
        }
        assert!(bounced, "shot never reached the wall");
        assert!(state.shots[0].dir.x < 0.0, "x component reflects");
        assert_eq!(state.shots[0].dir.y, 0.0);
        assert!(state.shots[0].is_active(), "bounce keeps the shot live");
    }

    #[test]
    fn test_mutual_point_blank_kills_once_each() {
        // Both tanks overlap; both fire in the same tick
        let arena = Arena::new(vec![], vec![DVec2::new(0.0, 0.0), DVec2::new(0.2, 0.0)]);
        let mut state = duel(arena);

        let both_fire = [
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
        ];
        tick(&mut state, &both_fire, 16.0);

        assert!(!state.tank(PlayerId::One).is_alive());
        assert!(!state.tank(PlayerId::Two).is_alive());
        let kills = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::TankDestroyed { .. }))
            .count();
        assert_eq!(kills, 2, "each tank dies exactly once");
    }

    #[test]
    fn test_determinism() {
        // Two matches with the same seed and script stay identical
        let script = [
            fire_only(),
            [TickInput::default(); 2],
            [
                TickInput {
                    forward: true,
                    turn_left: true,
                    ..Default::default()
                },
                TickInput {
                    fire: true,
                    ..Default::default()
                },
            ],
            [TickInput::default(); 2],
        ];

        let mut a = duel(open_arena());
        let mut b = duel(open_arena());
        for inputs in &script {
            tick(&mut a, inputs, 16.0);
            tick(&mut b, inputs, 16.0);
        }

        assert_eq!(a.clock_ms, b.clock_ms);
        assert_eq!(a.shots.len(), b.shots.len());
        assert_eq!(a.tank(PlayerId::One).pos, b.tank(PlayerId::One).pos);
        assert_eq!(
            a.tank(PlayerId::One).facing_deg,
            b.tank(PlayerId::One).facing_deg
        );
    }
}
