//! Game state and core simulation types
//!
//! Tanks, shots, walls, and the match-level [`GameState`] that owns them.
//! All timing runs off the simulation clock carried in [`GameState`], never
//! off ambient wall-clock reads, so a match is fully reproducible from a seed
//! and an input script.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::Config;
use crate::{heading, normalize_deg};

use super::collision::{reflect_off, wall_contact};
use super::rect::Rect;

/// Which of the two tanks an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// The other player
    #[inline]
    pub fn opponent(&self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Index into the tank array
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

/// A player-controlled tank
#[derive(Debug, Clone)]
pub struct Tank {
    pub id: PlayerId,
    /// Center position
    pub pos: DVec2,
    /// Facing angle in degrees; converted to radians at trig call sites
    pub facing_deg: f64,
    /// Rectangle half-extents
    pub half: DVec2,
    /// World units per second; doubles as the turn rate in degrees per second
    pub speed: f64,
    /// Render color handle (0xRRGGBB), owned by the host renderer
    pub color: u32,
    alive: bool,
    died_at_ms: Option<f64>,
}

impl Tank {
    pub fn new(id: PlayerId, pos: DVec2, facing_deg: f64, config: &Config, color: u32) -> Self {
        Self {
            id,
            pos,
            facing_deg: normalize_deg(facing_deg),
            half: DVec2::new(config.tank_half_width, config.tank_half_height),
            speed: config.tank_speed,
            color,
            alive: true,
            died_at_ms: None,
        }
    }

    /// Collision footprint
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.half)
    }

    /// Pure liveness predicate; respawning happens in the tick pass, never
    /// as a side effect of this query.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Displace along the current facing. No-op while dead.
    pub fn move_forwards(&mut self, delta_ms: f64) {
        if !self.alive {
            return;
        }
        let distance = self.speed * delta_ms / 1000.0;
        self.pos += heading(self.facing_deg) * distance;
    }

    /// Displace against the current facing. No-op while dead.
    pub fn move_backwards(&mut self, delta_ms: f64) {
        if !self.alive {
            return;
        }
        let distance = self.speed * delta_ms / 1000.0;
        self.pos -= heading(self.facing_deg) * distance;
    }

    /// Turn counter-clockwise. The turn rate reuses the movement speed as
    /// degrees per second. No-op while dead.
    pub fn rotate_left(&mut self, delta_ms: f64) {
        if !self.alive {
            return;
        }
        self.facing_deg = normalize_deg(self.facing_deg + self.speed * delta_ms / 1000.0);
    }

    /// Turn clockwise. No-op while dead.
    pub fn rotate_right(&mut self, delta_ms: f64) {
        if !self.alive {
            return;
        }
        self.facing_deg = normalize_deg(self.facing_deg - self.speed * delta_ms / 1000.0);
    }

    /// Destroy the tank, freezing it in place until the respawn pass picks it
    /// back up. A tank that is already down cannot be damaged again.
    pub fn kill(&mut self, now_ms: f64) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.died_at_ms = Some(now_ms);
    }

    /// True once the respawn delay has fully elapsed
    pub(crate) fn respawn_due(&self, now_ms: f64, respawn_delay_ms: f64) -> bool {
        match self.died_at_ms {
            Some(died_at) => now_ms - died_at >= respawn_delay_ms,
            None => false,
        }
    }

    /// Relocate and revive; called only from the tick respawn pass
    pub(crate) fn respawn_at(&mut self, spawn: DVec2) {
        self.pos = spawn;
        self.alive = true;
        self.died_at_ms = None;
    }

    /// Angle to render the hull at. Downed tanks spin with the caller's
    /// clock; purely cosmetic, simulation state is untouched.
    pub fn display_angle(&self, now_ms: f64) -> f64 {
        if self.alive {
            self.facing_deg
        } else {
            normalize_deg(self.facing_deg + (now_ms % 60.0) * 60.0)
        }
    }
}

/// A time-limited projectile fired by a tank
#[derive(Debug, Clone)]
pub struct Shot {
    pub id: u32,
    /// Non-owning back-reference, used for self-immunity and color lookup
    pub owner: PlayerId,
    /// Center position
    pub pos: DVec2,
    /// Unit direction of travel
    pub dir: DVec2,
    /// Half-extent of the square footprint
    pub half_extent: f64,
    /// World units per millisecond
    pub speed: f64,
    lifetime_ms: f64,
    age_ms: f64,
    active: bool,
}

impl Shot {
    pub fn new(
        id: u32,
        owner: PlayerId,
        origin: DVec2,
        angle_deg: f64,
        config: &Config,
    ) -> Self {
        Self {
            id,
            owner,
            pos: origin,
            dir: heading(angle_deg),
            half_extent: config.shot_half_extent,
            speed: config.shot_speed,
            lifetime_ms: config.shot_lifetime_ms,
            age_ms: 0.0,
            active: true,
        }
    }

    /// Collision footprint (square)
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, DVec2::splat(self.half_extent))
    }

    /// Whether the shot still interacts with the arena. Shots deactivate
    /// exactly once (lifetime expiry or tank hit) and are then pruned, never
    /// reused.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the shot and age it. Expiry is checked on every call, so a
    /// shot past its lifetime deactivates even on a zero-delta update.
    pub fn advance(&mut self, delta_ms: f64) {
        if !self.active {
            return;
        }
        self.pos += self.dir * self.speed * delta_ms;
        self.age_ms += delta_ms;
        if self.age_ms > self.lifetime_ms {
            self.active = false;
        }
    }

    /// Overlap depths against a wall when penetrating it, `None` otherwise
    pub fn hits_wall(&self, wall: &Wall) -> Option<DVec2> {
        wall_contact(&self.rect(), &wall.rect)
    }

    /// Whether the shot hits the given tank. Always false against the
    /// owner (self-immunity) and against downed tanks, regardless of
    /// geometric overlap.
    pub fn hits_tank(&self, tank: &Tank) -> bool {
        if tank.id == self.owner || !tank.is_alive() {
            return false;
        }
        self.rect().overlaps(&tank.rect())
    }

    /// Bounce off a wall: reflect across the axis of least penetration.
    /// The shot stays live; walls absorb nothing.
    pub fn bounce(&mut self, overlap: DVec2) {
        self.dir = reflect_off(self.dir, overlap);
    }

    /// Terminal hit response: the shot goes inactive, exactly once
    pub(crate) fn expend(&mut self) {
        self.active = false;
    }
}

/// Static arena obstacle; immutable once placed, read-only to the combat core
#[derive(Debug, Clone)]
pub struct Wall {
    pub rect: Rect,
}

impl Wall {
    pub fn new(center: DVec2, half: DVec2) -> Self {
        Self {
            rect: Rect::new(center, half),
        }
    }
}

/// Map geometry: obstacle walls plus the respawn point pool
#[derive(Debug, Clone)]
pub struct Arena {
    pub walls: Vec<Wall>,
    spawn_points: Vec<DVec2>,
}

impl Arena {
    /// Precondition: at least one finite spawn point.
    pub fn new(walls: Vec<Wall>, spawn_points: Vec<DVec2>) -> Self {
        assert!(
            !spawn_points.is_empty(),
            "arena: at least one spawn point required"
        );
        assert!(
            spawn_points.iter().all(|p| p.is_finite()),
            "arena: non-finite spawn point"
        );
        Self {
            walls,
            spawn_points,
        }
    }

    /// Rectangular arena spanning (0,0)..(width,height) with four border
    /// walls of the given thickness, centered just outside the playfield.
    pub fn bounded(
        width: f64,
        height: f64,
        wall_thickness: f64,
        spawn_points: Vec<DVec2>,
    ) -> Self {
        let t = wall_thickness / 2.0;
        let walls = vec![
            // left, right
            Wall::new(DVec2::new(-t, height / 2.0), DVec2::new(t, height / 2.0 + t * 2.0)),
            Wall::new(
                DVec2::new(width + t, height / 2.0),
                DVec2::new(t, height / 2.0 + t * 2.0),
            ),
            // top, bottom
            Wall::new(DVec2::new(width / 2.0, -t), DVec2::new(width / 2.0 + t * 2.0, t)),
            Wall::new(
                DVec2::new(width / 2.0, height + t),
                DVec2::new(width / 2.0 + t * 2.0, t),
            ),
        ];
        Self::new(walls, spawn_points)
    }

    pub fn spawn_points(&self) -> &[DVec2] {
        &self.spawn_points
    }
}

/// State transitions surfaced to the host for sound/score/logging.
/// Cleared at the start of every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ShotFired { shot: u32, owner: PlayerId },
    ShotExpired { shot: u32 },
    ShotBounced { shot: u32 },
    TankDestroyed { victim: PlayerId, shot: u32 },
    TankRespawned { player: PlayerId },
}

/// Complete match state. Single owner of the shot registry; nothing outside
/// the tick pass mutates the collection.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Match seed for reproducibility
    pub seed: u64,
    pub config: Config,
    pub arena: Arena,
    pub tanks: [Tank; 2],
    /// Live shots across both tanks, pruned of inactive entries every tick
    pub shots: Vec<Shot>,
    /// Simulation clock, milliseconds since match start
    pub clock_ms: f64,
    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_shot_id: u32,
}

impl GameState {
    /// Start a match. The first two spawn points seat the tanks, facing each
    /// other along the X axis.
    pub fn new(config: Config, arena: Arena, seed: u64) -> Self {
        config.validate();
        let spawns = arena.spawn_points();
        let start_one = spawns[0];
        let start_two = spawns[spawns.len().min(2) - 1];

        let tanks = [
            Tank::new(PlayerId::One, start_one, 0.0, &config, 0xcc3333),
            Tank::new(PlayerId::Two, start_two, 180.0, &config, 0x3366cc),
        ];

        Self {
            seed,
            config,
            arena,
            tanks,
            shots: Vec::new(),
            clock_ms: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_shot_id: 1,
        }
    }

    #[inline]
    pub fn tank(&self, id: PlayerId) -> &Tank {
        &self.tanks[id.index()]
    }

    #[inline]
    pub fn tank_mut(&mut self, id: PlayerId) -> &mut Tank {
        &mut self.tanks[id.index()]
    }

    /// Single-outstanding-shot gate: a downed tank never fires, and a live
    /// one only when none of its previous shots is still active.
    pub fn can_fire(&self, id: PlayerId) -> bool {
        self.tank(id).is_alive()
            && !self.shots.iter().any(|s| s.owner == id && s.is_active())
    }

    /// Fire from the tank's current position along its facing. Silently
    /// ignored while the gate is closed; that is not an error.
    pub fn fire(&mut self, id: PlayerId) {
        if !self.can_fire(id) {
            return;
        }
        let shot_id = self.next_shot_id;
        self.next_shot_id += 1;

        let tank = self.tank(id);
        let shot = Shot::new(shot_id, id, tank.pos, tank.facing_deg, &self.config);
        log::debug!("shot {shot_id} fired by {id:?} at {:.2},{:.2}", tank.pos.x, tank.pos.y);

        self.shots.push(shot);
        self.events.push(GameEvent::ShotFired {
            shot: shot_id,
            owner: id,
        });
    }

    /// Shots render in their owner's color; the renderer resolves it here
    /// through the shot's back-reference.
    pub fn shot_color(&self, shot: &Shot) -> u32 {
        self.tank(shot.owner).color
    }

    /// Draw a respawn point from the arena pool
    pub(crate) fn pick_spawn_point(&mut self) -> DVec2 {
        let spawns = self.arena.spawn_points();
        spawns[self.rng.random_range(0..spawns.len())]
    }
}
