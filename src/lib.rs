//! Tank Duel - combat core for a two-player top-down arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, projectiles, collisions)
//! - `config`: Data-driven tuning values
//!
//! The crate owns only the entity logic: tanks, shots, walls, and the
//! per-frame collision pass. Windowing, input polling, and rendering live in
//! the host application, which drives [`sim::tick`] once per frame with the
//! elapsed milliseconds and reads state back afterwards (update before
//! render).

pub mod config;
pub mod sim;

pub use config::Config;

use glam::DVec2;

/// Game configuration constants (defaults; see [`Config`] for overrides)
pub mod consts {
    /// Tank half-width, world units
    pub const TANK_HALF_WIDTH: f64 = 0.5;
    /// Tank half-height, world units
    pub const TANK_HALF_HEIGHT: f64 = 0.5;
    /// Tank speed, world units per second (rotation reuses this as deg/s)
    pub const TANK_SPEED: f64 = 1.0;

    /// Shot half-extent (shots are squares)
    pub const SHOT_HALF_EXTENT: f64 = 0.1;
    /// Shot speed, world units per millisecond
    pub const SHOT_SPEED: f64 = 0.005;
    /// Shots expire this many milliseconds after firing
    pub const SHOT_LIFETIME_MS: f64 = 3000.0;

    /// How long a destroyed tank stays down before relocating
    pub const RESPAWN_DELAY_MS: f64 = 500.0;
}

/// Unit direction vector for a facing angle given in degrees
#[inline]
pub fn heading(angle_deg: f64) -> DVec2 {
    let rad = angle_deg.to_radians();
    DVec2::new(rad.cos(), rad.sin())
}

/// Normalize a facing angle to [0, 360)
#[inline]
pub fn normalize_deg(mut angle: f64) -> f64 {
    angle %= 360.0;
    if angle < 0.0 {
        angle += 360.0;
    }
    angle
}
