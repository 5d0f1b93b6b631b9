//! Game tuning values
//!
//! Loaded from JSON by the host application, or taken from defaults. All
//! values are validated up front so the simulation never sees degenerate
//! geometry or non-finite timings.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable parameters for a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Tank half-width, world units
    pub tank_half_width: f64,
    /// Tank half-height, world units
    pub tank_half_height: f64,
    /// Tank speed, world units per second; rotation reuses this as deg/s
    pub tank_speed: f64,

    /// Shot half-extent (shots are squares)
    pub shot_half_extent: f64,
    /// Shot speed, world units per millisecond
    pub shot_speed: f64,
    /// Shots expire this many milliseconds after firing
    pub shot_lifetime_ms: f64,

    /// How long a destroyed tank stays down before relocating
    pub respawn_delay_ms: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tank_half_width: TANK_HALF_WIDTH,
            tank_half_height: TANK_HALF_HEIGHT,
            tank_speed: TANK_SPEED,
            shot_half_extent: SHOT_HALF_EXTENT,
            shot_speed: SHOT_SPEED,
            shot_lifetime_ms: SHOT_LIFETIME_MS,
            respawn_delay_ms: RESPAWN_DELAY_MS,
        }
    }
}

impl Config {
    /// Parse a config from JSON, falling back to defaults for missing fields
    /// is deliberately not supported: a partial config is a config error.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate();
        Ok(config)
    }

    /// Serialize to pretty JSON (for writing out a template config)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Panics on degenerate values. Zero or negative extents and non-finite
    /// timings are configuration errors, not runtime-recoverable conditions.
    pub fn validate(&self) {
        let positive = [
            ("tank_half_width", self.tank_half_width),
            ("tank_half_height", self.tank_half_height),
            ("tank_speed", self.tank_speed),
            ("shot_half_extent", self.shot_half_extent),
            ("shot_speed", self.shot_speed),
            ("shot_lifetime_ms", self.shot_lifetime_ms),
        ];
        for (name, value) in positive {
            assert!(
                value.is_finite() && value > 0.0,
                "config: {name} must be finite and positive, got {value}"
            );
        }
        assert!(
            self.respawn_delay_ms.is_finite() && self.respawn_delay_ms >= 0.0,
            "config: respawn_delay_ms must be finite and non-negative, got {}",
            self.respawn_delay_ms
        );
    }
}
