//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped only, driven by caller-supplied millisecond deltas
//! - Seeded RNG only (respawn point selection)
//! - Fixed order of operations within a tick (respawn, input, shots, walls
//!   before tanks, prune)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{reflect_off, wall_contact};
pub use rect::Rect;
pub use state::{Arena, GameEvent, GameState, PlayerId, Shot, Tank, Wall};
pub use tick::{TickInput, tick};
