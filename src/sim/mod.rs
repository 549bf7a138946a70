//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, I/O or platform dependencies

pub mod autopilot;
pub mod barrel;
pub mod encounter;
pub mod geometry;
pub mod level;
pub mod player;
pub mod state;
pub mod tick;
pub mod timer;

pub use barrel::{Barrel, BarrelState, Heading};
pub use geometry::{Rect, circle_rect_overlaps, horizontally_aligned, overlaps};
pub use level::{Ladder, LevelLayout, Platform, build_level};
pub use player::{Player, PlayerState};
pub use state::{BarrelLoss, GameEvent, GamePhase, Pickup, World};
pub use tick::{TickInput, tick};
pub use timer::Countdown;
