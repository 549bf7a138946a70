//! Ape Climb - a barrel-dodging ladder climbing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, world state)
//! - `session`: Fixed-step frame driver, high score bookkeeping
//! - `renderer`: Primitive-shape canvas abstraction and scene drawing
//! - `platform`: Clock and input abstraction
//! - `persistence`: High score storage
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use session::Session;
pub use settings::Settings;
pub use tuning::{BarrelHitPolicy, Tuning};

/// Game configuration constants
///
/// Geometry and collision tolerances live here; balance values that players
/// might want to tweak live in [`Tuning`].
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one step per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions
    pub const SCREEN_W: f32 = 800.0;
    pub const SCREEN_H: f32 = 720.0;
    /// Anything below this has fallen out of the level
    pub const WORLD_BOTTOM: f32 = SCREEN_H + 200.0;

    /// Player bounding box
    pub const PLAYER_W: f32 = 28.0;
    pub const PLAYER_H: f32 = 40.0;
    /// Chest point as a fraction of height, measured from the top
    pub const CHEST_FRACTION: f32 = 0.3;
    /// Player start position (feet on the floor)
    pub const START_X: f32 = 50.0;
    pub const START_Y: f32 = SCREEN_H - FLOOR_H - PLAYER_H;

    /// Landing band: feet may hover this far above a surface...
    pub const LAND_ABOVE: f32 = 4.0;
    /// ...or sink this far into it and still snap on top
    pub const LAND_BELOW: f32 = 8.0;
    /// Surfaces are shrunk by this much on each side for alignment checks
    pub const EDGE_INSET: f32 = 2.0;
    /// Ladder probe is the player box shrunk by this much on each side
    pub const LADDER_PROBE_INSET: f32 = 4.0;

    /// Barrel landing band below a surface
    pub const BARREL_LAND_BAND: f32 = 10.0;
    /// Barrels this close to a platform end pick the inward heading on landing
    pub const BARREL_EDGE_NUDGE: f32 = 4.0;
    /// Barrels further than this outside the play area are gone
    pub const BARREL_BOUNDS_MARGIN: f32 = 100.0;
    /// Ladder drops only happen while clearly rolling...
    pub const BARREL_DROP_MIN_VX: f32 = 20.0;
    /// ...and not already moving fast vertically
    pub const BARREL_DROP_MAX_VY: f32 = 200.0;

    /// Level layout
    pub const PLATFORM_ROWS: usize = 5;
    pub const PLATFORM_MARGIN: f32 = 60.0;
    pub const PLATFORM_THICKNESS: f32 = 16.0;
    pub const ROW_CUT: f32 = 120.0;
    pub const ROW_GAP: f32 = (SCREEN_H - 200.0) / PLATFORM_ROWS as f32;
    pub const LOWEST_ROW_Y: f32 = SCREEN_H - 100.0;
    pub const FLOOR_H: f32 = 40.0;
    pub const LADDER_W: f32 = 36.0;
    /// Ladders sit this far inside the x-range shared by the two platforms
    pub const LADDER_EDGE_OFFSET: f32 = 20.0;
    pub const GOAL_W: f32 = 80.0;
    pub const GOAL_H: f32 = 64.0;
    /// Goal rests this far above the top row
    pub const GOAL_RISE: f32 = 60.0;
    /// Player feet must clear goal y + this to win
    pub const WIN_CLEARANCE: f32 = 20.0;
    pub const PICKUP_SIZE: f32 = 28.0;
    /// Platform index the hammer pickup is placed on
    pub const PICKUP_PLATFORM: usize = 2;

    /// High score list capacity
    pub const MAX_HIGH_SCORES: usize = 5;
}
