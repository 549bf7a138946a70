//! World state and core simulation types
//!
//! Everything the simulation mutates lives in [`World`]; there is no global state.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::barrel::Barrel;
use super::geometry::Rect;
use super::level::{LevelLayout, build_level};
use super::player::Player;
use super::timer::Countdown;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives, waiting for restart
    GameOver,
}

/// Why a barrel left play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarrelLoss {
    /// Rolled off the end of the floor
    RolledOffFloor,
    /// Left the play area
    OutOfBounds,
    /// Smashed by the hammer
    Smashed,
    /// Broke on the player
    HitPlayer,
}

/// Things that happened during a step, for logging, scoring and effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BarrelSpawned { id: u32 },
    /// Rolled off a platform end toward the given platform
    BarrelDropped { id: u32, platform: usize },
    BarrelTookLadder { id: u32, ladder: usize },
    BarrelDestroyed { id: u32, cause: BarrelLoss },
    /// Hammer smash, score awarded
    BarrelSmashed { id: u32, points: u64 },
    /// Player was hit and reset
    PlayerHit { barrel: u32, lives: u32 },
    /// Player fell out of the level
    PlayerFell { lives: u32 },
    HammerCollected,
    HammerExpired,
    PickupRespawned,
    /// Goal reached; `level` is the new level
    LevelCleared { level: u32 },
    GameOver { score: u64, level: u32 },
    Restarted,
}

/// The hammer pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub rect: Rect,
    pub available: bool,
    /// Counts down to re-enabling after being taken
    pub respawn: Option<Countdown>,
}

impl Pickup {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            available: true,
            respawn: None,
        }
    }
}

/// Complete world state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Randomness for ladder drops and spawn jitter
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    /// Simulation step counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub layout: LevelLayout,
    pub pickup: Option<Pickup>,
    pub player: Player,
    /// Live barrels (sorted by id)
    pub barrels: Vec<Barrel>,
    /// Time until the next barrel
    pub spawn_timer: Countdown,
    /// Pays out survival points once per second
    pub score_clock: Countdown,
    next_id: u32,
}

impl World {
    /// Create a new run with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let layout = build_level(1);
        let mut world = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(tuning.start_lives),
            spawn_timer: Countdown::new(tuning.first_spawn_secs),
            score_clock: Countdown::new(1.0),
            tuning,
            level: 1,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            pickup: None,
            layout,
            barrels: Vec::new(),
            next_id: 1,
        };
        world.load_level(1);
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the layout and reset everything that belongs to a level.
    ///
    /// Lives and score carry over.
    pub fn load_level(&mut self, level: u32) {
        self.level = level.max(1);
        self.layout = build_level(self.level);
        self.pickup = self.layout.pickup.map(Pickup::new);
        self.barrels.clear();
        self.player.respawn();
        self.player.hammer = None;
        self.spawn_timer.reset(self.tuning.first_spawn_secs);
        log::info!("Level {} loaded", self.level);
    }

    /// Fresh run: score, lives and level back to their starting values
    pub fn restart(&mut self) {
        self.score = 0;
        self.player.lives = self.tuning.start_lives;
        self.phase = GamePhase::Playing;
        self.score_clock.reset(1.0);
        self.load_level(1);
    }

    /// Score after a penalty, never below zero
    pub fn apply_penalty(&mut self, points: u64) {
        self.score = self.score.saturating_sub(points);
    }
}
