//! Data-driven game balance
//!
//! Every value here has a sensible arcade default and can be overridden from
//! the `tuning` block of the settings file.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Shortest duration a timer may be armed with. A countdown that starts
/// expired never fires.
pub const MIN_TIMER_SECS: f32 = 0.01;

/// What happens to a barrel that hits an unprotected player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BarrelHitPolicy {
    /// The barrel breaks on impact
    #[default]
    Destroy,
    /// The barrel keeps rolling, only the player is reset
    Survive,
}

/// Gameplay balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Run speed (px/s)
    pub player_speed: f32,
    /// Upward velocity applied on jump (px/s)
    pub jump_impulse: f32,
    /// Ladder climb speed (px/s)
    pub climb_speed: f32,
    /// Downward acceleration for player and barrels (px/s²)
    pub gravity: f32,
    /// Lives at the start of a run
    pub start_lives: u32,

    // === Barrels ===
    /// Barrel diameter
    pub barrel_size: f32,
    /// Roll speed on level 1 (px/s)
    pub barrel_speed: f32,
    /// Chance (percent) that a barrel takes a ladder it rolls over
    pub ladder_drop_percent: u32,
    /// Fixed downward speed when a barrel takes a ladder
    pub ladder_drop_speed: f32,
    /// Delay before the first barrel of a level
    pub first_spawn_secs: f32,
    /// Shortest spawn interval (before level scaling)
    pub spawn_min_secs: f32,
    /// Random extra on top of the shortest interval
    pub spawn_jitter_secs: f32,
    /// Per-level speed-up of barrel speed and spawn rate
    pub level_speedup: f32,
    /// Cap on the per-level speed-up factor
    pub max_level_factor: f32,
    /// Whether a barrel survives hitting the player
    pub barrel_hit_policy: BarrelHitPolicy,

    // === Hammer ===
    /// Power-up duration (seconds)
    pub hammer_secs: f32,
    /// Pickup comes back after this long (None = once per level)
    pub pickup_respawn_secs: Option<f32>,

    // === Scoring ===
    /// Points per second of play
    pub points_per_second: u64,
    /// Points for smashing a barrel
    pub smash_bonus: u64,
    /// Points lost when hit (floored at zero)
    pub hit_penalty: u64,
    /// Points for reaching the goal
    pub level_bonus: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 160.0,
            jump_impulse: 420.0,
            climb_speed: 100.0,
            gravity: 1000.0,
            start_lives: 3,

            barrel_size: 18.0,
            barrel_speed: 140.0,
            ladder_drop_percent: 25,
            ladder_drop_speed: 250.0,
            first_spawn_secs: 2.0,
            spawn_min_secs: 1.0,
            spawn_jitter_secs: 1.0,
            level_speedup: 0.1,
            max_level_factor: 2.0,
            barrel_hit_policy: BarrelHitPolicy::Destroy,

            hammer_secs: 10.0,
            pickup_respawn_secs: None,

            points_per_second: 10,
            smash_bonus: 100,
            hit_penalty: 50,
            level_bonus: 500,
        }
    }
}

impl Tuning {
    /// Difficulty multiplier for a level (1.0 on level 1)
    pub fn level_factor(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (1.0 + self.level_speedup * steps).clamp(1.0, self.max_level_factor.max(1.0))
    }

    /// Barrel roll speed on a level
    pub fn barrel_speed_for(&self, level: u32) -> f32 {
        self.barrel_speed * self.level_factor(level)
    }

    /// Draw the next spawn interval for a level
    pub fn next_spawn_interval<R: Rng>(&self, rng: &mut R, level: u32) -> f32 {
        let jitter = rng.random::<f32>() * self.spawn_jitter_secs;
        (self.spawn_min_secs + jitter) / self.level_factor(level)
    }

    /// Sanitize values loaded from disk
    pub fn validated(mut self) -> Self {
        self.ladder_drop_percent = self.ladder_drop_percent.min(100);
        self.start_lives = self.start_lives.max(1);
        self.spawn_min_secs = self.spawn_min_secs.max(0.05);
        self.spawn_jitter_secs = self.spawn_jitter_secs.max(0.0);
        self.level_speedup = self.level_speedup.max(0.0);
        self.first_spawn_secs = self.first_spawn_secs.max(MIN_TIMER_SECS);
        self.hammer_secs = self.hammer_secs.max(MIN_TIMER_SECS);
        self.pickup_respawn_secs = self.pickup_respawn_secs.map(|s| s.max(MIN_TIMER_SECS));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_level_factor_scales_and_caps() {
        let tuning = Tuning::default();
        assert_eq!(tuning.level_factor(1), 1.0);
        assert!((tuning.level_factor(3) - 1.2).abs() < 1e-5);
        assert_eq!(tuning.level_factor(50), 2.0);
        assert_eq!(tuning.barrel_speed_for(1), 140.0);
    }

    #[test]
    fn test_spawn_interval_band() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let secs = tuning.next_spawn_interval(&mut rng, 1);
            assert!((1.0..2.0).contains(&secs));
        }
        // Level 11 is twice as fast
        for _ in 0..1000 {
            let secs = tuning.next_spawn_interval(&mut rng, 11);
            assert!((0.5..1.0).contains(&secs));
        }
    }

    #[test]
    fn test_validated_clamps_percent() {
        let tuning = Tuning {
            ladder_drop_percent: 400,
            start_lives: 0,
            ..Default::default()
        }
        .validated();
        assert_eq!(tuning.ladder_drop_percent, 100);
        assert_eq!(tuning.start_lives, 1);
    }

    #[test]
    fn test_validated_arms_timers() {
        let tuning = Tuning {
            first_spawn_secs: 0.0,
            hammer_secs: -1.0,
            pickup_respawn_secs: Some(0.0),
            ..Default::default()
        }
        .validated();
        assert_eq!(tuning.first_spawn_secs, MIN_TIMER_SECS);
        assert_eq!(tuning.hammer_secs, MIN_TIMER_SECS);
        assert_eq!(tuning.pickup_respawn_secs, Some(MIN_TIMER_SECS));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning: Tuning =
            serde_json::from_str(r#"{"hammer_secs": 4.5, "barrel_hit_policy": "Survive"}"#)
                .unwrap();
        assert_eq!(tuning.hammer_secs, 4.5);
        assert_eq!(tuning.barrel_hit_policy, BarrelHitPolicy::Survive);
        assert_eq!(tuning.ladder_drop_percent, 25);
    }
}
