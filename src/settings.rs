//! Game settings and preferences
//!
//! Read from a JSON file at startup. Every field has a default, so a partial
//! file (or none at all) is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persistence::DEFAULT_SCORE_FILE;
use crate::tuning::Tuning;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "APE_CLIMB_SETTINGS";
/// Settings file used when the variable is unset
pub const DEFAULT_SETTINGS_FILE: &str = "ape_climb.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name recorded with high scores
    pub player_name: String,
    /// Where high scores are kept
    pub scores_path: PathBuf,
    /// Fixed run seed (random per run when unset)
    pub seed: Option<u64>,

    // === Frontend ===
    /// Let the autopilot play instead of reading the keyboard
    pub demo: bool,
    /// Run without drawing, as fast as possible (always the autopilot)
    pub headless: bool,
    /// How long the demo plays before exiting (seconds of game time)
    pub demo_seconds: f32,
    /// Terminal redraws per second
    pub render_fps: u32,

    // === Gameplay ===
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: "player".to_string(),
            scores_path: PathBuf::from(DEFAULT_SCORE_FILE),
            seed: None,

            demo: false,
            headless: false,
            demo_seconds: 60.0,
            render_fps: 15,

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Settings file location from the environment, or the default name
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Parse settings JSON, sanitizing values
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    /// Load settings; missing or unreadable files fall back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Bad settings in {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    fn validated(mut self) -> Self {
        self.tuning = self.tuning.validated();
        self.render_fps = self.render_fps.clamp(1, 120);
        self.demo_seconds = self.demo_seconds.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{"player_name": "kong", "tuning": {"hammer_secs": 4.0}}"#)
                .unwrap();
        assert_eq!(settings.player_name, "kong");
        assert_eq!(settings.tuning.hammer_secs, 4.0);
        assert_eq!(settings.tuning.jump_impulse, 420.0);
        assert_eq!(settings.render_fps, 15);
        assert_eq!(settings.seed, None);
        assert!(!settings.demo);
    }

    #[test]
    fn test_values_are_sanitized() {
        let settings =
            Settings::from_json(r#"{"render_fps": 0, "tuning": {"ladder_drop_percent": 400}}"#)
                .unwrap();
        assert_eq!(settings.render_fps, 1);
        assert_eq!(settings.tuning.ladder_drop_percent, 100);
    }

    #[test]
    fn test_hit_policy_from_json() {
        let settings =
            Settings::from_json(r#"{"tuning": {"barrel_hit_policy": "Survive"}}"#).unwrap();
        assert_eq!(
            settings.tuning.barrel_hit_policy,
            crate::tuning::BarrelHitPolicy::Survive
        );
    }

    #[test]
    fn test_bad_or_missing_file_falls_back() {
        let dir = std::env::temp_dir().join(format!("ape-climb-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        assert_eq!(Settings::load(&dir.join("absent.json")), Settings::default());

        let bad = dir.join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert_eq!(Settings::load(&bad), Settings::default());

        let good = dir.join("good.json");
        let mut settings = Settings::default();
        settings.seed = Some(42);
        settings.save(&good).unwrap();
        assert_eq!(Settings::load(&good), settings);

        let _ = std::fs::remove_dir_all(dir);
    }
}
