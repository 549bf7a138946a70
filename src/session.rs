//! Fixed-step frame driver and high score bookkeeping
//!
//! A [`Session`] owns the [`World`], turns variable frame times into whole
//! simulation steps and records the score when a run ends.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScores;
use crate::persistence::ScoreStore;
use crate::sim::{GameEvent, TickInput, World, tick};

/// Longest frame time accepted; anything longer is treated as a hitch
const MAX_FRAME_SECS: f32 = 0.1;

/// A play session: world, leaderboard and the store behind it
pub struct Session<S: ScoreStore> {
    world: World,
    store: S,
    scores: HighScores,
    player_name: String,
    accumulator: f32,
    /// Input for the next step; one-shot presses are cleared once consumed
    input: TickInput,
}

impl<S: ScoreStore> Session<S> {
    pub fn new(world: World, store: S, player_name: impl Into<String>) -> Self {
        let scores = load_scores(&store);
        Self {
            world,
            store,
            scores,
            player_name: player_name.into(),
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Latch this frame's input.
    ///
    /// Held keys replace the previous state; presses stay latched until a
    /// simulation step consumes them, so a press between steps is never lost.
    pub fn set_input(&mut self, input: TickInput) {
        let jump = self.input.jump || input.jump;
        let restart = self.input.restart || input.restart;
        self.input = TickInput {
            jump,
            restart,
            ..input
        };
    }

    /// Advance by a frame's worth of elapsed time; returns the events of
    /// every step that ran
    pub fn advance(&mut self, dt: f32) -> Vec<GameEvent> {
        // A bad frame time must not poison the accumulator
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_SECS)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let step_events = tick(&mut self.world, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.jump = false;
            self.input.restart = false;

            for event in &step_events {
                self.on_event(event);
            }
            events.extend(step_events);
        }
        events
    }

    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameOver { score, level } => {
                if !self.scores.qualifies(*score) {
                    log::info!(
                        "{} scored {} (level {}), not a high score",
                        self.player_name,
                        score,
                        level
                    );
                    return;
                }
                let rank = self.scores.record(&self.player_name, *score);
                match rank {
                    Some(rank) => log::info!(
                        "{} scored {} (level {}), rank {}",
                        self.player_name,
                        score,
                        level,
                        rank
                    ),
                    None => log::info!(
                        "{} scored {} (level {})",
                        self.player_name,
                        score,
                        level
                    ),
                }
                if let Err(e) = self.store.save(&self.scores) {
                    log::warn!("Failed to save high scores: {}", e);
                }
            }
            GameEvent::Restarted => {
                self.scores = load_scores(&self.store);
            }
            GameEvent::LevelCleared { level } => {
                log::info!("Level cleared, now on level {}", level);
            }
            _ => {}
        }
    }
}

fn load_scores<S: ScoreStore>(store: &S) -> HighScores {
    store.load().unwrap_or_else(|e| {
        log::warn!("Failed to load high scores: {}", e);
        HighScores::new()
    })
}
