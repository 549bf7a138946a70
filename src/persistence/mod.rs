//! High score storage
//!
//! Features:
//! - Line-oriented text file (`<name> <score>`)
//! - Write to a temp file, then rename over the old one
//! - Missing file reads as an empty leaderboard
//! - In-memory store for tests and headless runs

mod score_file;

pub use score_file::{DEFAULT_SCORE_FILE, ScoreFile};

use std::io;

use crate::highscores::HighScores;

/// Somewhere high scores can be loaded from and saved to
pub trait ScoreStore {
    fn load(&self) -> io::Result<HighScores>;
    fn save(&mut self, scores: &HighScores) -> io::Result<()>;
}

/// Keeps the leaderboard in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: HighScores,
    /// Number of successful saves
    pub saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scores(scores: HighScores) -> Self {
        Self { scores, saves: 0 }
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> io::Result<HighScores> {
        Ok(self.scores.clone())
    }

    fn save(&mut self, scores: &HighScores) -> io::Result<()> {
        self.scores = scores.clone();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());
        let mut scores = HighScores::new();
        scores.record("ann", 10);
        store.save(&scores).unwrap();
        assert_eq!(store.load().unwrap(), scores);
        assert_eq!(store.saves, 1);
    }
}
