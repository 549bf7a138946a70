//! Text file backed score store

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use super::ScoreStore;
use crate::highscores::HighScores;

/// Default file name next to the working directory
pub const DEFAULT_SCORE_FILE: &str = "ape_climb_scores.txt";

/// High scores in a plain text file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreFile {
    path: PathBuf,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl Default for ScoreFile {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_FILE)
    }
}

impl ScoreStore for ScoreFile {
    fn load(&self) -> io::Result<HighScores> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let scores = HighScores::parse(&text);
                log::info!(
                    "Loaded {} high scores from {}",
                    scores.entries.len(),
                    self.path.display()
                );
                Ok(scores)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No high scores at {}, starting fresh", self.path.display());
                Ok(HighScores::new())
            }
            Err(e) => Err(e),
        }
    }

    fn save(&mut self, scores: &HighScores) -> io::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, scores.to_text())?;
        fs::rename(&tmp, &self.path)?;
        log::info!(
            "High scores saved ({} entries) to {}",
            scores.entries.len(),
            self.path.display()
        );
        Ok(())
    }
}
