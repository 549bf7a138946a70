//! High score leaderboard
//!
//! Keeps the top five runs, best first. Stored as plain text, one
//! `<name> <score>` entry per line.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;

/// Name used when the player did not give one
pub const ANONYMOUS: &str = "anon";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player name (no whitespace)
    pub name: String,
    pub score: u64,
}

impl ScoreEntry {
    pub fn new(name: &str, score: u64) -> Self {
        Self {
            name: sanitize_name(name),
            score,
        }
    }
}

/// Names are stored as a single token: whitespace becomes `_`
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        ANONYMOUS.to_string()
    } else {
        cleaned
    }
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<ScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make it onto the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished run.
    ///
    /// Equal scores keep their arrival order, so an older entry stays ahead of
    /// a newer one with the same score. Returns the rank achieved (1-indexed)
    /// or None if the run fell off the bottom.
    pub fn record(&mut self, name: &str, score: u64) -> Option<usize> {
        self.entries.push(ScoreEntry::new(name, score));
        let newest = self.entries.len() - 1;
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        // Stable sort keeps arrival order among ties
        order.sort_by(|&a, &b| self.entries[b].score.cmp(&self.entries[a].score));
        let rank = order.iter().position(|&i| i == newest).map(|r| r + 1);

        self.normalize();
        rank.filter(|&r| r <= MAX_HIGH_SCORES)
    }

    /// Sort descending (stable) and drop everything past the capacity
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Parse the text format. Lines that are not `<name> <score>` are skipped.
    pub fn parse(text: &str) -> Self {
        let mut scores = Self::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_line(line) {
                Some(entry) => scores.entries.push(entry),
                None => log::debug!("Skipping malformed score line {}: {:?}", number + 1, line),
            }
        }
        scores.normalize();
        scores
    }

    /// Render in the text format, best first
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} {}\n", e.name, e.score))
            .collect()
    }
}

fn parse_line(line: &str) -> Option<ScoreEntry> {
    let (name, score) = line.rsplit_once(char::is_whitespace)?;
    let score = score.parse().ok()?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(ScoreEntry::new(name, score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_record_sorts_and_ranks() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record("ann", 300), Some(1));
        assert_eq!(scores.record("bob", 500), Some(1));
        assert_eq!(scores.record("cat", 100), Some(3));
        let names: Vec<&str> = scores.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["bob", "ann", "cat"]);
        assert_eq!(scores.top_score(), Some(500));
    }

    #[test]
    fn test_ties_keep_arrival_order() {
        let mut scores = HighScores::new();
        scores.record("first", 200);
        assert_eq!(scores.record("second", 200), Some(2));
        assert_eq!(scores.entries[0].name, "first");
        assert_eq!(scores.entries[1].name, "second");
    }

    #[test]
    fn test_capacity_and_qualification() {
        let mut scores = HighScores::new();
        for (i, s) in [50, 40, 30, 20, 10].into_iter().enumerate() {
            scores.record(&format!("p{i}"), s);
        }
        assert!(!scores.qualifies(10));
        assert!(scores.qualifies(35));
        assert_eq!(scores.record("late", 5), None);
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.record("good", 45), Some(2));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_parse_skips_garbage() {
        let text = "alice 900\n\nnot-a-score\nbob x\n  carol   450  \n 12\ndave -3\n";
        let scores = HighScores::parse(text);
        assert_eq!(
            scores.entries,
            vec![ScoreEntry::new("alice", 900), ScoreEntry::new("carol", 450)]
        );
    }

    #[test]
    fn test_text_format_round_trips() {
        let mut scores = HighScores::new();
        scores.record("Jump Man", 1200);
        scores.record("", 300);
        let text = scores.to_text();
        assert_eq!(text, "Jump_Man 1200\nanon 300\n");
        assert_eq!(HighScores::parse(&text), scores);
    }

    #[test]
    fn test_parse_truncates_long_files() {
        let text: String = (0..9).map(|i| format!("p{i} {}\n", i * 10)).collect();
        let scores = HighScores::parse(&text);
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(80));
    }

    proptest! {
        #[test]
        fn prop_bounded_and_sorted(runs in proptest::collection::vec(0u64..10_000, 0..40)) {
            let mut scores = HighScores::new();
            for (i, score) in runs.iter().enumerate() {
                scores.record(&format!("p{i}"), *score);
                prop_assert!(scores.entries.len() <= MAX_HIGH_SCORES);
                prop_assert!(scores.entries.windows(2).all(|w| w[0].score >= w[1].score));
            }
            let mut best = runs.clone();
            best.sort_unstable_by(|a, b| b.cmp(a));
            best.truncate(MAX_HIGH_SCORES);
            let kept: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
            prop_assert_eq!(kept, best);
        }
    }
}
