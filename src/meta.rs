//! Meta-progression: leaderboard and unlocks
//!
//! Cross-run records fed by end-of-run summaries. Everything here is plain
//! serde data plus JSON helpers; the persistence collaborator owns the
//! actual storage and falls back to defaults on any read failure.

use serde::{Deserialize, Serialize};

use crate::sim::CharacterKind;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// End-of-run facts handed to the meta layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub level: u32,
    pub kills: u32,
    pub boss_kills: u32,
    pub survival_secs: f32,
    pub character: CharacterKind,
}

/// A single leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    pub level: u32,
    pub survival_secs: f32,
    /// Unix timestamp (ms) when achieved, supplied by the caller
    pub timestamp: f64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a run to the leaderboard if it qualifies. Returns the rank
    /// achieved (1-indexed) or None.
    pub fn add_run(&mut self, summary: &RunSummary, timestamp: f64) -> Option<usize> {
        if !self.qualifies(summary.score) {
            return None;
        }
        let entry = HighScoreEntry {
            score: summary.score,
            level: summary.level,
            survival_secs: summary.survival_secs,
            timestamp,
        };
        let pos = self.entries.iter().position(|e| summary.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

/// Lifetime totals driving character unlocks
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Unlocks {
    pub lifetime_score: u64,
    pub lifetime_kills: u64,
    pub lifetime_boss_kills: u64,
    pub runs_played: u32,
}

impl Unlocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one finished run into the lifetime totals.
    pub fn fold(&mut self, summary: &RunSummary) {
        self.lifetime_score += summary.score;
        self.lifetime_kills += summary.kills as u64;
        self.lifetime_boss_kills += summary.boss_kills as u64;
        self.runs_played += 1;
    }

    /// Whether a character is available. The thresholds are an explicit
    /// closed table, reviewable per variant.
    pub fn is_unlocked(&self, character: CharacterKind) -> bool {
        match character {
            CharacterKind::Vanguard => true,
            CharacterKind::Ranger => self.lifetime_score >= 5_000,
            CharacterKind::Bulwark => self.lifetime_score >= 20_000 || self.lifetime_boss_kills >= 3,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
