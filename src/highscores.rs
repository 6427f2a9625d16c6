//! High score table
//!
//! Persisted as an append-only `name,score` file. Reading loads the whole
//! table and sorts it descending by score.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: f64,
}

impl HighScoreEntry {
    /// Row as written to the score file
    fn to_row(&self) -> String {
        // Commas would split the row on reload
        let name = self.name.replace([',', '\n', '\r'], " ");
        format!("{},{:.2}", name, self.score)
    }

    fn from_row(row: &str) -> Option<Self> {
        let (name, score) = row.rsplit_once(',')?;
        let score = score.trim().parse().ok()?;
        Some(Self {
            name: name.trim().to_string(),
            score,
        })
    }
}

/// High score leaderboard, sorted descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from rows in any order
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self { entries }
    }

    /// Read the whole table. A missing file is an empty table; unparseable
    /// rows are skipped with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No score table at {}, starting fresh", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(LoadError::io(path, e)),
        };

        let mut entries = Vec::new();
        for (i, row) in text.lines().enumerate() {
            if row.trim().is_empty() {
                continue;
            }
            match HighScoreEntry::from_row(row) {
                Some(entry) => entries.push(entry),
                None => log::warn!("Skipping bad score row {}:{}: {row}", path.display(), i + 1),
            }
        }
        log::info!("Loaded {} high scores", entries.len());
        Ok(Self::from_entries(entries))
    }

    /// Append one entry to the table on disk
    pub fn append(path: impl AsRef<Path>, entry: &HighScoreEntry) -> Result<(), LoadError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LoadError::io(parent, e))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LoadError::io(path, e))?;
        writeln!(file, "{}", entry.to_row()).map_err(|e| LoadError::io(path, e))?;
        log::info!("Score saved ({} - {:.2})", entry.name, entry.score);
        Ok(())
    }

    /// Best `n` entries
    pub fn top(&self, n: usize) -> &[HighScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<f64> {
        self.entries.first().map(|e| e.score)
    }
}
