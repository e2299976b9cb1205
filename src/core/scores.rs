//! High-score persistence
//!
//! Best (lowest) attempt counts per player, kept as a bare JSON object
//! (`{"Alice": 3}`) so the file stays hand-editable. The file is re-read at
//! the start of every save and written straight back; nothing is cached
//! between calls.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

/// Default score file, created in the directory the game runs from.
pub const SCORE_FILE: &str = "high_scores.json";

/// Player name -> best attempt count. Lower is better.
pub type ScoreTable = BTreeMap<String, u32>;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScoreError>;

/// How a load went. `Missing` and `Corrupt` both come back with an empty
/// table and are recoverable; callers just tell the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    Missing,
    Corrupt,
}

/// What [`HighScoreStore::record`] did with the submitted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// First score for this player.
    Saved,
    /// Strictly better than the stored score.
    NewHighScore,
    /// Equal or worse; the store is left untouched.
    NotImproved,
}

#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new(SCORE_FILE)
    }
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the score table from disk.
    ///
    /// A missing file is an empty table, and a file that does not parse as
    /// JSON is an empty table too; the status tells the caller which notice
    /// to show. Only real I/O failures are errors.
    pub fn load(&self) -> Result<(ScoreTable, LoadStatus)> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no score file yet");
                return Ok((ScoreTable::new(), LoadStatus::Missing));
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<ScoreTable>(&content) {
            Ok(scores) => Ok((scores, LoadStatus::Loaded)),
            Err(e) => {
                warn!(path = %self.path.display(), "score file is not valid JSON: {}", e);
                Ok((ScoreTable::new(), LoadStatus::Corrupt))
            }
        }
    }

    /// Record `attempts` for `player`, keeping only strict improvements.
    ///
    /// Loads the current table, updates it if the player is new or improved,
    /// and writes the whole table back. A non-improving score leaves the file
    /// untouched.
    pub fn record(&self, player: &str, attempts: u32) -> Result<SaveOutcome> {
        let (mut scores, _) = self.load()?;

        let outcome = match scores.get(player) {
            Some(&best) if attempts >= best => return Ok(SaveOutcome::NotImproved),
            Some(_) => SaveOutcome::NewHighScore,
            None => SaveOutcome::Saved,
        };

        scores.insert(player.to_string(), attempts);
        let content = serde_json::to_string_pretty(&scores)?;
        fs::write(&self.path, content)?;
        info!(player, attempts, path = %self.path.display(), "high score written");

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> HighScoreStore {
        HighScoreStore::new(dir.path().join(SCORE_FILE))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let (scores, status) = store.load().unwrap();
        assert!(scores.is_empty());
        assert_eq!(status, LoadStatus::Missing);
    }

    #[test]
    fn test_corrupt_file_is_empty_and_flagged() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "not json at all {").unwrap();

        let (scores, status) = store.load().unwrap();
        assert!(scores.is_empty());
        assert_eq!(status, LoadStatus::Corrupt);
    }

    #[test]
    fn test_record_and_reload() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.record("Alice", 5).unwrap(), SaveOutcome::Saved);

        let (scores, status) = store.load().unwrap();
        assert_eq!(status, LoadStatus::Loaded);
        assert_eq!(scores.get("Alice"), Some(&5));
    }

    #[test]
    fn test_only_strict_improvements_stick() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.record("Alice", 5).unwrap();
        assert_eq!(store.record("Alice", 3).unwrap(), SaveOutcome::NewHighScore);
        assert_eq!(store.record("Alice", 7).unwrap(), SaveOutcome::NotImproved);
        assert_eq!(store.record("Alice", 3).unwrap(), SaveOutcome::NotImproved);

        let (scores, _) = store.load().unwrap();
        assert_eq!(scores.get("Alice"), Some(&3));
    }

    #[test]
    fn test_recording_over_corrupt_file_starts_fresh() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "garbage").unwrap();

        store.record("Bob", 4).unwrap();
        let (scores, status) = store.load().unwrap();
        assert_eq!(status, LoadStatus::Loaded);
        assert_eq!(scores.get("Bob"), Some(&4));
    }

    #[test]
    fn test_players_are_independent() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.record("Alice", 5).unwrap();
        store.record("Bob", 2).unwrap();

        let (scores, _) = store.load().unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores.get("Alice"), Some(&5));
        assert_eq!(scores.get("Bob"), Some(&2));
    }
}
