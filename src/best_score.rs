use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::app_dirs::AppDirs;
use crate::config::write_json;
use crate::error::StoreError;

/// The one value that outlives a session: the farthest distance travelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestScore {
    pub distance_km: f64,
    pub words_completed: u64,
    pub achieved_at: DateTime<Local>,
}

impl BestScore {
    pub fn new(distance_km: f64, words_completed: u64) -> Self {
        Self {
            distance_km,
            words_completed,
            achieved_at: Local::now(),
        }
    }

    pub fn beats(&self, other: Option<&BestScore>) -> bool {
        other.map_or(true, |o| self.distance_km > o.distance_km)
    }
}

pub trait BestScoreStore {
    fn load(&self) -> Option<BestScore>;
    fn save(&self, score: &BestScore) -> Result<(), StoreError>;

    /// Persist `candidate` if it beats the stored score. Returns true when it did.
    fn record(&self, candidate: &BestScore) -> Result<bool, StoreError> {
        if !candidate.beats(self.load().as_ref()) {
            return Ok(false);
        }
        self.save(candidate)?;
        info!(distance_km = candidate.distance_km, "new best score");
        Ok(true)
    }
}

#[derive(Debug, Clone)]
pub struct FileBestScoreStore {
    path: PathBuf,
}

impl FileBestScoreStore {
    pub fn new() -> Self {
        let path = AppDirs::best_score_path()
            .unwrap_or_else(|| PathBuf::from("steadykeys_best_score.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileBestScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BestScoreStore for FileBestScoreStore {
    fn load(&self) -> Option<BestScore> {
        let bytes = fs::read(&self.path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(score) => Some(score),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring unreadable best score");
                None
            }
        }
    }

    fn save(&self, score: &BestScore) -> Result<(), StoreError> {
        write_json(&self.path, score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_store_has_no_score() {
        let dir = tempdir().unwrap();
        let store = FileBestScoreStore::with_path(dir.path().join("best.json"));
        assert!(store.load().is_none());
    }

    #[test]
    fn first_score_is_recorded() {
        let dir = tempdir().unwrap();
        let store = FileBestScoreStore::with_path(dir.path().join("best.json"));
        let score = BestScore::new(1234.0, 3);
        assert!(store.record(&score).unwrap());
        assert_eq!(store.load(), Some(score));
    }

    #[test]
    fn only_better_scores_replace() {
        let dir = tempdir().unwrap();
        let store = FileBestScoreStore::with_path(dir.path().join("best.json"));
        store.record(&BestScore::new(5000.0, 10)).unwrap();

        assert!(!store.record(&BestScore::new(4000.0, 20)).unwrap());
        assert!(!store.record(&BestScore::new(5000.0, 20)).unwrap());
        assert_eq!(store.load().unwrap().distance_km, 5000.0);

        assert!(store.record(&BestScore::new(6000.0, 1)).unwrap());
        assert_eq!(store.load().unwrap().words_completed, 1);
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, b"[]").unwrap();
        assert!(FileBestScoreStore::with_path(&path).load().is_none());
    }
}
