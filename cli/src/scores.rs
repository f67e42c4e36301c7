use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use degen_core::{ScoreStore, StoreError};

/// Best times kept as a flat JSON object, e.g. `{"easy": 42, "hard": 613}`.
#[derive(Clone, Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, u32>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).map_err(|_| StoreError::Malformed {
                key: self.path.display().to_string(),
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(StoreError::Unavailable(err.to_string())),
        }
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.read_all()?.get(key).copied())
    }

    fn save(&mut self, key: &str, secs: u32) -> Result<(), StoreError> {
        let mut scores = self.read_all().unwrap_or_else(|err| {
            log::warn!("Replacing unreadable scores file: {}", err);
            BTreeMap::new()
        });
        scores.insert(key.to_owned(), secs);

        let text = serde_json::to_string_pretty(&scores)
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        fs::write(&self.path, text).map_err(|err| StoreError::Unavailable(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use degen_core::{Difficulty, HighScores};

    fn scratch(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "degen-scores-{}-{}.json",
            std::process::id(),
            name
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn missing_file_means_no_scores() {
        let store = FileScoreStore::new(scratch("missing"));

        assert_eq!(store.load("easy"), Ok(None));
    }

    #[test]
    fn records_survive_a_new_store() {
        let path = scratch("roundtrip");
        let mut scores = HighScores::new(FileScoreStore::new(&path));
        assert!(scores.record_win(Difficulty::Hard, 300));
        assert!(scores.record_win(Difficulty::Easy, 25));

        let reopened = HighScores::new(FileScoreStore::new(&path));
        assert_eq!(reopened.best(Difficulty::Hard), Some(300));
        assert_eq!(reopened.best(Difficulty::Easy), Some(25));
        assert_eq!(reopened.best(Difficulty::Medium), None);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn garbage_file_counts_as_empty_and_is_replaced() {
        let path = scratch("garbage");
        fs::write(&path, "Infinity").unwrap();
        let mut scores = HighScores::new(FileScoreStore::new(&path));

        assert_eq!(scores.best(Difficulty::Easy), None);
        assert!(scores.record_win(Difficulty::Easy, 61));
        assert_eq!(scores.best(Difficulty::Easy), Some(61));

        fs::remove_file(path).unwrap();
    }
}
