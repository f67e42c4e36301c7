use alloc::string::{String, ToString};
use hashbrown::HashMap;

use crate::*;

/// String-keyed persistence for best times, in whole seconds.
pub trait ScoreStore {
    fn load(&self, key: &str) -> core::result::Result<Option<u32>, StoreError>;
    fn save(&mut self, key: &str, secs: u32) -> core::result::Result<(), StoreError>;
}

/// Keeps best times for the lifetime of the process only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryScoreStore {
    scores: HashMap<String, u32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self, key: &str) -> core::result::Result<Option<u32>, StoreError> {
        Ok(self.scores.get(key).copied())
    }

    fn save(&mut self, key: &str, secs: u32) -> core::result::Result<(), StoreError> {
        self.scores.insert(key.to_string(), secs);
        Ok(())
    }
}

/// Best time per difficulty on top of any [`ScoreStore`].
///
/// A store that cannot be read counts as having no best time, and a failed write only costs the record.
#[derive(Clone, Debug, Default)]
pub struct HighScores<S> {
    store: S,
}

impl<S: ScoreStore> HighScores<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn best(&self, difficulty: Difficulty) -> Option<u32> {
        self.store.load(difficulty.key()).unwrap_or_else(|err| {
            log::warn!("Could not read best time for {}: {}", difficulty, err);
            None
        })
    }

    /// Stores `secs` if it beats the current best, returns whether it did.
    pub fn record_win(&mut self, difficulty: Difficulty, secs: u32) -> bool {
        if self.best(difficulty).is_some_and(|best| best <= secs) {
            return false;
        }
        match self.store.save(difficulty.key(), secs) {
            Ok(()) => {
                log::debug!("New best time for {}: {}s", difficulty, secs);
                true
            }
            Err(err) => {
                log::warn!("Could not save best time for {}: {}", difficulty, err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load(&self, key: &str) -> core::result::Result<Option<u32>, StoreError> {
            Err(StoreError::Malformed {
                key: key.to_string(),
            })
        }

        fn save(&mut self, _key: &str, _secs: u32) -> core::result::Result<(), StoreError> {
            Err(StoreError::Unavailable("read-only".to_string()))
        }
    }

    #[test]
    fn first_win_is_always_a_record() {
        let mut scores = HighScores::new(MemoryScoreStore::new());

        assert_eq!(scores.best(Difficulty::Easy), None);
        assert!(scores.record_win(Difficulty::Easy, 120));
        assert_eq!(scores.best(Difficulty::Easy), Some(120));
        assert_eq!(scores.best(Difficulty::Hard), None);
    }

    #[test]
    fn only_strictly_faster_wins_replace() {
        let mut scores = HighScores::new(MemoryScoreStore::new());
        scores.record_win(Difficulty::Medium, 90);

        assert!(!scores.record_win(Difficulty::Medium, 90));
        assert!(!scores.record_win(Difficulty::Medium, 200));
        assert!(scores.record_win(Difficulty::Medium, 89));
        assert_eq!(scores.store().load("medium"), Ok(Some(89)));
    }

    #[test]
    fn broken_store_is_never_fatal() {
        let mut scores = HighScores::new(BrokenStore);

        assert_eq!(scores.best(Difficulty::Easy), None);
        assert!(!scores.record_win(Difficulty::Easy, 10));
    }
}
