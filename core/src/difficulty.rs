use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked(9, 9, 10),
            Self::Medium => GameConfig::new_unchecked(16, 16, 40),
            Self::Hard => GameConfig::new_unchecked(24, 24, 99),
        }
    }

    /// Stable key used for persisted best times.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Easy => "Degen Starter",
            Self::Medium => "Degen Pro",
            Self::Hard => "Degen Master",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownDifficulty(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_levels() {
        assert_eq!(Difficulty::Easy.config(), GameConfig::new(9, 9, 10));
        assert_eq!(Difficulty::Medium.config(), GameConfig::new(16, 16, 40));
        assert_eq!(Difficulty::Hard.config(), GameConfig::new(24, 24, 99));
    }

    #[test]
    fn parses_keys() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.key().parse::<Difficulty>(), Ok(difficulty));
        }
        assert_eq!(" HARD ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!(matches!(
            "nightmare".parse::<Difficulty>(),
            Err(GameError::UnknownDifficulty(_))
        ));
    }
}
