use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// Restarting discards the session state and goes back to NotStarted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One play from first reveal to win or loss, owned by the presentation layer.
#[derive(Clone, Debug)]
pub struct Session {
    difficulty: Difficulty,
    board: Board,
    status: GameStatus,
    elapsed_secs: u32,
    triggered_mine: Option<Coord2>,
    generation: u64,
    seeds: SmallRng,
}

impl Session {
    pub fn new(difficulty: Difficulty, seed: u64) -> Result<Self> {
        Ok(Self {
            difficulty,
            board: Board::from_config(difficulty.config())?,
            status: GameStatus::NotStarted,
            elapsed_secs: 0,
            triggered_mine: None,
            generation: 0,
            seeds: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> GameConfig {
        self.difficulty.config()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Bumped on every restart so late asynchronous results can be matched to the game that asked for them.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Mine counter shown to the player, may go negative with excess flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.config().mines) - i32::from(self.board.flagged_count())
    }

    /// Elapsed time of a won game, the value worth recording as a best time.
    pub fn winning_time(&self) -> Option<u32> {
        matches!(self.status, GameStatus::Won).then_some(self.elapsed_secs)
    }

    /// Discards the board and starts over at the same difficulty.
    pub fn restart(&mut self) -> Result<()> {
        self.board = Board::from_config(self.config())?;
        self.status = GameStatus::NotStarted;
        self.elapsed_secs = 0;
        self.triggered_mine = None;
        self.generation += 1;
        log::debug!(
            "Restarted {} game, generation {}",
            self.difficulty,
            self.generation
        );
        Ok(())
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        self.difficulty = difficulty;
        self.restart()
    }

    /// Advances the clock by one second while the game is running.
    pub fn tick(&mut self) -> bool {
        if matches!(self.status, GameStatus::InProgress) {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
            true
        } else {
            false
        }
    }

    pub fn reveal_cell(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let placer = RandomMinePlacer::new(self.seeds.random());
        self.reveal_cell_with(coords, placer)
    }

    /// Reveals a cell, laying mines with `placer` if this is the first reveal of the game.
    pub fn reveal_cell_with<P: MinePlacer>(
        &mut self,
        coords: Coord2,
        placer: P,
    ) -> Result<RevealOutcome> {
        self.check_not_finished()?;

        match self.board.cell(coords) {
            Some(cell) if cell.is_openable() => {}
            _ => return Ok(RevealOutcome::NoChange),
        }

        if !self.board.mines_placed() {
            let mines = self.config().mines;
            placer.place(&mut self.board, mines, coords)?;
            self.status = GameStatus::InProgress;
            log::debug!("Game started by reveal at {:?}", coords);
        }

        Ok(match self.board.reveal(coords) {
            RevealResult::NoChange => RevealOutcome::NoChange,
            RevealResult::Mine => {
                log::debug!("Mine hit at {:?}", coords);
                self.triggered_mine = Some(coords);
                self.status = GameStatus::Lost;
                RevealOutcome::HitMine
            }
            RevealResult::Expanded { opened } => {
                log::debug!("Reveal at {:?} opened {} cells", coords, opened);
                if self.board.check_win(self.config().mines) {
                    log::debug!("Game won in {}s", self.elapsed_secs);
                    self.status = GameStatus::Won;
                    RevealOutcome::Won
                } else {
                    RevealOutcome::Revealed
                }
            }
        })
    }

    /// Flags or unflags a hidden cell, allowed before the first reveal.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.check_not_finished()?;
        Ok(self.board.toggle_flag(coords))
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
