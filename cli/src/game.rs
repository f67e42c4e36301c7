use std::sync::Arc;
use std::time::Duration;

use degen_commentary::{CommentaryEvent, CommentarySource, CommentaryTask, spawn_commentary};
use degen_core::{
    GameError, HighScores, MarkOutcome, RevealOutcome, ScoreStore, Session, SessionView,
};
use degen_protocol::CommentaryRequest;
use futures_channel::mpsc::UnboundedSender;

use crate::command::{Command, HELP};
use crate::render::render;

/// Ties a session to its best times and its commentator, turning commands into screen updates.
pub struct Game<S, C> {
    session: Session,
    scores: HighScores<S>,
    commentator: Arc<C>,
    sink: UnboundedSender<CommentaryEvent>,
    commentary_timeout: Duration,
    pending: Option<CommentaryTask>,
}

impl<S: ScoreStore, C: CommentarySource> Game<S, C> {
    pub fn new(
        session: Session,
        scores: HighScores<S>,
        commentator: Arc<C>,
        sink: UnboundedSender<CommentaryEvent>,
        commentary_timeout: Duration,
    ) -> Self {
        Self {
            session,
            scores,
            commentator,
            sink,
            commentary_timeout,
            pending: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen(&self) -> String {
        let view = SessionView::from_session(&self.session);
        render(&view, self.scores.best(self.session.difficulty()))
    }

    pub fn tick(&mut self) -> bool {
        self.session.tick()
    }

    /// Text of a comment if it still belongs to the game on screen.
    pub fn accept_comment(&self, event: CommentaryEvent) -> Option<String> {
        if event.generation == self.session.generation() {
            Some(event.text)
        } else {
            log::debug!(
                "Dropping commentary for generation {}, now at {}",
                event.generation,
                self.session.generation()
            );
            None
        }
    }

    /// Applies one command, returning a message for the player if there is one.
    pub fn apply(&mut self, command: Command) -> anyhow::Result<Option<String>> {
        log::debug!("command: {:?}", command);
        Ok(match command {
            Command::Reveal(coords) => match self.session.reveal_cell(coords) {
                Ok(RevealOutcome::HitMine) => {
                    self.request_commentary();
                    Some("Game Over! Better luck next time!".to_owned())
                }
                Ok(RevealOutcome::Won) => Some(self.record_win()),
                Ok(RevealOutcome::Revealed) => None,
                Ok(RevealOutcome::NoChange) => Some("Nothing to reveal there.".to_owned()),
                Err(GameError::AlreadyEnded) => Some(game_over_hint()),
                Err(err) => return Err(err.into()),
            },
            Command::Flag(coords) => match self.session.toggle_flag(coords) {
                Ok(MarkOutcome::Changed) => None,
                Ok(MarkOutcome::NoChange) => Some("Can't flag that cell.".to_owned()),
                Err(GameError::AlreadyEnded) => Some(game_over_hint()),
                Err(err) => return Err(err.into()),
            },
            Command::Restart => {
                self.drop_pending();
                self.session.restart()?;
                None
            }
            Command::Difficulty(difficulty) => {
                self.drop_pending();
                self.session.set_difficulty(difficulty)?;
                None
            }
            Command::Help => Some(HELP.to_owned()),
            Command::Quit => None,
        })
    }

    fn record_win(&mut self) -> String {
        let Some(secs) = self.session.winning_time() else {
            return "You Won!".to_owned();
        };
        if self.scores.record_win(self.session.difficulty(), secs) {
            "New Highscore! You're a Degen Master!".to_owned()
        } else {
            "You Won! Time to go touch some grass!".to_owned()
        }
    }

    fn request_commentary(&mut self) {
        let request = CommentaryRequest {
            difficulty: Some(self.session.difficulty().to_string()),
            elapsed_secs: Some(self.session.elapsed_secs()),
        };
        self.drop_pending();
        self.pending = Some(spawn_commentary(
            Arc::clone(&self.commentator),
            self.session.generation(),
            request,
            self.commentary_timeout,
            self.sink.clone(),
        ));
    }

    fn drop_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            if !task.is_finished() {
                log::debug!("Abandoning commentary for generation {}", task.generation());
                task.abort();
            }
        }
    }
}

fn game_over_hint() -> String {
    "This game is over, type n for a new one.".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use degen_core::{Difficulty, GameStatus, MemoryScoreStore};
    use futures_channel::mpsc::{self, UnboundedReceiver};
    use futures_util::StreamExt;

    struct Snark;

    impl CommentarySource for Snark {
        async fn comment(&self, request: CommentaryRequest) -> String {
            format!("ngmi on {}", request.difficulty.unwrap_or_default())
        }
    }

    fn game() -> (Game<MemoryScoreStore, Snark>, UnboundedReceiver<CommentaryEvent>) {
        let (sink, events) = mpsc::unbounded();
        let game = Game::new(
            Session::new(Difficulty::Easy, 11).unwrap(),
            HighScores::new(MemoryScoreStore::new()),
            Arc::new(Snark),
            sink,
            Duration::from_secs(5),
        );
        (game, events)
    }

    /// Reveals row by row until the game ends.
    fn play_out(game: &mut Game<MemoryScoreStore, Snark>) -> Option<String> {
        for row in 0..9 {
            for col in 0..9 {
                let message = game.apply(Command::Reveal((row, col))).unwrap();
                if game.session().status().is_finished() {
                    return message;
                }
            }
        }
        None
    }

    #[tokio::test]
    async fn loss_brings_commentary_for_this_game() {
        let (mut game, mut events) = game();

        let mut message = play_out(&mut game);
        while game.session().status() != GameStatus::Lost {
            game.apply(Command::Restart).unwrap();
            message = play_out(&mut game);
        }
        assert_eq!(message.as_deref(), Some("Game Over! Better luck next time!"));

        let event = events.next().await.unwrap();
        assert_eq!(
            game.accept_comment(event).as_deref(),
            Some("ngmi on easy")
        );
        assert_eq!(
            game.apply(Command::Flag((0, 0))).unwrap(),
            Some(game_over_hint())
        );
    }

    #[tokio::test]
    async fn stale_commentary_is_dropped() {
        let (mut game, _events) = game();
        let stale = CommentaryEvent {
            generation: game.session().generation(),
            text: "late".into(),
        };

        game.apply(Command::Difficulty(Difficulty::Hard)).unwrap();

        assert_eq!(game.accept_comment(stale), None);
        assert_eq!(game.session().board().size(), (24, 24));
    }

    #[tokio::test]
    async fn screen_reflects_flags() {
        let (mut game, _events) = game();

        assert_eq!(game.apply(Command::Flag((0, 0))).unwrap(), None);

        assert!(game.screen().starts_with("Degen Starter (easy)  Mines: 9"));
    }
}
