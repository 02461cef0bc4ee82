//! Game session aggregate
//!
//! Owns everything one player's visit needs: the stage, the current round,
//! the score store, the logged-in session and the tuning. The engine calls
//! [`GameSession::frame`] once per display refresh.

use crate::scores::ScoreStore;
use crate::session::{self, LoginError, Session};
use crate::sim::{
    CollisionEvent, FrameInput, GamePhase, GameRound, Overlay, RoundEvent, Stage, evaluate_frame,
};
use crate::storage::KeyValueStore;
use crate::tuning::Tuning;

pub struct GameSession<S: Stage> {
    stage: S,
    round: GameRound,
    scores: ScoreStore,
    session: Option<Session>,
    tuning: Tuning,
}

impl<S: Stage> GameSession<S> {
    /// Load scores from `backend` and prepare a fresh round on `stage`
    pub fn new(stage: S, backend: Box<dyn KeyValueStore>, tuning: Tuning) -> Self {
        let mut game = Self {
            stage,
            round: GameRound::new(),
            scores: ScoreStore::load(backend),
            session: None,
            tuning,
        };
        game.prepare_round();
        game
    }

    fn prepare_round(&mut self) {
        self.stage.set_overlay_visible(Overlay::PressToStart, true);
        self.stage.set_overlay_visible(Overlay::GameOver, false);
        self.stage.set_overlay_visible(Overlay::YouWon, false);
        self.stage.show_high_score(self.scores.best_score());
    }

    /// Log a player in. Only one login per session is accepted.
    pub fn login(&mut self, username: &str) -> Result<(), LoginError> {
        if self.session.is_some() {
            return Err(LoginError::AlreadyLoggedIn);
        }
        let session = Session::login(username)?;
        session.remember(self.scores.backend_mut());
        log::info!("Player {:?} logged in", session.username());
        self.session = Some(session);
        Ok(())
    }

    pub fn username(&self) -> Option<&str> {
        self.session.as_ref().map(Session::username)
    }

    /// Username from a previous visit, for prefilling the login surface
    pub fn remembered_username(&self) -> Option<String> {
        session::remembered_username(self.scores.backend())
    }

    /// Evaluate one frame and record any scoring
    pub fn frame(&mut self, input: &FrameInput, collisions: &[CollisionEvent]) -> Vec<RoundEvent> {
        let username = self.session.as_ref().map(Session::username);
        let events = evaluate_frame(
            &mut self.round,
            &mut self.stage,
            username,
            input,
            collisions,
            &self.tuning,
        );

        for event in &events {
            if let RoundEvent::BrickCleared { score, .. } = *event
                && let Some(name) = username
            {
                self.scores.record_score(name, score);
                self.stage.show_high_score(self.scores.best_score());
            }
        }

        events
    }

    /// Start over after a finished round. Returns false while a round is
    /// still NotStarted or Playing.
    pub fn restart(&mut self) -> bool {
        if !self.round.is_terminal() {
            return false;
        }
        self.stage.reset(&self.tuning);
        self.round = GameRound::new();
        self.prepare_round();
        log::info!("New round prepared");
        true
    }

    pub fn phase(&self) -> GamePhase {
        self.round.phase()
    }

    pub fn round(&self) -> &GameRound {
        &self.round
    }

    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    /// Engine access for syncing entity state between frames
    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
