//! Browser bridge
//!
//! The JavaScript engine owns sprites and arcade physics. Each frame it
//! mirrors ball/paddle state into the core, reports contacts, calls
//! `frame`, then reads back velocities, enabled flags and overlays.

use wasm_bindgen::prelude::*;

use crate::game::GameSession;
use crate::sim::{
    BrickColor, BrickId, CollisionEvent, Entity, FrameInput, GamePhase, Overlay, Playfield, Stage,
};
use crate::storage::{KeyValueStore, LocalStore, MemoryStore};
use crate::tuning::Tuning;

fn init_logging() {
    console_error_panic_hook::set_once();
    // Already initialized by an earlier instance
    let _ = console_log::init_with_level(log::Level::Info);
}

fn open_storage() -> Box<dyn KeyValueStore> {
    match LocalStore::open() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("{e}; scores will not survive a reload");
            Box::new(MemoryStore::new())
        }
    }
}

fn parse_overlay(name: &str) -> Option<Overlay> {
    match name {
        "press_to_start" => Some(Overlay::PressToStart),
        "game_over" => Some(Overlay::GameOver),
        "you_won" => Some(Overlay::YouWon),
        _ => None,
    }
}

#[wasm_bindgen]
pub struct WebGame {
    game: GameSession<Playfield>,
    pending: Vec<CollisionEvent>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; `tuning_json` overrides balance values
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> WebGame {
        init_logging();

        let tuning = match tuning_json.as_deref().map(Tuning::from_json) {
            Some(Ok(tuning)) => tuning,
            Some(Err(e)) => {
                log::warn!("Invalid tuning, using defaults: {e}");
                Tuning::default()
            }
            None => Tuning::default(),
        };

        let stage = Playfield::new(&tuning);
        WebGame {
            game: GameSession::new(stage, open_storage(), tuning),
            pending: Vec::new(),
        }
    }

    /// Returns the refusal reason on failure
    pub fn login(&mut self, username: &str) -> Result<(), JsValue> {
        self.game
            .login(username)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn remembered_username(&self) -> Option<String> {
        self.game.remembered_username()
    }

    /// Mirror the engine's ball body
    pub fn sync_ball(&mut self, x: f32, y: f32, vx: f32, vy: f32) {
        let stage = self.game.stage_mut();
        stage.set_position(Entity::Ball, Some(x), Some(y));
        stage.set_velocity(Entity::Ball, Some(vx), Some(vy));
    }

    /// Mirror the engine's paddle position
    pub fn sync_paddle(&mut self, x: f32, y: f32) {
        self.game
            .stage_mut()
            .set_position(Entity::Paddle, Some(x), Some(y));
    }

    pub fn report_brick_hit(&mut self, color: &str, index: usize) {
        match BrickColor::from_str(color) {
            Some(color) => self
                .pending
                .push(CollisionEvent::BallBrick(BrickId::new(color, index))),
            None => log::warn!("Unknown brick group {color:?}"),
        }
    }

    pub fn report_paddle_hit(&mut self) {
        self.pending.push(CollisionEvent::BallPaddle);
    }

    /// Evaluate one frame with the contacts reported since the last one
    pub fn frame(&mut self, left: bool, right: bool, start: bool) {
        let input = FrameInput { left, right, start };
        let collisions = std::mem::take(&mut self.pending);
        self.game.frame(&input, &collisions);
    }

    pub fn restart(&mut self) -> bool {
        self.pending.clear();
        self.game.restart()
    }

    pub fn phase(&self) -> String {
        match self.game.phase() {
            GamePhase::NotStarted => "not_started",
            GamePhase::Playing => "playing",
            GamePhase::Lost => "lost",
            GamePhase::Won => "won",
        }
        .to_string()
    }

    pub fn score(&self) -> u32 {
        self.game.round().score()
    }

    pub fn high_score(&self) -> u32 {
        self.game.stage().high_score()
    }

    pub fn ball_x(&self) -> f32 {
        self.game.stage().ball.pos.x
    }

    pub fn ball_vx(&self) -> f32 {
        self.game.stage().ball.vel.x
    }

    pub fn ball_vy(&self) -> f32 {
        self.game.stage().ball.vel.y
    }

    pub fn ball_enabled(&self) -> bool {
        self.game.stage().ball.enabled
    }

    pub fn paddle_vx(&self) -> f32 {
        self.game.stage().paddle.vel.x
    }

    pub fn brick_enabled(&self, color: &str, index: usize) -> bool {
        BrickColor::from_str(color)
            .and_then(|color| {
                self.game
                    .stage()
                    .body(Entity::Brick(BrickId::new(color, index)))
            })
            .is_some_and(|body| body.enabled)
    }

    pub fn overlay_visible(&self, name: &str) -> bool {
        parse_overlay(name).is_some_and(|overlay| self.game.stage().overlay_visible(overlay))
    }
}
