//! Breakout core - gameplay logic for a single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Round state machine, collision policy and per-frame driver
//! - `game`: `GameSession` aggregate tying stage, round, scores and login together
//! - `scores`: Per-user score table with immediate persistence
//! - `session`: Logged-in username
//! - `storage`: Key-value persistence backends (memory, file, LocalStorage)
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod scores;
pub mod session;
pub mod sim;
pub mod storage;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::GameSession;
pub use scores::{ScoreStore, ScoreTable};
pub use session::{LoginError, Session};
pub use storage::{KeyValueStore, MemoryStore, StoreError};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Ball launch speed (upward, units/s)
    pub const LAUNCH_SPEED: f32 = 200.0;
    /// Paddle horizontal speed while a direction is held (units/s)
    pub const PADDLE_SPEED: f32 = 350.0;
    /// Added to ball speed on every paddle hit (both axes)
    pub const PADDLE_HIT_SPEEDUP: f32 = 5.0;

    /// Play field dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 640.0;

    /// Spawn points
    pub const PADDLE_START: (f32, f32) = (400.0, 600.0);
    pub const BALL_START: (f32, f32) = (400.0, 565.0);

    /// Brick layout: one row per color
    pub const BRICKS_PER_ROW: usize = 10;
    pub const BRICK_START_X: f32 = 80.0;
    pub const BRICK_STEP_X: f32 = 70.0;
    pub const RED_ROW_Y: f32 = 40.0;
    pub const YELLOW_ROW_Y: f32 = 90.0;
    pub const VIOLET_ROW_Y: f32 = 140.0;
}
