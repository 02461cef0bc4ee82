//! Gameplay simulation module
//!
//! All gameplay decisions live here. The module never integrates physics or
//! draws anything:
//! - Entity state is read from and written to a [`Stage`]
//! - Contacts arrive as an explicit [`CollisionEvent`] list per frame
//! - One [`evaluate_frame`] call per frame, strictly in order

pub mod collision;
pub mod stage;
pub mod state;
pub mod tick;

pub use collision::{CollisionEvent, hit_brick, hit_paddle, paddle_rebound};
pub use stage::{Playfield, Stage};
pub use state::{Body, BrickColor, BrickId, Entity, GamePhase, GameRound, Overlay};
pub use tick::{FrameInput, RoundEvent, evaluate_frame};
