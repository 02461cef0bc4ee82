//! Collision response
//!
//! The engine detects contacts and reports them as [`CollisionEvent`]s; this
//! module decides what a contact does to the round and the entities.

use glam::Vec2;

use super::stage::Stage;
use super::state::{BrickId, Entity, GamePhase, GameRound};

/// A contact reported by the engine for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    BallBrick(BrickId),
    BallPaddle,
}

/// Ball velocity after striking the paddle.
///
/// Vertical speed grows by `speedup` upward. Horizontal speed becomes
/// `|vx| + speedup`, pointing away from the paddle centre: left when the ball
/// is left of the paddle, right otherwise. There is no speed cap.
pub fn paddle_rebound(ball_pos: Vec2, ball_vel: Vec2, paddle_x: f32, speedup: f32) -> Vec2 {
    let vy = ball_vel.y - speedup;
    let speed_x = ball_vel.x.abs() + speedup;
    let vx = if ball_pos.x < paddle_x { -speed_x } else { speed_x };
    Vec2::new(vx, vy)
}

/// Resolve a ball-brick contact.
///
/// Disables the brick and scores one point. Returns the new score, or `None`
/// when the round is not Playing or the brick was already gone.
pub fn hit_brick(stage: &mut impl Stage, round: &mut GameRound, brick: BrickId) -> Option<u32> {
    let entity = Entity::Brick(brick);
    let active = stage.body(entity).is_some_and(|b| b.enabled);
    if !active {
        log::debug!("Ignoring hit on inactive brick {:?}", brick);
        return None;
    }

    let score = round.add_point()?;
    stage.disable(entity);
    log::debug!("Brick {:?} cleared, score {}", brick, score);
    Some(score)
}

/// Resolve a ball-paddle contact. Returns the new ball velocity.
pub fn hit_paddle(stage: &mut impl Stage, round: &GameRound, speedup: f32) -> Option<Vec2> {
    if round.phase() != GamePhase::Playing {
        return None;
    }
    let ball = stage.body(Entity::Ball)?;
    let paddle = stage.body(Entity::Paddle)?;
    if !ball.enabled {
        return None;
    }

    let vel = paddle_rebound(ball.pos, ball.vel, paddle.pos.x, speedup);
    stage.set_velocity(Entity::Ball, Some(vel.x), Some(vel.y));
    Some(vel)
}
