//! Engine-side collaborator
//!
//! The engine owns entities, runs physics and draws overlays. The core reads
//! body snapshots and requests changes through [`Stage`]. [`Playfield`] is a
//! headless implementation that just stores what it is told; the wasm bridge
//! mirrors the engine into one and tests drive rounds with it.

use std::collections::HashMap;

use glam::Vec2;

use super::state::{Body, BrickColor, BrickId, Entity, Overlay};
use crate::tuning::Tuning;

/// Entity, physics and visibility operations the core consumes
pub trait Stage {
    /// Snapshot of an entity (`None` for an unknown brick)
    fn body(&self, entity: Entity) -> Option<Body>;

    /// Set either velocity component, leaving `None` components untouched
    fn set_velocity(&mut self, entity: Entity, vx: Option<f32>, vy: Option<f32>);

    /// Set either position component, leaving `None` components untouched
    fn set_position(&mut self, entity: Entity, x: Option<f32>, y: Option<f32>);

    /// Remove an entity from play: no longer drawn or collidable
    fn disable(&mut self, entity: Entity);

    /// Enabled bricks in one group
    fn active_bricks(&self, color: BrickColor) -> usize;

    /// Bottom edge of the play field
    fn bottom_bound(&self) -> f32;

    fn set_overlay_visible(&mut self, overlay: Overlay, visible: bool);

    /// Update the high score display
    fn show_high_score(&mut self, score: u32);

    /// Respawn paddle, ball and every brick for a new round
    fn reset(&mut self, tuning: &Tuning);

    /// Enabled bricks across all groups
    fn total_active_bricks(&self) -> usize {
        BrickColor::ALL
            .iter()
            .map(|&color| self.active_bricks(color))
            .sum()
    }
}

/// Headless stage holding plain entity state
#[derive(Debug, Clone)]
pub struct Playfield {
    pub ball: Body,
    pub paddle: Body,
    bricks: HashMap<BrickColor, Vec<Body>>,
    overlays: HashMap<Overlay, bool>,
    high_score: u32,
    bottom: f32,
}

impl Playfield {
    /// Lay out paddle, ball and bricks per `tuning`
    pub fn new(tuning: &Tuning) -> Self {
        let mut bricks: HashMap<BrickColor, Vec<Body>> = HashMap::new();
        for row in &tuning.bricks.rows {
            bricks
                .entry(row.color)
                .or_default()
                .extend(tuning.bricks.row_positions(row).map(Body::at));
        }

        let overlays = HashMap::from([
            (Overlay::PressToStart, true),
            (Overlay::GameOver, false),
            (Overlay::YouWon, false),
        ]);

        Self {
            ball: Body::at(tuning.ball_start),
            paddle: Body::at(tuning.paddle_start),
            bricks,
            overlays,
            high_score: 0,
            bottom: tuning.bottom_bound(),
        }
    }

    pub fn overlay_visible(&self, overlay: Overlay) -> bool {
        self.overlays.get(&overlay).copied().unwrap_or(false)
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Number of bricks (enabled or not) in a group
    pub fn brick_count(&self, color: BrickColor) -> usize {
        self.bricks.get(&color).map_or(0, Vec::len)
    }

    fn body_mut(&mut self, entity: Entity) -> Option<&mut Body> {
        match entity {
            Entity::Ball => Some(&mut self.ball),
            Entity::Paddle => Some(&mut self.paddle),
            Entity::Brick(id) => self
                .bricks
                .get_mut(&id.color)
                .and_then(|group| group.get_mut(id.index)),
        }
    }

    /// Move a body as the engine's physics step would
    pub fn place(&mut self, entity: Entity, pos: Vec2) {
        if let Some(body) = self.body_mut(entity) {
            body.pos = pos;
        }
    }
}

impl Stage for Playfield {
    fn body(&self, entity: Entity) -> Option<Body> {
        match entity {
            Entity::Ball => Some(self.ball),
            Entity::Paddle => Some(self.paddle),
            Entity::Brick(BrickId { color, index }) => {
                self.bricks.get(&color).and_then(|g| g.get(index)).copied()
            }
        }
    }

    fn set_velocity(&mut self, entity: Entity, vx: Option<f32>, vy: Option<f32>) {
        if let Some(body) = self.body_mut(entity) {
            if let Some(vx) = vx {
                body.vel.x = vx;
            }
            if let Some(vy) = vy {
                body.vel.y = vy;
            }
        }
    }

    fn set_position(&mut self, entity: Entity, x: Option<f32>, y: Option<f32>) {
        if let Some(body) = self.body_mut(entity) {
            if let Some(x) = x {
                body.pos.x = x;
            }
            if let Some(y) = y {
                body.pos.y = y;
            }
        }
    }

    fn disable(&mut self, entity: Entity) {
        if let Some(body) = self.body_mut(entity) {
            body.enabled = false;
            body.vel = Vec2::ZERO;
        }
    }

    fn active_bricks(&self, color: BrickColor) -> usize {
        self.bricks
            .get(&color)
            .map_or(0, |group| group.iter().filter(|b| b.enabled).count())
    }

    fn bottom_bound(&self) -> f32 {
        self.bottom
    }

    fn set_overlay_visible(&mut self, overlay: Overlay, visible: bool) {
        self.overlays.insert(overlay, visible);
    }

    fn show_high_score(&mut self, score: u32) {
        self.high_score = score;
    }

    fn reset(&mut self, tuning: &Tuning) {
        let high_score = self.high_score;
        *self = Playfield::new(tuning);
        self.high_score = high_score;
    }
}
