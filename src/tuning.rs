//! Data-driven game balance
//!
//! Defaults reproduce the classic layout; any field can be overridden from
//! JSON and missing fields fall back to the defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::BrickColor;

/// One row of bricks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickRow {
    pub color: BrickColor,
    pub y: f32,
}

/// Brick grid placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickLayout {
    pub per_row: usize,
    pub start_x: f32,
    pub step_x: f32,
    pub rows: Vec<BrickRow>,
}

impl Default for BrickLayout {
    fn default() -> Self {
        Self {
            per_row: BRICKS_PER_ROW,
            start_x: BRICK_START_X,
            step_x: BRICK_STEP_X,
            rows: vec![
                BrickRow {
                    color: BrickColor::Violet,
                    y: VIOLET_ROW_Y,
                },
                BrickRow {
                    color: BrickColor::Yellow,
                    y: YELLOW_ROW_Y,
                },
                BrickRow {
                    color: BrickColor::Red,
                    y: RED_ROW_Y,
                },
            ],
        }
    }
}

impl BrickLayout {
    /// Positions of every brick in a row
    pub fn row_positions(&self, row: &BrickRow) -> impl Iterator<Item = Vec2> + '_ {
        let y = row.y;
        (0..self.per_row).map(move |i| Vec2::new(self.start_x + self.step_x * i as f32, y))
    }
}

/// Game balance and geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Upward ball speed applied at launch
    pub launch_speed: f32,
    /// Paddle speed while left/right is held
    pub paddle_speed: f32,
    /// Speed added to the ball on every paddle hit
    pub paddle_hit_speedup: f32,
    /// Play field size; the ball is lost once below `world_size.y`
    pub world_size: Vec2,
    pub paddle_start: Vec2,
    pub ball_start: Vec2,
    pub bricks: BrickLayout,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            launch_speed: LAUNCH_SPEED,
            paddle_speed: PADDLE_SPEED,
            paddle_hit_speedup: PADDLE_HIT_SPEEDUP,
            world_size: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
            paddle_start: Vec2::new(PADDLE_START.0, PADDLE_START.1),
            ball_start: Vec2::new(BALL_START.0, BALL_START.1),
            bricks: BrickLayout::default(),
        }
    }
}

impl Tuning {
    /// Parse overrides; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Bottom edge of the play field
    pub fn bottom_bound(&self) -> f32 {
        self.world_size.y
    }
}
