//! Round state and entity snapshot types

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting on the paddle, waiting for the start input
    NotStarted,
    /// Active gameplay
    Playing,
    /// Ball left through the bottom edge (terminal)
    Lost,
    /// Every brick cleared (terminal)
    Won,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Lost | GamePhase::Won)
    }
}

/// Brick group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrickColor {
    Violet,
    Yellow,
    Red,
}

impl BrickColor {
    pub const ALL: [BrickColor; 3] = [BrickColor::Violet, BrickColor::Yellow, BrickColor::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            BrickColor::Violet => "violet",
            BrickColor::Yellow => "yellow",
            BrickColor::Red => "red",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "violet" => Some(BrickColor::Violet),
            "yellow" => Some(BrickColor::Yellow),
            "red" => Some(BrickColor::Red),
            _ => None,
        }
    }
}

/// A brick, addressed by group and index within the group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrickId {
    pub color: BrickColor,
    pub index: usize,
}

impl BrickId {
    pub fn new(color: BrickColor, index: usize) -> Self {
        Self { color, index }
    }
}

/// Any physically simulated object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Ball,
    Paddle,
    Brick(BrickId),
}

/// Snapshot of an entity body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub enabled: bool,
}

impl Body {
    /// Enabled body at rest
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            enabled: true,
        }
    }
}

/// Text overlays the core toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    PressToStart,
    GameOver,
    YouWon,
}

/// One round of play: phase and score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRound {
    phase: GamePhase,
    score: u32,
}

impl Default for GameRound {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRound {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::NotStarted,
            score: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// NotStarted → Playing. Returns false from any other phase.
    pub(crate) fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        self.phase = GamePhase::Playing;
        true
    }

    /// Playing → Lost/Won. Returns false unless currently Playing.
    pub(crate) fn finish(&mut self, won: bool) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = if won { GamePhase::Won } else { GamePhase::Lost };
        true
    }

    /// Add one point while Playing; returns the new score
    pub(crate) fn add_point(&mut self) -> Option<u32> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        self.score += 1;
        Some(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_lifecycle() {
        let mut round = GameRound::new();
        assert_eq!(round.phase(), GamePhase::NotStarted);
        assert_eq!(round.add_point(), None);

        assert!(round.start());
        assert!(!round.start());
        assert_eq!(round.add_point(), Some(1));

        assert!(round.finish(false));
        assert_eq!(round.phase(), GamePhase::Lost);
        assert!(!round.finish(true));
        assert_eq!(round.add_point(), None);
        assert_eq!(round.score(), 1);
    }

    #[test]
    fn test_cannot_finish_before_start() {
        let mut round = GameRound::new();
        assert!(!round.finish(true));
        assert_eq!(round.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_brick_color_names() {
        for color in BrickColor::ALL {
            assert_eq!(BrickColor::from_str(color.as_str()), Some(color));
        }
        assert_eq!(BrickColor::from_str("Violet"), Some(BrickColor::Violet));
        assert_eq!(BrickColor::from_str("green"), None);
    }
}
