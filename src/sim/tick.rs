//! Per-frame round driver
//!
//! Called once per display refresh with the frame's input and the contacts
//! the engine reported. Frames never overlap.

use glam::Vec2;

use super::collision::{CollisionEvent, hit_brick, hit_paddle};
use super::stage::Stage;
use super::state::{BrickId, Entity, GamePhase, GameRound, Overlay};
use crate::tuning::Tuning;

/// Input state polled for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Move paddle left (held)
    pub left: bool,
    /// Move paddle right (held)
    pub right: bool,
    /// Start/launch key (held)
    pub start: bool,
}

/// Something that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundEvent {
    /// Ball launched, round is now Playing
    Launched,
    /// A brick was removed and the score went up
    BrickCleared { brick: BrickId, score: u32 },
    /// Ball bounced off the paddle with this new velocity
    PaddleBounce { velocity: Vec2 },
    /// Ball fell out of the bottom
    Lost,
    /// Last brick cleared
    Won,
}

/// Advance the round by one frame.
///
/// Ordering within a frame:
/// 1. Reported contacts are resolved (only while Playing).
/// 2. End conditions: Lost is checked before Won, so a ball that exits in the
///    same frame the last brick goes still loses the round.
/// 3. Paddle steering: velocity resets to 0, then left is checked before
///    right, so holding both moves left.
pub fn evaluate_frame(
    round: &mut GameRound,
    stage: &mut impl Stage,
    username: Option<&str>,
    input: &FrameInput,
    collisions: &[CollisionEvent],
    tuning: &Tuning,
) -> Vec<RoundEvent> {
    let mut events = Vec::new();

    match round.phase() {
        GamePhase::NotStarted => {
            // Ball rests on the paddle until launch
            if let Some(paddle) = stage.body(Entity::Paddle) {
                stage.set_position(Entity::Ball, Some(paddle.pos.x), None);
            }

            let logged_in = username.is_some_and(|name| !name.is_empty());
            if input.start && logged_in && round.start() {
                stage.set_velocity(Entity::Ball, None, Some(-tuning.launch_speed));
                stage.set_overlay_visible(Overlay::PressToStart, false);
                log::info!("Round started");
                events.push(RoundEvent::Launched);
            }
        }

        GamePhase::Playing => {
            for collision in collisions {
                match *collision {
                    CollisionEvent::BallBrick(brick) => {
                        if let Some(score) = hit_brick(stage, round, brick) {
                            events.push(RoundEvent::BrickCleared { brick, score });
                        }
                    }
                    CollisionEvent::BallPaddle => {
                        if let Some(velocity) = hit_paddle(stage, round, tuning.paddle_hit_speedup)
                        {
                            events.push(RoundEvent::PaddleBounce { velocity });
                        }
                    }
                }
            }

            let ball_out = stage
                .body(Entity::Ball)
                .is_some_and(|ball| ball.pos.y > stage.bottom_bound());

            if ball_out {
                round.finish(false);
                stage.set_overlay_visible(Overlay::GameOver, true);
                stage.disable(Entity::Ball);
                log::info!("Round lost with score {}", round.score());
                events.push(RoundEvent::Lost);
            } else if stage.total_active_bricks() == 0 {
                round.finish(true);
                stage.set_overlay_visible(Overlay::YouWon, true);
                stage.disable(Entity::Ball);
                log::info!("Round won with score {}", round.score());
                events.push(RoundEvent::Won);
            } else {
                let vx = if input.left {
                    -tuning.paddle_speed
                } else if input.right {
                    tuning.paddle_speed
                } else {
                    0.0
                };
                stage.set_velocity(Entity::Paddle, Some(vx), None);
            }
        }

        // Terminal: nothing moves, nothing scores
        GamePhase::Lost | GamePhase::Won => {}
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stage::Playfield;
    use crate::sim::state::{Body, BrickColor};
    use proptest::prelude::*;

    fn setup() -> (GameRound, Playfield, Tuning) {
        let tuning = Tuning::default();
        (GameRound::new(), Playfield::new(&tuning), tuning)
    }

    fn start() -> FrameInput {
        FrameInput {
            start: true,
            ..Default::default()
        }
    }

    fn launched() -> (GameRound, Playfield, Tuning) {
        let (mut round, mut field, tuning) = setup();
        evaluate_frame(&mut round, &mut field, Some("alice"), &start(), &[], &tuning);
        assert_eq!(round.phase(), GamePhase::Playing);
        (round, field, tuning)
    }

    fn clear_all_but(field: &mut Playfield, keep: BrickId) {
        for color in BrickColor::ALL {
            for index in 0..field.brick_count(color) {
                let id = BrickId::new(color, index);
                if id != keep {
                    field.disable(Entity::Brick(id));
                }
            }
        }
    }

    #[test]
    fn test_start_launches_ball() {
        let (mut round, mut field, tuning) = setup();

        let events = evaluate_frame(&mut round, &mut field, Some("alice"), &start(), &[], &tuning);
        assert_eq!(events, vec![RoundEvent::Launched]);
        assert_eq!(round.phase(), GamePhase::Playing);
        assert_eq!(field.ball.vel.y, -200.0);
        assert!(!field.overlay_visible(Overlay::PressToStart));

        // Holding start again does not relaunch
        field.ball.vel.y = -150.0;
        let events = evaluate_frame(&mut round, &mut field, Some("alice"), &start(), &[], &tuning);
        assert!(events.is_empty());
        assert_eq!(field.ball.vel.y, -150.0);
    }

    #[test]
    fn test_start_requires_username() {
        let (mut round, mut field, tuning) = setup();

        for username in [None, Some("")] {
            for _ in 0..5 {
                evaluate_frame(&mut round, &mut field, username, &start(), &[], &tuning);
            }
        }
        assert_eq!(round.phase(), GamePhase::NotStarted);
        assert_eq!(field.ball.vel, Vec2::ZERO);
        assert!(field.overlay_visible(Overlay::PressToStart));
    }

    #[test]
    fn test_no_start_without_key() {
        let (mut round, mut field, tuning) = setup();
        evaluate_frame(&mut round, &mut field, Some("alice"), &FrameInput::default(), &[], &tuning);
        assert_eq!(round.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_paddle_does_not_steer_before_start() {
        let (mut round, mut field, tuning) = setup();
        let input = FrameInput {
            left: true,
            ..Default::default()
        };
        evaluate_frame(&mut round, &mut field, Some("alice"), &input, &[], &tuning);
        assert_eq!(field.paddle.vel, Vec2::ZERO);
    }

    #[test]
    fn test_paddle_steering() {
        let (mut round, mut field, tuning) = launched();

        let cases = [
            (false, false, 0.0),
            (true, false, -350.0),
            (false, true, 350.0),
            (true, true, -350.0),
        ];
        for (left, right, expected) in cases {
            let input = FrameInput {
                left,
                right,
                start: false,
            };
            evaluate_frame(&mut round, &mut field, Some("alice"), &input, &[], &tuning);
            assert_eq!(field.paddle.vel.x, expected, "left={left} right={right}");
        }
    }

    #[test]
    fn test_brick_hit_event() {
        let (mut round, mut field, tuning) = launched();
        let id = BrickId::new(BrickColor::Yellow, 3);

        let events = evaluate_frame(
            &mut round,
            &mut field,
            Some("alice"),
            &FrameInput::default(),
            &[CollisionEvent::BallBrick(id)],
            &tuning,
        );
        assert_eq!(events, vec![RoundEvent::BrickCleared { brick: id, score: 1 }]);
        assert_eq!(field.total_active_bricks(), 29);
    }

    #[test]
    fn test_ball_exit_loses() {
        let (mut round, mut field, tuning) = launched();
        field.place(Entity::Ball, Vec2::new(200.0, 641.0));

        let events = evaluate_frame(&mut round, &mut field, Some("alice"), &FrameInput::default(), &[], &tuning);
        assert_eq!(events, vec![RoundEvent::Lost]);
        assert_eq!(round.phase(), GamePhase::Lost);
        assert!(field.overlay_visible(Overlay::GameOver));
        assert!(!field.ball.enabled);
    }

    #[test]
    fn test_ball_on_bottom_edge_is_still_in_play() {
        let (mut round, mut field, tuning) = launched();
        field.place(Entity::Ball, Vec2::new(200.0, 640.0));

        evaluate_frame(&mut round, &mut field, Some("alice"), &FrameInput::default(), &[], &tuning);
        assert_eq!(round.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_last_brick_wins() {
        let (mut round, mut field, tuning) = launched();
        let last = BrickId::new(BrickColor::Red, 9);
        clear_all_but(&mut field, last);

        let events = evaluate_frame(
            &mut round,
            &mut field,
            Some("alice"),
            &FrameInput::default(),
            &[CollisionEvent::BallBrick(last)],
            &tuning,
        );
        assert_eq!(
            events,
            vec![
                RoundEvent::BrickCleared { brick: last, score: 1 },
                RoundEvent::Won
            ]
        );
        assert_eq!(round.phase(), GamePhase::Won);
        assert!(field.overlay_visible(Overlay::YouWon));
        assert!(!field.overlay_visible(Overlay::GameOver));
        assert!(!field.ball.enabled);
    }

    #[test]
    fn test_lost_takes_precedence_over_won() {
        let (mut round, mut field, tuning) = launched();
        let last = BrickId::new(BrickColor::Violet, 0);
        clear_all_but(&mut field, last);
        field.place(Entity::Ball, Vec2::new(80.0, 700.0));

        let events = evaluate_frame(
            &mut round,
            &mut field,
            Some("alice"),
            &FrameInput::default(),
            &[CollisionEvent::BallBrick(last)],
            &tuning,
        );
        assert_eq!(events.last(), Some(&RoundEvent::Lost));
        assert_eq!(round.phase(), GamePhase::Lost);
        assert!(!field.overlay_visible(Overlay::YouWon));
    }

    #[test]
    fn test_terminal_round_is_frozen() {
        let (mut round, mut field, tuning) = launched();
        field.place(Entity::Ball, Vec2::new(200.0, 700.0));
        evaluate_frame(&mut round, &mut field, Some("alice"), &FrameInput::default(), &[], &tuning);
        assert_eq!(round.phase(), GamePhase::Lost);

        let before: Body = field.ball;
        let input = FrameInput {
            left: true,
            right: false,
            start: true,
        };
        for _ in 0..10 {
            let events = evaluate_frame(
                &mut round,
                &mut field,
                Some("alice"),
                &input,
                &[
                    CollisionEvent::BallPaddle,
                    CollisionEvent::BallBrick(BrickId::new(BrickColor::Red, 0)),
                ],
                &tuning,
            );
            assert!(events.is_empty());
        }
        assert_eq!(round.score(), 0);
        assert_eq!(field.ball, before);
        assert_eq!(field.paddle.vel, Vec2::ZERO);
        assert_eq!(field.total_active_bricks(), 30);
    }

    proptest! {
        #[test]
        fn prop_ball_pinned_to_paddle_before_start(paddle_xs in proptest::collection::vec(0.0f32..800.0, 1..30)) {
            let (mut round, mut field, tuning) = setup();
            for x in paddle_xs {
                field.place(Entity::Paddle, Vec2::new(x, 600.0));
                evaluate_frame(&mut round, &mut field, None, &start(), &[], &tuning);
                prop_assert_eq!(round.phase(), GamePhase::NotStarted);
                prop_assert_eq!(field.ball.pos.x, field.paddle.pos.x);
            }
        }
    }
}
