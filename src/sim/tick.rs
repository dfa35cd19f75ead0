//! Frame tick and session state machine
//!
//! Applies the frame's commands, advances paddle then ball, runs the brick
//! pass and settles scoring, lives and level progression.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::physics::{Wall, apply_ball_speed, brick_pass, update_ball, update_paddle};
use super::state::{GamePhase, GameState, Paddle};

/// Paddle movement command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Stop,
}

/// Raw pointer (touch/mouse) update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Pointer {
    /// Pointer held at this playfield x
    Move(f32),
    /// Pointer lifted
    Release,
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Latest keyboard direction, if it changed
    pub direction: Option<Direction>,
    /// Serve the ball (or start a new game after game over)
    pub serve: bool,
    pub pointer: Option<Pointer>,
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    NewGame,
    Served,
    WallBounce(Wall),
    PaddleBounce,
    BrickDestroyed { row: usize, col: usize, score: u32 },
    NewHighScore(u64),
    LifeLost { lives_left: u32 },
    /// `level` was cleared and the next one started
    LevelComplete { level: u32 },
    GameOver { win: bool },
}

/// Set paddle velocity from a direction command
pub fn move_paddle(paddle: &mut Paddle, direction: Direction) {
    paddle.vel_x = match direction {
        Direction::Left => -paddle.spd,
        Direction::Right => paddle.spd,
        Direction::Stop => 0.0,
    };
}

/// Steer the paddle toward a held pointer, with a wall-thick dead zone
pub fn track_pointer(paddle: &mut Paddle, pointer_x: f32, dead_zone: f32) {
    let direction = if pointer_x > paddle.pos.x + dead_zone {
        Direction::Right
    } else if pointer_x < paddle.pos.x - dead_zone {
        Direction::Left
    } else {
        Direction::Stop
    };
    move_paddle(paddle, direction);
}

/// Launch a resting ball at a random angle. No-op if it is already moving.
pub fn serve(state: &mut GameState) -> bool {
    if state.phase.is_game_over() || state.ball.is_served() {
        return false;
    }
    let min = state.tuning.min_bounce_angle;
    let angle = state.rng.random_range(min..=std::f32::consts::PI - min);
    apply_ball_speed(&mut state.ball, angle, min);
    true
}

/// Advance the game by `dt` seconds of wall-clock time
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Serve restarts a finished game; nothing else runs that frame
    if state.phase.is_game_over() {
        if input.serve {
            let high_score = state.stats.high_score;
            state.new_game(high_score);
            events.push(GameEvent::NewGame);
        }
        return events;
    }

    if state.viewport.is_degenerate() {
        return events;
    }

    let dt = if dt.is_finite() && dt > 0.0 {
        dt.min(state.tuning.max_frame_dt)
    } else {
        0.0
    };
    state.frames += 1;

    if let Some(direction) = input.direction {
        move_paddle(&mut state.paddle, direction);
    }
    match input.pointer {
        Some(Pointer::Move(x)) => state.touch_x = Some(x),
        Some(Pointer::Release) => {
            state.touch_x = None;
            move_paddle(&mut state.paddle, Direction::Stop);
        }
        None => {}
    }
    if let Some(x) = state.touch_x {
        track_pointer(&mut state.paddle, x, state.viewport.wall);
    }

    if input.serve && serve(state) {
        events.push(GameEvent::Served);
    }

    update_paddle(&mut state.paddle, &state.viewport, dt);
    let outcome = update_ball(
        &mut state.ball,
        &state.paddle,
        &state.viewport,
        &state.tuning,
        &mut state.rng,
        dt,
    );
    if let Some(wall) = outcome.wall {
        events.push(GameEvent::WallBounce(wall));
    }
    if outcome.paddle {
        events.push(GameEvent::PaddleBounce);
    }

    if outcome.out_of_bounds {
        lose_life(state, &mut events);
        return events;
    }

    if state.tuning.has_bricks {
        let base_speed = state.base_ball_speed();
        if let Some(hit) = brick_pass(
            &mut state.ball,
            &mut state.grid,
            base_speed,
            &state.tuning,
            &mut state.rng,
        ) {
            events.push(GameEvent::BrickDestroyed {
                row: hit.row,
                col: hit.col,
                score: hit.brick.score,
            });
            add_score(state, hit.brick.score, &mut events);

            if state.grid.is_cleared() {
                complete_level(state, &mut events);
            }
        }
    }

    events
}

fn add_score(state: &mut GameState, points: u32, events: &mut Vec<GameEvent>) {
    state.stats.score += u64::from(points);
    if state.stats.score > state.stats.high_score {
        state.stats.high_score = state.stats.score;
        events.push(GameEvent::NewHighScore(state.stats.score));
    }
}

fn lose_life(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.stats.lives = state.stats.lives.saturating_sub(1);
    if state.stats.lives == 0 {
        state.phase = GamePhase::Lost;
        log::info!(
            "Game over on level {} with score {}",
            state.stats.level + 1,
            state.stats.score
        );
        events.push(GameEvent::GameOver { win: false });
    } else {
        log::info!("Ball lost, {} lives left", state.stats.lives);
        state.spawn_ball();
        events.push(GameEvent::LifeLost {
            lives_left: state.stats.lives,
        });
    }
}

fn complete_level(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let level = state.stats.level;
    if level >= state.tuning.max_level {
        state.phase = GamePhase::Won;
        log::info!("All levels cleared with score {}", state.stats.score);
        events.push(GameEvent::GameOver { win: true });
    } else {
        state.stats.level += 1;
        state.start_level();
        log::info!(
            "Level {} cleared, starting level {} with {} bricks",
            level + 1,
            state.stats.level + 1,
            state.grid.live_count()
        );
        events.push(GameEvent::LevelComplete { level });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Tuning;
    use crate::velocity_angle;
    use glam::Vec2;
    use std::f32::consts::PI;

    const DT: f32 = 1.0 / 60.0;

    fn new_state() -> GameState {
        GameState::new(12345, Tuning::default(), DEFAULT_WIDTH, DEFAULT_HEIGHT, 0)
    }

    /// Leave a single standing brick at (row 0, col 0)
    fn strip_to_one_brick(state: &mut GameState) {
        let cells: Vec<_> = state
            .grid
            .iter_live()
            .map(|(r, c, _)| (r, c))
            .filter(|&cell| cell != (0, 0))
            .collect();
        for (r, c) in cells {
            state.grid.remove(r, c);
        }
        assert_eq!(state.grid.live_count(), 1);
    }

    /// Park the moving ball inside brick (0, 0)
    fn aim_at_last_brick(state: &mut GameState) {
        let rect = state.grid.get(0, 0).unwrap().rect;
        state.ball.pos = Vec2::new((rect.left + rect.right) / 2.0, (rect.top + rect.bottom) / 2.0);
        state.ball.vel = Vec2::new(0.0, -1.0);
    }

    #[test]
    fn test_serve_launches_ball() {
        let mut state = new_state();
        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.is_empty());
        assert!(!state.ball.is_served());

        let input = TickInput {
            serve: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input, DT);
        assert_eq!(events, vec![GameEvent::Served]);
        assert!(state.ball.vel.y < 0.0);
        let angle = velocity_angle(state.ball.vel.x, state.ball.vel.y);
        assert!(angle >= MIN_BOUNCE_ANGLE - 1e-5 && angle <= PI - MIN_BOUNCE_ANGLE + 1e-5);
        assert!((state.ball.vel.length() - state.base_ball_speed()).abs() < 1e-2);
    }

    #[test]
    fn test_serve_while_moving_is_noop() {
        let mut state = new_state();
        assert!(serve(&mut state));
        let vel = state.ball.vel;
        assert!(!serve(&mut state));
        assert_eq!(state.ball.vel, vel);
    }

    #[test]
    fn test_keyboard_moves_paddle() {
        let mut state = new_state();
        let x0 = state.paddle.pos.x;
        let input = TickInput {
            direction: Some(Direction::Left),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(state.paddle.pos.x < x0);
        // Ball still rides the paddle
        assert_eq!(state.ball.pos.x, state.paddle.pos.x);

        // Direction stays latched without new commands
        let x1 = state.paddle.pos.x;
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.paddle.pos.x < x1);

        let input = TickInput {
            direction: Some(Direction::Stop),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        let x2 = state.paddle.pos.x;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.paddle.pos.x, x2);
    }

    #[test]
    fn test_pointer_tracking_dead_zone() {
        let mut state = new_state();
        let wall = state.viewport.wall;
        let x = state.paddle.pos.x;

        track_pointer(&mut state.paddle, x + wall * 2.0, wall);
        assert_eq!(state.paddle.vel_x, state.paddle.spd);
        track_pointer(&mut state.paddle, x - wall * 2.0, wall);
        assert_eq!(state.paddle.vel_x, -state.paddle.spd);
        track_pointer(&mut state.paddle, x + wall * 0.5, wall);
        assert_eq!(state.paddle.vel_x, 0.0);

        let input = TickInput {
            pointer: Some(Pointer::Move(x + 100.0)),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.touch_x, Some(x + 100.0));
        assert!(state.paddle.pos.x > x);

        let input = TickInput {
            pointer: Some(Pointer::Release),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.touch_x, None);
        assert_eq!(state.paddle.vel_x, 0.0);
    }

    #[test]
    fn test_life_loss_respawns_ball() {
        let mut state = new_state();
        serve(&mut state);
        state.ball.pos.y = state.viewport.height + 10.0;
        state.ball.vel = Vec2::new(0.0, 100.0);

        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.contains(&GameEvent::LifeLost {
            lives_left: GAME_LIVES - 1
        }));
        assert_eq!(state.stats.lives, GAME_LIVES - 1);
        assert!(!state.ball.is_served());
        assert_eq!(state.ball.pos.x, state.paddle.pos.x);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_last_life_ends_game_and_freezes() {
        let mut state = new_state();
        state.stats.lives = 1;
        state.ball.pos.y = state.viewport.height + 10.0;
        state.ball.vel = Vec2::new(0.0, 100.0);

        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.contains(&GameEvent::GameOver { win: false }));
        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(state.stats.lives, 0);

        let paddle = state.paddle.pos;
        let ball = state.ball.pos;
        let input = TickInput {
            direction: Some(Direction::Right),
            ..Default::default()
        };
        for _ in 0..10 {
            assert!(tick(&mut state, &input, DT).is_empty());
        }
        assert_eq!(state.paddle.pos, paddle);
        assert_eq!(state.ball.pos, ball);
    }

    #[test]
    fn test_serve_after_game_over_restarts() {
        let mut state = new_state();
        state.stats.score = 99;
        state.stats.high_score = 99;
        state.stats.level = 4;
        state.phase = GamePhase::Lost;

        let input = TickInput {
            serve: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input, DT);
        assert_eq!(events, vec![GameEvent::NewGame]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.stats.level, 0);
        assert_eq!(state.stats.score, 0);
        assert_eq!(state.stats.lives, GAME_LIVES);
        assert_eq!(state.stats.high_score, 99);
        assert!(!state.ball.is_served());
    }

    #[test]
    fn test_brick_hit_scores() {
        let mut state = new_state();
        let before = state.grid.live_count();
        let brick_score = state.grid.get(0, 0).unwrap().score;
        aim_at_last_brick(&mut state);

        let events = tick(&mut state, &TickInput::default(), 0.0);
        assert!(events.contains(&GameEvent::BrickDestroyed {
            row: 0,
            col: 0,
            score: brick_score
        }));
        assert!(events.contains(&GameEvent::NewHighScore(u64::from(brick_score))));
        assert_eq!(state.stats.score, u64::from(brick_score));
        assert_eq!(state.grid.live_count(), before - 1);
        assert!(state.ball.spd > state.base_ball_speed());
    }

    #[test]
    fn test_clearing_level_advances() {
        let mut state = new_state();
        strip_to_one_brick(&mut state);
        aim_at_last_brick(&mut state);

        let events = tick(&mut state, &TickInput::default(), 0.0);
        assert!(events.contains(&GameEvent::LevelComplete { level: 0 }));
        assert_eq!(state.stats.level, 1);
        assert_eq!(state.grid.row_count(), BASE_ROWS + 2);
        assert_eq!(state.grid.live_count(), FIXED_COLUMNS * (BASE_ROWS + 2));
        assert!(!state.ball.is_served());
        assert_eq!(state.ball.spd, state.base_ball_speed());
        assert_eq!(state.touch_x, None);
    }

    #[test]
    fn test_clearing_final_level_wins() {
        let mut state = new_state();
        state.stats.level = MAX_LEVEL;
        state.start_level();
        strip_to_one_brick(&mut state);
        aim_at_last_brick(&mut state);

        let events = tick(&mut state, &TickInput::default(), 0.0);
        assert!(events.contains(&GameEvent::GameOver { win: true }));
        assert_eq!(state.phase, GamePhase::Won);
        assert!(state.phase.is_game_over());
    }

    #[test]
    fn test_pong_variant_skips_bricks() {
        let mut state = GameState::new(1, Tuning::pong(), DEFAULT_WIDTH, DEFAULT_HEIGHT, 0);
        assert_eq!(state.grid.live_count(), 0);
        serve(&mut state);
        for _ in 0..120 {
            let events = tick(&mut state, &TickInput::default(), DT);
            assert!(!events.iter().any(|e| matches!(e, GameEvent::LevelComplete { .. })));
        }
        assert_eq!(state.stats.level, 0);
    }

    #[test]
    fn test_degenerate_viewport_is_noop() {
        let mut state = GameState::new(1, Tuning::default(), 0.0, 0.0, 0);
        let input = TickInput {
            serve: true,
            direction: Some(Direction::Right),
            ..Default::default()
        };
        assert!(tick(&mut state, &input, DT).is_empty());
        assert!(state.ball.pos.is_finite());
        assert!(state.paddle.pos.is_finite());
        assert_eq!(state.frames, 0);
    }

    #[test]
    fn test_dt_sanitized() {
        let mut state = new_state();
        serve(&mut state);
        let pos = state.ball.pos;
        tick(&mut state, &TickInput::default(), f32::NAN);
        assert_eq!(state.ball.pos, pos);

        // A ten-second stall only advances by the clamp
        let vel = state.ball.vel;
        tick(&mut state, &TickInput::default(), 10.0);
        let moved = state.ball.pos - pos;
        let expected = vel * MAX_FRAME_DT;
        assert!((moved - expected).length() < 1e-2);
        assert_eq!(state.ball.vel, vel);
    }

    #[test]
    fn test_determinism() {
        let mut a = new_state();
        let mut b = new_state();
        let inputs = [
            TickInput {
                direction: Some(Direction::Right),
                ..Default::default()
            },
            TickInput {
                serve: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                pointer: Some(Pointer::Move(100.0)),
                ..Default::default()
            },
        ];
        for _ in 0..50 {
            for input in &inputs {
                assert_eq!(tick(&mut a, input, DT), tick(&mut b, input, DT));
            }
        }
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.stats, b.stats);
    }
}
