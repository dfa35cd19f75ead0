//! Per-frame motion and collision response
//!
//! Paddle and ball integrate independently with explicit Euler over the frame
//! delta. Ball resolution follows a fixed ladder: walls (first match wins),
//! then the paddle, then out-of-bounds. Bricks are a separate pass.

use std::f32::consts::{FRAC_PI_4, PI};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::rect_intersects_ball;
use super::state::{Ball, Brick, BrickGrid, Paddle, Viewport};
use crate::settings::Tuning;
use crate::{velocity_angle, velocity_from_angle};

/// Playfield wall the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
}

/// What happened to the ball during one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallOutcome {
    pub wall: Option<Wall>,
    pub paddle: bool,
    /// Ball fell past the bottom of the playfield
    pub out_of_bounds: bool,
}

/// A brick destroyed by the brick pass
#[derive(Debug, Clone)]
pub struct BrickHit {
    pub row: usize,
    pub col: usize,
    pub brick: Brick,
}

/// Move the paddle by its velocity and keep it between the side walls
pub fn update_paddle(paddle: &mut Paddle, viewport: &Viewport, dt: f32) {
    paddle.pos.x += paddle.vel_x * dt;

    let min_x = viewport.wall + paddle.size.x / 2.0;
    let max_x = viewport.width - viewport.wall - paddle.size.x / 2.0;
    if paddle.pos.x < min_x {
        paddle.pos.x = min_x;
    } else if paddle.pos.x > max_x {
        paddle.pos.x = max_x;
    }
}

/// Snap `angle` into the allowed band of its hemisphere.
///
/// Upward trajectories stay within `[min, π - min]`, downward ones within
/// `[-(π - min), -min]`, so the ball can never travel close to horizontal.
pub fn clamp_bounce_angle(angle: f32, min_angle: f32, upward: bool) -> f32 {
    if upward {
        angle.clamp(min_angle, PI - min_angle)
    } else {
        angle.clamp(-(PI - min_angle), -min_angle)
    }
}

/// Point the ball along `angle` (clamped to the bounce band) at its current speed
pub fn apply_ball_speed(ball: &mut Ball, angle: f32, min_angle: f32) {
    let upward = angle >= 0.0;
    let clamped = clamp_bounce_angle(angle, min_angle, upward);
    log::debug!("intended angle {:.3}, output angle {:.3}", angle, clamped);
    ball.vel = velocity_from_angle(ball.spd, clamped);
}

/// Post-bounce spin: random nudge of up to ±45° × `spin`, then clamp.
///
/// The hemisphere is decided by the direction of travel *before* the nudge, so
/// the spin can flatten a trajectory but never turn it back.
pub fn reangle<R: Rng + ?Sized>(ball: &mut Ball, spin: f32, min_angle: f32, rng: &mut R) {
    let upward = ball.vel.y <= 0.0;
    let mut angle = velocity_angle(ball.vel.x, ball.vel.y);
    angle += rng.random_range(-FRAC_PI_4..=FRAC_PI_4) * spin;

    let clamped = clamp_bounce_angle(angle, min_angle, upward);
    log::debug!("intended angle {:.3}, output angle {:.3}", angle, clamped);
    ball.vel = velocity_from_angle(ball.spd, clamped);
}

/// Advance the ball one frame and resolve walls, paddle and the bottom edge
pub fn update_ball<R: Rng + ?Sized>(
    ball: &mut Ball,
    paddle: &Paddle,
    viewport: &Viewport,
    tuning: &Tuning,
    rng: &mut R,
    dt: f32,
) -> BallOutcome {
    let mut outcome = BallOutcome::default();

    ball.pos += ball.vel * dt;

    let half = ball.size / 2.0;
    let wall = viewport.wall;
    if ball.pos.x < wall + half {
        ball.pos.x = wall + half;
        ball.vel.x = -ball.vel.x;
        outcome.wall = Some(Wall::Left);
    } else if ball.pos.x > viewport.width - wall - half {
        ball.pos.x = viewport.width - wall - half;
        ball.vel.x = -ball.vel.x;
        outcome.wall = Some(Wall::Right);
    } else if ball.pos.y < wall + half {
        ball.pos.y = wall + half;
        ball.vel.y = -ball.vel.y;
        outcome.wall = Some(Wall::Top);
    }

    if let Some(side) = outcome.wall {
        log::debug!("Ball bounced off {:?} wall", side);
        if tuning.reangle_on_wall {
            reangle(ball, tuning.ball_spin, tuning.min_bounce_angle, rng);
        }
    }

    // Only a descending ball can land on the paddle
    let paddle_half = paddle.size / 2.0;
    if ball.vel.y > 0.0
        && ball.pos.y > paddle.top() - half
        && ball.pos.y < paddle.pos.y + paddle_half.y
        && ball.pos.x > paddle.pos.x - paddle_half.x - half
        && ball.pos.x < paddle.pos.x + paddle_half.x + half
    {
        ball.pos.y = paddle.resting_y(ball.size);
        ball.vel.y = -ball.vel.y;
        reangle(ball, tuning.ball_spin, tuning.min_bounce_angle, rng);
        outcome.paddle = true;
    }

    if ball.pos.y > viewport.height {
        outcome.out_of_bounds = true;
    }

    // An unserved ball rides along with the paddle
    if ball.vel.y == 0.0 {
        ball.pos.x = paddle.pos.x;
    }

    outcome
}

/// Destroy the first standing brick the ball overlaps, scanning row 0 first.
///
/// At most one brick goes per frame. The ball speeds up to the brick's
/// multiple of `base_speed` (never slows), reverses vertically and re-angles.
pub fn brick_pass<R: Rng + ?Sized>(
    ball: &mut Ball,
    grid: &mut BrickGrid,
    base_speed: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<BrickHit> {
    let (row, col) = grid
        .iter_live()
        .find(|(_, _, brick)| rect_intersects_ball(&brick.rect, ball.pos, ball.size))
        .map(|(row, col, _)| (row, col))?;

    let brick = grid.remove(row, col)?;
    ball.raise_speed(base_speed * brick.speed_mult);
    ball.vel.y = -ball.vel.y;
    reangle(ball, tuning.ball_spin, tuning.min_bounce_angle, rng);

    log::debug!(
        "Brick ({}, {}) destroyed for {} points, ball speed {:.1}",
        row,
        col,
        brick.score,
        ball.spd
    );
    Some(BrickHit { row, col, brick })
}
