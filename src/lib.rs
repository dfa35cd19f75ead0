//! Brickfall - a Breakout/Pong arcade game core
//!
//! Core modules:
//! - `sim`: Simulation (paddle/ball physics, brick grid, progression)
//! - `session`: Frame clock and high-score binding around the simulation
//! - `input`: Keyboard/touch command latch
//! - `highscores`: High score persistence
//! - `renderer`: Draw-surface contract and frame drawing
//! - `settings`: Data-driven game tuning

pub mod error;
pub mod highscores;
pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, StoreError};
pub use highscores::{HighScoreStore, MemoryStore};
pub use session::Session;
pub use settings::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    use std::f32::consts::PI;

    /// Default viewport height (pixels)
    pub const DEFAULT_HEIGHT: f32 = 550.0;
    /// Default viewport width (pixels)
    pub const DEFAULT_WIDTH: f32 = DEFAULT_HEIGHT * 0.9;

    /// Wall thickness as a fraction of the shorter viewport side
    pub const WALL_FRACTION: f32 = 0.02;

    /// Paddle speed (fraction of playfield width per second)
    pub const PADDLE_SPEED: f32 = 0.7;
    /// Paddle width in wall thicknesses
    pub const PADDLE_WIDTH_FACTOR: f32 = 5.0;

    /// Ball speed (fraction of playfield width per second)
    pub const BALL_SPEED: f32 = 0.5;
    /// Ball deflection on bounce (0 = no spin, 1 = high spin)
    pub const BALL_SPIN: f32 = 1.0;
    /// Bottom brick rows can push the ball up to this multiple of base speed
    pub const MAX_BALL_SPEED_FACTOR: f32 = 2.0;
    /// Shallowest allowed trajectory (30 degrees)
    pub const MIN_BOUNCE_ANGLE: f32 = PI / 6.0;

    /// Brick rows at level 0 (two more per level)
    pub const BASE_ROWS: usize = 8;
    pub const FIXED_COLUMNS: usize = 14;
    /// Gap between bricks as a fraction of wall thickness
    pub const BRICK_GAP: f32 = 0.3;
    /// Empty row slots above the bricks (room for the HUD)
    pub const BRICK_MARGIN_ROWS: usize = 4;

    pub const MAX_LEVEL: u32 = 10;
    pub const GAME_LIVES: u32 = 3;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Angle of a velocity in screen space, measured counter-clockwise from +x
/// with y pointing down (so "up the screen" is positive).
#[inline]
pub fn velocity_angle(vx: f32, vy: f32) -> f32 {
    (-vy).atan2(vx)
}

/// Velocity of magnitude `speed` heading along `angle` (see [`velocity_angle`])
#[inline]
pub fn velocity_from_angle(speed: f32, angle: f32) -> glam::Vec2 {
    glam::Vec2::new(speed * angle.cos(), -speed * angle.sin())
}
