//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Randomness only from the state's seeded RNG
//! - Stable brick scan order (row 0 first, column 0 first)
//! - Explicit state passed in and out, no globals

pub mod geometry;
pub mod grid;
pub mod physics;
pub mod state;
pub mod tick;

pub use geometry::{Rect, rect_intersects_ball};
pub use grid::{RowMeta, build_grid, rank_color, rank_score, rank_speed_multiplier, row_meta};
pub use physics::{
    BallOutcome, BrickHit, Wall, apply_ball_speed, brick_pass, clamp_bounce_angle, reangle,
    update_ball, update_paddle,
};
pub use state::{Ball, Brick, BrickGrid, GamePhase, GameState, Paddle, Rgb, Stats, Viewport};
pub use tick::{Direction, GameEvent, Pointer, TickInput, move_paddle, serve, tick, track_pointer};
