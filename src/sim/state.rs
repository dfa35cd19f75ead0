//! Game state and core simulation types
//!
//! All per-session state lives in [`GameState`]; paddle, ball and bricks are
//! rebuilt on level/life transitions and viewport changes.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::grid::build_grid;
use crate::settings::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (ball may be resting on the paddle, see [`Ball::is_served`])
    Playing,
    /// Last life lost
    Lost,
    /// Last brick of the final level destroyed
    Won,
}

impl GamePhase {
    pub fn is_game_over(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Playfield dimensions and derived wall thickness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub wall: f32,
}

impl Viewport {
    /// Non-finite or negative sizes collapse to zero so nothing downstream sees NaN
    pub fn new(width: f32, height: f32, wall_fraction: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let width = sanitize(width);
        let height = sanitize(height);
        Self {
            width,
            height,
            wall: wall_fraction * width.min(height),
        }
    }

    /// A viewport with no room to play in
    pub fn is_degenerate(&self) -> bool {
        !(self.wall > 0.0 && self.width > 2.0 * self.wall && self.height > 2.0 * self.wall)
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center position; y never changes during a session
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal velocity, set by move commands only
    pub vel_x: f32,
    pub spd: f32,
}

impl Paddle {
    pub fn new(viewport: &Viewport, tuning: &Tuning) -> Self {
        let h = viewport.wall;
        let w = h * tuning.paddle_width_factor;
        Self {
            pos: Vec2::new(viewport.width / 2.0, viewport.height - h * 3.0),
            size: Vec2::new(w, h),
            vel_x: 0.0,
            spd: tuning.paddle_speed * viewport.width,
        }
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }

    /// Center y of a ball of `diameter` sitting on the paddle
    pub fn resting_y(&self, diameter: f32) -> f32 {
        self.top() - diameter / 2.0
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Width and height of the (square) ball
    pub size: f32,
    /// Speed scalar; only ever raised by brick hits during a life
    pub spd: f32,
}

impl Ball {
    /// Unserved ball sitting on the paddle
    pub fn resting_on(paddle: &Paddle, size: f32, spd: f32) -> Self {
        Self {
            pos: Vec2::new(paddle.pos.x, paddle.resting_y(size)),
            vel: Vec2::ZERO,
            size,
            spd,
        }
    }

    /// The ball is in motion (an unserved ball has zero vertical velocity)
    pub fn is_served(&self) -> bool {
        self.vel.y != 0.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, Vec2::splat(self.size))
    }

    /// Speed ratchet: raise to `target` if faster, never lower
    pub fn raise_speed(&mut self, target: f32) {
        self.spd = self.spd.max(target);
    }
}

/// 8-bit RGB color token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS-style `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A destructible brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    /// Row-pair tier, 0 = bottom
    pub rank: usize,
    pub color: Rgb,
    pub score: u32,
    pub speed_mult: f32,
}

/// Rows of optional bricks; `None` marks a destroyed cell.
///
/// Row 0 is the bottom row (closest to the paddle).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickGrid {
    rows: Vec<Vec<Option<Brick>>>,
    live: usize,
}

impl BrickGrid {
    pub fn from_rows(rows: Vec<Vec<Option<Brick>>>) -> Self {
        let live = rows.iter().flatten().filter(|cell| cell.is_some()).count();
        Self { rows, live }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Bricks still standing
    pub fn live_count(&self) -> usize {
        self.live
    }

    pub fn is_cleared(&self) -> bool {
        self.live == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        self.rows.get(row)?.get(col)?.as_ref()
    }

    /// Destroy a brick, returning it if it was still standing
    pub fn remove(&mut self, row: usize, col: usize) -> Option<Brick> {
        let brick = self.rows.get_mut(row)?.get_mut(col)?.take();
        if brick.is_some() {
            self.live -= 1;
        }
        brick
    }

    /// Standing bricks in scan order (row 0 first, column 0 first)
    pub fn iter_live(&self) -> impl Iterator<Item = (usize, usize, &Brick)> {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.as_ref().map(|b| (row, col, b)))
        })
    }
}

/// Session bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// 0-based level
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    pub high_score: u64,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Serve/spin randomness
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub stats: Stats,
    pub paddle: Paddle,
    pub ball: Ball,
    pub grid: BrickGrid,
    /// Latched pointer x while a touch is held
    pub touch_x: Option<f32>,
    /// Frames simulated since the session started
    pub frames: u64,
}

impl GameState {
    /// Start a new game on a `width` × `height` playfield
    pub fn new(seed: u64, tuning: Tuning, width: f32, height: f32, high_score: u64) -> Self {
        let viewport = Viewport::new(width, height, tuning.wall_fraction);
        let paddle = Paddle::new(&viewport, &tuning);
        let ball = Ball::resting_on(&paddle, viewport.wall, tuning.ball_speed * viewport.width);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            viewport,
            phase: GamePhase::Playing,
            stats: Stats::default(),
            paddle,
            ball,
            grid: BrickGrid::default(),
            touch_x: None,
            frames: 0,
        };
        state.new_game(high_score);
        state
    }

    /// Full reset: level 0, full lives, zero score, fresh grid
    pub fn new_game(&mut self, high_score: u64) {
        self.stats = Stats {
            level: 0,
            lives: self.tuning.game_lives,
            score: 0,
            high_score,
        };
        self.phase = GamePhase::Playing;
        self.paddle = Paddle::new(&self.viewport, &self.tuning);
        self.start_level();
        log::info!(
            "New game: {}x{} playfield, high score {}",
            self.viewport.width,
            self.viewport.height,
            high_score
        );
    }

    /// Rebuild grid and ball for the current level
    pub fn start_level(&mut self) {
        self.touch_x = None;
        self.paddle.vel_x = 0.0;
        self.spawn_ball();
        self.grid = if self.tuning.has_bricks {
            build_grid(
                self.stats.level,
                &self.viewport,
                self.ball.pos.y,
                self.ball.size,
                &self.tuning,
            )
        } else {
            BrickGrid::default()
        };
    }

    /// Fresh unserved ball on the current paddle at base speed
    pub fn spawn_ball(&mut self) {
        self.ball = Ball::resting_on(&self.paddle, self.viewport.wall, self.base_ball_speed());
    }

    /// Ball speed at the start of a life
    pub fn base_ball_speed(&self) -> f32 {
        self.tuning.ball_speed * self.viewport.width
    }

    /// New viewport: paddle, ball and grid are rebuilt for the current level
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height, self.tuning.wall_fraction);
        if self.viewport.is_degenerate() {
            log::warn!("Degenerate viewport {}x{}, simulation paused", width, height);
        }
        self.paddle = Paddle::new(&self.viewport, &self.tuning);
        self.start_level();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_new_game_defaults() {
        let state = GameState::new(1, Tuning::default(), DEFAULT_WIDTH, DEFAULT_HEIGHT, 42);
        assert_eq!(state.stats.level, 0);
        assert_eq!(state.stats.lives, GAME_LIVES);
        assert_eq!(state.stats.score, 0);
        assert_eq!(state.stats.high_score, 42);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.ball.is_served());
        assert_eq!(state.ball.pos.x, state.paddle.pos.x);
        assert_eq!(state.grid.live_count(), FIXED_COLUMNS * BASE_ROWS);
    }

    #[test]
    fn test_paddle_layout() {
        let viewport = Viewport::new(500.0, 600.0, 0.02);
        assert!((viewport.wall - 10.0).abs() < 1e-4);
        let paddle = Paddle::new(&viewport, &Tuning::default());
        assert_eq!(paddle.size, Vec2::new(50.0, 10.0));
        assert_eq!(paddle.pos, Vec2::new(250.0, 570.0));
        assert_eq!(paddle.spd, 0.7 * 500.0);

        let ball = Ball::resting_on(&paddle, viewport.wall, 250.0);
        // Sits on the paddle top edge
        assert_eq!(ball.pos.y + ball.size / 2.0, paddle.top());
    }

    #[test]
    fn test_viewport_sanitizes() {
        let v = Viewport::new(f32::NAN, -10.0, 0.02);
        assert_eq!(v.width, 0.0);
        assert_eq!(v.height, 0.0);
        assert!(v.is_degenerate());
        assert!(!Viewport::new(400.0, 300.0, 0.02).is_degenerate());
    }

    #[test]
    fn test_grid_remove_tracks_live() {
        let state = GameState::new(1, Tuning::default(), 500.0, 600.0, 0);
        let mut grid = state.grid.clone();
        let before = grid.live_count();
        assert!(grid.remove(0, 0).is_some());
        assert!(grid.remove(0, 0).is_none(), "already destroyed");
        assert!(grid.get(0, 0).is_none());
        assert_eq!(grid.live_count(), before - 1);
        assert!(grid.iter_live().all(|(r, c, _)| (r, c) != (0, 0)));
    }

    #[test]
    fn test_speed_ratchet() {
        let viewport = Viewport::new(500.0, 600.0, 0.02);
        let paddle = Paddle::new(&viewport, &Tuning::default());
        let mut ball = Ball::resting_on(&paddle, 10.0, 250.0);
        ball.raise_speed(300.0);
        assert_eq!(ball.spd, 300.0);
        ball.raise_speed(260.0);
        assert_eq!(ball.spd, 300.0);
    }

    #[test]
    fn test_resize_rebuilds() {
        let mut state = GameState::new(1, Tuning::default(), 500.0, 600.0, 0);
        state.grid.remove(0, 0);
        state.resize(1000.0, 800.0);
        assert!((state.viewport.wall - 16.0).abs() < 1e-4);
        assert_eq!(state.paddle.pos.x, 500.0);
        assert_eq!(state.grid.live_count(), FIXED_COLUMNS * BASE_ROWS);

        state.resize(0.0, 0.0);
        assert!(state.viewport.is_degenerate());
        assert_eq!(state.grid.live_count(), 0);
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::new(255, 128, 0).to_hex(), "#ff8000");
    }
}
