//! Draw-surface contract
//!
//! The core never draws. Once per frame [`draw_frame`] walks a read-only
//! [`GameState`] and issues primitive calls to whatever [`DrawSurface`] the
//! platform provides (a 2D canvas, a terminal, a test recorder).

pub mod shapes;

pub use shapes::{DrawCall, DrawList};

use crate::sim::{GamePhase, GameState, Rect, Rgb};

pub const COLOR_BACKGROUND: Rgb = Rgb::new(0, 0, 0);
pub const COLOR_WALL: Rgb = Rgb::new(150, 150, 150);
pub const COLOR_PADDLE: Rgb = Rgb::new(255, 255, 255);
pub const COLOR_BALL: Rgb = Rgb::new(255, 255, 255);
pub const COLOR_TEXT: Rgb = Rgb::new(255, 255, 0);

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Primitive operations a platform renderer provides
pub trait DrawSurface {
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    /// Left, top and right walls of `wall` thickness around a `width` × `height` field
    fn stroke_walls(&mut self, wall: f32, width: f32, height: f32, color: Rgb);
    fn text(&mut self, text: &str, x: f32, y: f32, align: TextAlign, size: f32, color: Rgb);
}

/// Draw one frame of `state`
pub fn draw_frame<S: DrawSurface + ?Sized>(state: &GameState, surface: &mut S) {
    let viewport = &state.viewport;
    surface.fill_rect(
        Rect::new(0.0, 0.0, viewport.width, viewport.height),
        COLOR_BACKGROUND,
    );
    if viewport.is_degenerate() {
        return;
    }

    surface.stroke_walls(viewport.wall, viewport.width, viewport.height, COLOR_WALL);
    surface.fill_rect(state.paddle.bounds(), COLOR_PADDLE);
    for (_, _, brick) in state.grid.iter_live() {
        surface.fill_rect(brick.rect, brick.color);
    }
    surface.fill_rect(state.ball.bounds(), COLOR_BALL);
    draw_hud(state, surface);
}

fn draw_hud<S: DrawSurface + ?Sized>(state: &GameState, surface: &mut S) {
    let viewport = &state.viewport;
    let wall = viewport.wall;
    let size = wall * 2.0;
    let label_y = wall * 3.5;
    let stats = &state.stats;

    surface.text(
        &format!("SCORE {}", stats.score),
        wall * 2.0,
        label_y,
        TextAlign::Left,
        size,
        COLOR_TEXT,
    );
    surface.text(
        &format!("BALL {}", stats.lives),
        viewport.width * 0.4,
        label_y,
        TextAlign::Center,
        size,
        COLOR_TEXT,
    );
    surface.text(
        &format!("LEVEL {}", stats.level + 1),
        viewport.width * 0.6,
        label_y,
        TextAlign::Center,
        size,
        COLOR_TEXT,
    );
    surface.text(
        &format!("BEST {}", stats.high_score),
        viewport.width - wall * 2.0,
        label_y,
        TextAlign::Right,
        size,
        COLOR_TEXT,
    );

    let banner = match state.phase {
        GamePhase::Playing => None,
        GamePhase::Lost => Some("GAME OVER"),
        GamePhase::Won => Some("YOU WIN!"),
    };
    if let Some(banner) = banner {
        surface.text(
            banner,
            viewport.width / 2.0,
            state.paddle.pos.y - wall * 6.0,
            TextAlign::Center,
            size * 1.5,
            COLOR_TEXT,
        );
    }
}
