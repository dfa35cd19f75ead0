//! Axis-aligned geometry
//!
//! Everything in the playfield is a box: the ball is tested by its bounding
//! square, bricks and the paddle are rectangles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            right: left + width,
            top,
            bottom: top + height,
        }
    }

    /// Rectangle of size `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            left: center.x - half.x,
            right: center.x + half.x,
            top: center.y - half.y,
            bottom: center.y + half.y,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Zero-area (or inverted) rectangles never collide
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }
}

/// True iff the ball's bounding square overlaps `rect` on both axes.
///
/// Overlap is strict: a ball exactly touching an edge does not intersect.
pub fn rect_intersects_ball(rect: &Rect, center: Vec2, diameter: f32) -> bool {
    if rect.is_degenerate() || !(diameter > 0.0) {
        return false;
    }
    let half = diameter * 0.5;
    center.x - half < rect.right
        && center.x + half > rect.left
        && center.y - half < rect.bottom
        && center.y + half > rect.top
}
