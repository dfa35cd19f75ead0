//! Recorded draw calls
//!
//! [`DrawList`] is a [`DrawSurface`] that keeps every call it receives, for
//! headless runs and tests.

use super::{DrawSurface, TextAlign};
use crate::sim::{Rect, Rgb};

/// One primitive draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Rect {
        rect: Rect,
        color: Rgb,
    },
    Walls {
        wall: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        align: TextAlign,
        size: f32,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn rect_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Rect { .. }))
            .count()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DrawSurface for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.calls.push(DrawCall::Rect { rect, color });
    }

    fn stroke_walls(&mut self, wall: f32, width: f32, height: f32, color: Rgb) {
        self.calls.push(DrawCall::Walls {
            wall,
            width,
            height,
            color,
        });
    }

    fn text(&mut self, text: &str, x: f32, y: f32, align: TextAlign, size: f32, color: Rgb) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            align,
            size,
            color,
        });
    }
}
