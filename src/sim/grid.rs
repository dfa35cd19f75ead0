//! Brick grid generation
//!
//! Rows come in pairs; each pair shares a rank that decides its color, score
//! and how hard it kicks the ball. Rank 0 is the bottom pair.

use super::state::{Brick, BrickGrid, Rgb, Viewport};
use super::geometry::Rect;
use crate::settings::Tuning;

/// Scoring/speed/color metadata shared by a row pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMeta {
    pub rank: usize,
    pub score: u32,
    pub speed_mult: f32,
    pub color: Rgb,
}

/// Highest rank present in a grid of `rows` rows
pub fn highest_rank(rows: usize) -> usize {
    rows.saturating_sub(1) / 2
}

/// Points for a brick of `rank`: bottom rows are worth the most
pub fn rank_score(rank: usize, highest: usize) -> u32 {
    (highest.saturating_sub(rank) * 2 + 1) as u32
}

/// Ball speed multiplier for `rank`, from `max_factor` at rank 0 down to 1 at the top
pub fn rank_speed_multiplier(rank: usize, highest: usize, max_factor: f32) -> f32 {
    let divisor = highest.max(1) as f32;
    1.0 + highest.saturating_sub(rank) as f32 / divisor * (max_factor - 1.0)
}

/// Red through orange and yellow to green as rank climbs
pub fn rank_color(rank: usize, highest: usize) -> Rgb {
    let f = (rank as f32 / highest.max(1) as f32).clamp(0.0, 1.0);
    let (r, g) = if f <= 0.67 {
        (255.0, 255.0 * f / 0.67)
    } else {
        (255.0 * (1.0 - f) / 0.33, 255.0)
    };
    let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    Rgb::new(channel(r), channel(g), 0)
}

/// Metadata for row `row` of a `rows`-row grid
pub fn row_meta(row: usize, rows: usize, tuning: &Tuning) -> RowMeta {
    let rank = row / 2;
    let highest = highest_rank(rows);
    RowMeta {
        rank,
        score: rank_score(rank, highest),
        speed_mult: rank_speed_multiplier(rank, highest, tuning.max_ball_speed_factor),
        color: rank_color(rank, highest),
    }
}

/// Build the full grid for `level`.
///
/// Bricks fill the band between the top wall and a few ball heights above the
/// resting ball (`ball_rest_y`). Row height is sized for the largest level so
/// bricks keep their size as levels add rows. A layout too small to fit a
/// brick yields an empty grid.
pub fn build_grid(
    level: u32,
    viewport: &Viewport,
    ball_rest_y: f32,
    ball_size: f32,
    tuning: &Tuning,
) -> BrickGrid {
    if viewport.is_degenerate() {
        return BrickGrid::default();
    }

    let rows = tuning.rows_for_level(level);
    let cols = tuning.columns;
    let wall = viewport.wall;

    let slots = tuning.brick_margin_rows + rows.max(tuning.rows_for_level(tuning.max_level));
    let min_y = wall;
    let max_y = ball_rest_y - ball_size * 3.5;
    let row_h = (max_y - min_y) / slots as f32;
    let col_w = (viewport.width - wall * 2.0) / cols as f32;
    let gap = wall * tuning.brick_gap;

    let brick_w = col_w - gap;
    let brick_h = row_h - gap;
    if !(brick_w > 0.0 && brick_h > 0.0 && brick_w.is_finite() && brick_h.is_finite()) {
        log::warn!(
            "Brick layout too small (cell {}x{}, gap {}), building empty grid",
            col_w,
            row_h,
            gap
        );
        return BrickGrid::default();
    }

    let mut grid = Vec::with_capacity(rows);
    for row in 0..rows {
        let meta = row_meta(row, rows, tuning);
        // Row 0 is the bottom row, so count slots down from the top
        let slot = tuning.brick_margin_rows + (rows - 1 - row);
        let top = min_y + slot as f32 * row_h + gap / 2.0;

        let cells = (0..cols)
            .map(|col| {
                let left = wall + col as f32 * col_w + gap / 2.0;
                Some(Brick {
                    rect: Rect::new(left, top, brick_w, brick_h),
                    rank: meta.rank,
                    color: meta.color,
                    score: meta.score,
                    speed_mult: meta.speed_mult,
                })
            })
            .collect();
        grid.push(cells);
    }

    log::debug!("Level {}: {} rows x {} columns", level, rows, cols);
    BrickGrid::from_rows(grid)
}
