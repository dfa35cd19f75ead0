//! Game tuning
//!
//! Every numeric rule of the game lives here so a variant (paddle-only Pong,
//! faster balls, more levels) is a data change. Loaded from JSON; missing
//! fields fall back to [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Data-driven game balance and capability flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Capabilities ===
    /// Run the brick pass and level progression
    pub has_bricks: bool,
    /// Re-angle the ball after wall bounces (paddle and brick bounces always re-angle)
    pub reangle_on_wall: bool,

    // === Layout ===
    pub wall_fraction: f32,
    pub paddle_width_factor: f32,

    // === Speeds ===
    pub paddle_speed: f32,
    pub ball_speed: f32,
    pub ball_spin: f32,
    pub max_ball_speed_factor: f32,
    /// Radians
    pub min_bounce_angle: f32,

    // === Bricks ===
    pub base_rows: usize,
    pub columns: usize,
    pub brick_gap: f32,
    pub brick_margin_rows: usize,

    // === Progression ===
    pub max_level: u32,
    pub game_lives: u32,

    // === Frame ===
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            has_bricks: true,
            reangle_on_wall: true,

            wall_fraction: WALL_FRACTION,
            paddle_width_factor: PADDLE_WIDTH_FACTOR,

            paddle_speed: PADDLE_SPEED,
            ball_speed: BALL_SPEED,
            ball_spin: BALL_SPIN,
            max_ball_speed_factor: MAX_BALL_SPEED_FACTOR,
            min_bounce_angle: MIN_BOUNCE_ANGLE,

            base_rows: BASE_ROWS,
            columns: FIXED_COLUMNS,
            brick_gap: BRICK_GAP,
            brick_margin_rows: BRICK_MARGIN_ROWS,

            max_level: MAX_LEVEL,
            game_lives: GAME_LIVES,

            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Tuning {
    /// Paddle-only variant: no bricks, walls reflect without spin
    pub fn pong() -> Self {
        Self {
            has_bricks: false,
            reangle_on_wall: false,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON document over the defaults and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("wall_fraction", self.wall_fraction)?;
        positive("paddle_width_factor", self.paddle_width_factor)?;
        positive("paddle_speed", self.paddle_speed)?;
        positive("ball_speed", self.ball_speed)?;
        positive("max_frame_dt", self.max_frame_dt)?;

        if !(self.ball_spin.is_finite() && self.ball_spin >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "ball_spin",
                reason: "must be zero or positive",
            });
        }
        if !(self.min_bounce_angle > 0.0 && self.min_bounce_angle < std::f32::consts::FRAC_PI_2) {
            return Err(ConfigError::Invalid {
                field: "min_bounce_angle",
                reason: "must lie strictly between 0 and pi/2",
            });
        }
        if !(self.max_ball_speed_factor.is_finite() && self.max_ball_speed_factor >= 1.0) {
            return Err(ConfigError::Invalid {
                field: "max_ball_speed_factor",
                reason: "must be at least 1",
            });
        }
        if !(self.brick_gap.is_finite() && self.brick_gap >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "brick_gap",
                reason: "must be zero or positive",
            });
        }
        if self.base_rows == 0 {
            return Err(ConfigError::Invalid {
                field: "base_rows",
                reason: "must be at least 1",
            });
        }
        if self.columns == 0 {
            return Err(ConfigError::Invalid {
                field: "columns",
                reason: "must be at least 1",
            });
        }
        if self.game_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "game_lives",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Brick rows at the given level
    pub fn rows_for_level(&self, level: u32) -> usize {
        self.base_rows + 2 * level as usize
    }
}
