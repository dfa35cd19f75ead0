//! Game session
//!
//! Owns the simulation state together with its collaborators: the input
//! latch, the frame clock and the high-score store. The platform calls
//! [`Session::frame`] once per display refresh.

use crate::highscores::HighScoreStore;
use crate::input::InputLatch;
use crate::renderer::{DrawSurface, draw_frame};
use crate::settings::Tuning;
use crate::sim::{GameEvent, GameState, tick};

/// Converts monotonic timestamps (ms) into frame deltas (s)
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Seconds since the previous call; 0 on the first frame or if time ran backward
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms > last => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp (e.g. after the game was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

pub struct Session<S: HighScoreStore> {
    state: GameState,
    store: S,
    input: InputLatch,
    clock: FrameClock,
}

impl<S: HighScoreStore> Session<S> {
    pub fn new(seed: u64, tuning: Tuning, width: f32, height: f32, store: S) -> Self {
        let high_score = store.get().unwrap_or(0);
        Self {
            state: GameState::new(seed, tuning, width, height, high_score),
            store,
            input: InputLatch::new(),
            clock: FrameClock::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Latch for keyboard/touch events arriving between frames
    pub fn input(&mut self) -> &mut InputLatch {
        &mut self.input
    }

    /// Viewport changed: rebuild paddle, ball and bricks
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Run one frame at timestamp `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let dt = self.clock.advance(now_ms);
        self.step(dt)
    }

    /// Run one frame of `dt` seconds with the latched input
    pub fn step(&mut self, dt: f32) -> Vec<GameEvent> {
        let input = self.input.take();
        let events = tick(&mut self.state, &input, dt);

        for event in &events {
            match *event {
                GameEvent::NewHighScore(score) => self.store.set(score),
                GameEvent::NewGame => {
                    self.state.stats.high_score = self.store.get().unwrap_or(0);
                }
                GameEvent::GameOver { win } => {
                    log::info!(
                        "{} - final score {}, best {}",
                        if win { "Won" } else { "Lost" },
                        self.state.stats.score,
                        self.state.stats.high_score
                    );
                }
                _ => {}
            }
        }
        events
    }

    pub fn draw<D: DrawSurface + ?Sized>(&self, surface: &mut D) {
        draw_frame(&self.state, surface);
    }
}
