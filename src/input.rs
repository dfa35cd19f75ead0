//! Input latch
//!
//! Keyboard and touch events arrive between frames. They are folded into a
//! single [`TickInput`] that the next frame consumes: only the latest
//! direction survives, serve and pointer release are one-shot.

use crate::sim::{Direction, Pointer, TickInput};

/// Browser key codes the game responds to
pub mod keys {
    pub const SPACE: u32 = 32;
    pub const LEFT: u32 = 37;
    pub const RIGHT: u32 = 39;
}

/// Normalized command from any input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Stop,
    Serve,
}

/// Collects input events until the next frame
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    pending: TickInput,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.pending.direction = Some(Direction::Left),
            Command::MoveRight => self.pending.direction = Some(Direction::Right),
            Command::Stop => self.pending.direction = Some(Direction::Stop),
            Command::Serve => self.pending.serve = true,
        }
    }

    /// Returns false for keys the game ignores
    pub fn key_down(&mut self, key_code: u32) -> bool {
        let command = match key_code {
            keys::SPACE => Command::Serve,
            keys::LEFT => Command::MoveLeft,
            keys::RIGHT => Command::MoveRight,
            _ => return false,
        };
        self.command(command);
        true
    }

    pub fn key_up(&mut self, key_code: u32) -> bool {
        match key_code {
            keys::LEFT | keys::RIGHT => {
                self.command(Command::Stop);
                true
            }
            _ => false,
        }
    }

    /// A tap serves and starts tracking the finger
    pub fn touch_start(&mut self, x: f32) {
        self.command(Command::Serve);
        self.pending.pointer = Some(Pointer::Move(x));
    }

    pub fn touch_move(&mut self, x: f32) {
        self.pending.pointer = Some(Pointer::Move(x));
    }

    pub fn touch_end(&mut self) {
        self.pending.pointer = Some(Pointer::Release);
    }

    /// Input for this frame; clears everything latched so far
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        let mut latch = InputLatch::new();
        assert!(latch.key_down(keys::LEFT));
        assert!(!latch.key_down(65));
        let input = latch.take();
        assert_eq!(input.direction, Some(Direction::Left));
        assert!(!input.serve);

        assert!(latch.key_down(keys::SPACE));
        assert!(latch.take().serve);

        assert!(latch.key_up(keys::RIGHT));
        assert!(!latch.key_up(keys::SPACE));
        assert_eq!(latch.take().direction, Some(Direction::Stop));
    }

    #[test]
    fn test_latest_direction_wins() {
        let mut latch = InputLatch::new();
        latch.command(Command::MoveLeft);
        latch.command(Command::MoveRight);
        assert_eq!(latch.take().direction, Some(Direction::Right));
    }

    #[test]
    fn test_take_clears_one_shots() {
        let mut latch = InputLatch::new();
        latch.touch_start(120.0);
        let input = latch.take();
        assert!(input.serve);
        assert_eq!(input.pointer, Some(Pointer::Move(120.0)));

        assert_eq!(latch.take(), TickInput::default());

        latch.touch_move(80.0);
        latch.touch_end();
        assert_eq!(latch.take().pointer, Some(Pointer::Release));
    }
}
