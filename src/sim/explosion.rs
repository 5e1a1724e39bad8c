//! Explosion animation state

use serde::{Deserialize, Serialize};

/// The three explosion frames, cycling 1 -> 2 -> 3 -> 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExplosionState {
    #[default]
    One,
    Two,
    Three,
}

impl ExplosionState {
    pub fn next(self) -> Self {
        match self {
            ExplosionState::One => ExplosionState::Two,
            ExplosionState::Two => ExplosionState::Three,
            ExplosionState::Three => ExplosionState::One,
        }
    }

    /// Image asset for this frame
    pub fn image_name(self) -> &'static str {
        match self {
            ExplosionState::One => "explosion_1.png",
            ExplosionState::Two => "explosion_2.png",
            ExplosionState::Three => "explosion_3.png",
        }
    }
}

/// A running explosion: current frame plus its tick deadline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub frame: ExplosionState,
    next_frame_at: u64,
    frames_left: u32,
}

impl Explosion {
    /// Start at frame one; the animation runs `cycles` full cycles
    pub fn start(now: u64, interval: u64, cycles: u32) -> Self {
        Self {
            frame: ExplosionState::One,
            next_frame_at: now + interval,
            frames_left: cycles * 3,
        }
    }

    /// Advance if the deadline passed. Returns true once the animation is over.
    pub fn advance(&mut self, now: u64, interval: u64) -> bool {
        if self.frames_left > 0 && now >= self.next_frame_at {
            self.frame = self.frame.next();
            self.frames_left -= 1;
            self.next_frame_at = now + interval;
        }
        self.frames_left == 0
    }

    pub fn is_finished(&self) -> bool {
        self.frames_left == 0
    }
}
