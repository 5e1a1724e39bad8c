//! 2D position with directional mutators
//!
//! Screen convention: x grows to the right, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn left(&mut self, pixels: f32) {
        self.x -= pixels;
    }

    pub fn right(&mut self, pixels: f32) {
        self.x += pixels;
    }

    pub fn up(&mut self, pixels: f32) {
        self.y -= pixels;
    }

    pub fn down(&mut self, pixels: f32) {
        self.y += pixels;
    }

    /// Absolute move
    pub fn set(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Relative move
    pub fn shift(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Step toward `target` by at most `max_step` pixels
    pub fn move_toward(&mut self, target: Position, max_step: f32) {
        let delta = (target.to_vec2() - self.to_vec2()).clamp_length_max(max_step);
        self.shift(delta.x, delta.y);
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}
