//! Base game object attributes and inset hitboxes

use serde::{Deserialize, Serialize};

use super::position::Position;

/// Pose and visual/kinematic attributes shared by every actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    pub position: Position,
    /// Where the object is heading (the player steers by moving this)
    pub target_position: Position,
    pub speed_in_pixel: f32,
    /// Degrees
    pub rotation: f32,
    /// Draw scale
    pub size: f32,
    pub width: f32,
    pub height: f32,
    /// Sort/render key: lower is further back
    pub distance_to_background: f32,
}

impl GameObject {
    pub fn new(position: Position, width: f32, height: f32, distance_to_background: f32) -> Self {
        Self {
            position,
            target_position: position,
            speed_in_pixel: 0.0,
            rotation: 0.0,
            size: 1.0,
            width,
            height,
            distance_to_background,
        }
    }

    pub fn with_speed(mut self, speed_in_pixel: f32) -> Self {
        self.speed_in_pixel = speed_in_pixel;
        self
    }

    /// Nominal bounding box
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// Effective hitbox: the bounding box shrunk by `insets`
    pub fn hitbox(&self, insets: &HitboxInsets) -> Rect {
        Rect::new(
            self.position.x + insets.left,
            self.position.y + insets.top,
            self.width - insets.left - insets.right,
            self.height - insets.top - insets.bottom,
        )
    }

    pub fn center_x(&self) -> f32 {
        self.position.x + self.width / 2.0
    }
}

/// Per-side inset of the hitbox relative to the bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HitboxInsets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl HitboxInsets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(inset: f32) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// Clamp so the hitbox stays inside a `width` x `height` box
    pub fn fit(self, width: f32, height: f32) -> Self {
        let left = self.left.clamp(0.0, width);
        let right = self.right.clamp(0.0, width - left);
        let top = self.top.clamp(0.0, height);
        let bottom = self.bottom.clamp(0.0, height - top);
        Self::new(top, right, bottom, left)
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Interval overlap on both axes. Touching edges do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}
