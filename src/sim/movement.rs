//! Scripted trajectories for non-player actors
//!
//! Two composable behaviors:
//! - Horizontal drift, left or right by `speed_in_pixel` per tick
//! - Scripted vertical replay of a named sequence of deltas
//!
//! plus direction reversal, either unconditional (scenery bounce, triggered
//! from a collision) or conditional on the actor touching a boundary.

use serde::{Deserialize, Serialize};

use super::object::GameObject;
use crate::consts::DRIFT_BAND_MARGIN;

/// Named vertical delta sequences, in units of `speed_in_pixel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptedPattern {
    /// Gentle descent
    Down,
    /// Steep descent
    Dive,
}

impl ScriptedPattern {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "down" => Some(ScriptedPattern::Down),
            "dive" => Some(ScriptedPattern::Dive),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScriptedPattern::Down => "down",
            ScriptedPattern::Dive => "dive",
        }
    }

    /// Relative y steps, applied in order
    pub fn steps(&self) -> &'static [f32] {
        match self {
            ScriptedPattern::Down => &[0.125, 0.125, 0.25],
            ScriptedPattern::Dive => &[0.125, 0.25, 0.375, 0.25],
        }
    }

    /// Apply every step once, scaled by the object's speed
    pub fn replay(&self, object: &mut GameObject) {
        for step in self.steps() {
            object.position.down(step * object.speed_in_pixel);
        }
    }
}

/// How `change_direction_if_object_hits_boundary` decides to flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReversalMode {
    /// Flip on every call
    Unconditional,
    /// Flip only when the object touches the boundary it is heading for
    AtBoundary,
}

/// Horizontal limits for `ReversalMode::AtBoundary`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundaries {
    pub left: f32,
    pub right: f32,
}

impl Boundaries {
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }
}

pub fn game_object_hits_left_boundary(object: &GameObject, boundaries: &Boundaries) -> bool {
    object.position.x <= boundaries.left
}

pub fn game_object_hits_right_boundary(object: &GameObject, boundaries: &Boundaries) -> bool {
    object.position.x + object.width >= boundaries.right
}

/// Per-actor drift state plus an optional scripted descent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementPattern {
    pub moving_right: bool,
    pub pattern: Option<ScriptedPattern>,
    pub reversal: ReversalMode,
}

impl MovementPattern {
    pub fn new(moving_right: bool, reversal: ReversalMode) -> Self {
        Self {
            moving_right,
            pattern: None,
            reversal,
        }
    }

    pub fn with_pattern(mut self, pattern: ScriptedPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// One drift step in the current direction
    pub fn drift(&self, object: &mut GameObject) {
        if self.moving_right {
            object.position.right(object.speed_in_pixel);
        } else {
            object.position.left(object.speed_in_pixel);
        }
    }

    /// Drift only runs for objects near the visible band
    pub fn within_drift_band(object: &GameObject, screen_height: f32) -> bool {
        let y = object.position.y;
        y >= -DRIFT_BAND_MARGIN && y <= screen_height + DRIFT_BAND_MARGIN
    }

    /// Drift if the object is inside the band; returns whether it moved
    pub fn drift_in_band(&self, object: &mut GameObject, screen_height: f32) -> bool {
        if Self::within_drift_band(object, screen_height) {
            self.drift(object);
            true
        } else {
            false
        }
    }

    /// Replay the scripted pattern, if any
    pub fn replay(&self, object: &mut GameObject) {
        if let Some(pattern) = self.pattern {
            pattern.replay(object);
        }
    }

    /// Flip `moving_right` according to `self.reversal`; returns whether it flipped
    pub fn change_direction_if_object_hits_boundary(
        &mut self,
        object: &GameObject,
        boundaries: &Boundaries,
    ) -> bool {
        let flip = match self.reversal {
            ReversalMode::Unconditional => true,
            ReversalMode::AtBoundary => {
                if self.moving_right {
                    game_object_hits_right_boundary(object, boundaries)
                } else {
                    game_object_hits_left_boundary(object, boundaries)
                }
            }
        };
        if flip {
            self.moving_right = !self.moving_right;
        }
        flip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::position::Position;

    fn object_at(x: f32, y: f32) -> GameObject {
        GameObject::new(Position::new(x, y), 40.0, 20.0, 0.0).with_speed(2.0)
    }

    const SCREEN: Boundaries = Boundaries {
        left: 0.0,
        right: 200.0,
    };

    #[test]
    fn test_drift_follows_direction() {
        let mut obj = object_at(100.0, 0.0);
        let mut motion = MovementPattern::new(true, ReversalMode::AtBoundary);
        motion.drift(&mut obj);
        assert_eq!(obj.position.x, 102.0);

        motion.moving_right = false;
        motion.drift(&mut obj);
        motion.drift(&mut obj);
        assert_eq!(obj.position.x, 98.0);
    }

    #[test]
    fn test_drift_band() {
        let motion = MovementPattern::new(true, ReversalMode::AtBoundary);

        let mut above = object_at(0.0, -101.0);
        assert!(!motion.drift_in_band(&mut above, 540.0));
        assert_eq!(above.position.x, 0.0);

        let mut edge = object_at(0.0, -100.0);
        assert!(motion.drift_in_band(&mut edge, 540.0));

        let mut below = object_at(0.0, 641.0);
        assert!(!motion.drift_in_band(&mut below, 540.0));
    }

    #[test]
    fn test_conditional_reversal_at_right_boundary() {
        let mut motion = MovementPattern::new(true, ReversalMode::AtBoundary);

        // Not at the boundary: repeated checks never flip
        let inside = object_at(100.0, 0.0);
        for _ in 0..5 {
            assert!(!motion.change_direction_if_object_hits_boundary(&inside, &SCREEN));
            assert!(motion.moving_right);
        }

        // Right edge at 200
        let at_edge = object_at(160.0, 0.0);
        assert!(motion.change_direction_if_object_hits_boundary(&at_edge, &SCREEN));
        assert!(!motion.moving_right);

        // Heading away from the right edge: no flip back
        assert!(!motion.change_direction_if_object_hits_boundary(&at_edge, &SCREEN));
        assert!(!motion.moving_right);
    }

    #[test]
    fn test_conditional_reversal_at_left_boundary() {
        let mut motion = MovementPattern::new(false, ReversalMode::AtBoundary);
        let at_edge = object_at(0.0, 0.0);
        assert!(motion.change_direction_if_object_hits_boundary(&at_edge, &SCREEN));
        assert!(motion.moving_right);
    }

    #[test]
    fn test_unconditional_reversal_always_flips() {
        let mut motion = MovementPattern::new(true, ReversalMode::Unconditional);
        let inside = object_at(100.0, 0.0);

        assert!(motion.change_direction_if_object_hits_boundary(&inside, &SCREEN));
        assert!(!motion.moving_right);
        assert!(motion.change_direction_if_object_hits_boundary(&inside, &SCREEN));
        assert!(motion.moving_right);
    }

    #[test]
    fn test_pattern_replay_scales_by_speed() {
        let pattern = ScriptedPattern::from_name("down").unwrap();
        let mut obj = object_at(0.0, 10.0);
        obj.speed_in_pixel = 4.0;
        pattern.replay(&mut obj);
        // 4 * (0.125 + 0.125 + 0.25)
        assert!((obj.position.y - 12.0).abs() < 1e-5);
        assert_eq!(obj.position.x, 0.0);
    }

    #[test]
    fn test_one_pattern_drives_many_objects() {
        let pattern = ScriptedPattern::Dive;
        let mut a = object_at(0.0, 0.0);
        let mut b = object_at(50.0, 100.0);
        pattern.replay(&mut a);
        pattern.replay(&mut b);
        assert!((a.position.y - 2.0).abs() < 1e-5);
        assert!((b.position.y - 102.0).abs() < 1e-5);
    }

    #[test]
    fn test_unknown_pattern_name() {
        assert_eq!(ScriptedPattern::from_name("sideways"), None);
        assert_eq!(ScriptedPattern::Dive.name(), "dive");
    }
}
