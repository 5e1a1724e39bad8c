//! River Raid - A vertically scrolling river-combat arcade game
//!
//! Core modules:
//! - `sim`: Deterministic actor engine (movement, collisions, level/game state machine)
//! - `renderer`: Draws the actor registry, HUD and banners onto a surface
//! - `platform`: Surface/input boundary and a headless recording surface
//! - `persistence`: Difficulty store
//! - `settings`: Difficulty and game configuration
//! - `app`: Frame loop driving a game on a surface

pub mod app;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::{Difficulty, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Simulation rate the tick-based timers are tuned for
    pub const TICKS_PER_SECOND: u64 = 60;

    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 960.0;
    pub const SCREEN_HEIGHT: f32 = 540.0;

    /// Edge length of one level grid cell (pixels)
    pub const BLOCK_SIZE: f32 = 40.0;
    /// Number of grid cells visible per screen column
    pub const VISIBLE_LINES: usize = 14;

    /// Banner duration for level complete / game over (3 seconds)
    pub const BANNER_TICKS: u64 = 3 * TICKS_PER_SECOND;
    /// Cosmetic world scroll while a banner is showing (pixels/tick)
    pub const BANNER_SCROLL_PX: f32 = 1.0;

    /// Ticks between explosion frames
    pub const EXPLOSION_FRAME_TICKS: u64 = 6;
    /// Full frame cycles an explosion plays before the actor disappears
    pub const EXPLOSION_CYCLES: u32 = 2;

    /// Fuel tank
    pub const FUEL_MAX: f32 = 100.0;
    pub const FUEL_DRAIN_PER_TICK: f32 = 0.05;
    pub const FUEL_REFILL_PER_TICK: f32 = 0.5;

    /// Player plane
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    pub const PLAYER_STEER_PX: f32 = 4.0;
    /// Distance from the player's top edge to the bottom of the screen
    pub const PLAYER_BOTTOM_MARGIN: f32 = 80.0;

    /// World scroll speeds selected with up/down (pixels/tick)
    pub const SCROLL_SLOW: f32 = 1.0;
    pub const SCROLL_NORMAL: f32 = 2.0;
    pub const SCROLL_FAST: f32 = 4.0;

    /// Player shot
    pub const SHOT_WIDTH: f32 = 4.0;
    pub const SHOT_HEIGHT: f32 = 16.0;
    pub const SHOT_SPEED: f32 = 12.0;

    /// Drift only runs while an actor is within this margin of the screen
    pub const DRIFT_BAND_MARGIN: f32 = 100.0;

    /// Render/update depths (lower = further back)
    pub const DEPTH_BACKGROUND: f32 = 0.0;
    pub const DEPTH_LAND: f32 = 10.0;
    pub const DEPTH_GROUND_TARGET: f32 = 20.0;
    pub const DEPTH_BOAT: f32 = 30.0;
    pub const DEPTH_JET: f32 = 35.0;
    pub const DEPTH_SHOT: f32 = 40.0;
    pub const DEPTH_PLAYER: f32 = 50.0;
}
