//! Platform abstraction layer
//!
//! The game core talks to the outside world only through [`Surface`]:
//! - Visibility (loop continuation)
//! - Drawing primitives and frame commit
//! - Pressed keys
//!
//! [`RecordingSurface`] is a headless implementation that records draw calls
//! and replays scripted key presses.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Escape,
    F1,
}

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RIVER: Color = Color::rgb(45, 50, 184);
    pub const LAND: Color = Color::rgb(110, 156, 66);
    pub const BRIDGE: Color = Color::rgb(105, 105, 15);
    pub const FUEL: Color = Color::rgb(214, 92, 92);
    pub const SHOT: Color = Color::rgb(232, 232, 74);
    pub const HUD: Color = Color::rgb(142, 142, 142);
}

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Text placement options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: f32,
    /// Center the text on (x, y) instead of anchoring its top-left corner
    pub centered: bool,
    pub color: Color,
    /// Degrees
    pub rotation: f32,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            centered: false,
            color,
            rotation: 0.0,
        }
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }
}

/// Rendering/input surface the game loop drives
pub trait Surface {
    /// Whether the window is still open; the game loop stops when false
    fn is_visible(&self) -> bool;

    /// Commit everything added since the last call as one frame
    fn plot_canvas(&mut self);

    fn add_rectangle(&mut self, rect: DrawRect, border_width: f32, filled: bool, color: Color);

    fn add_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);

    /// Draw a named image asset scaled about its top-left corner
    fn add_image(&mut self, name: &str, x: f32, y: f32, scale: f32, rotation: f32);

    /// Draw ASCII-art where each character is a colored block
    fn add_block_image(&mut self, block_image: &str, x: f32, y: f32, scale: f32, rotation: f32);

    /// Keys held down right now
    fn pressed_keys(&mut self) -> Vec<Key>;
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rectangle {
        rect: DrawRect,
        border_width: f32,
        filled: bool,
        color: Color,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
    Image {
        name: String,
        x: f32,
        y: f32,
        scale: f32,
        rotation: f32,
    },
    BlockImage {
        block_image: String,
        x: f32,
        y: f32,
        scale: f32,
        rotation: f32,
    },
}

/// Headless surface: records frames and feeds scripted keys
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Commands added since the last plot
    pending: Vec<DrawCommand>,
    /// Commands of the most recently plotted frame
    last_frame: Vec<DrawCommand>,
    frames_plotted: u64,
    /// Stop being visible after this many frames (None = forever)
    frame_limit: Option<u64>,
    /// Keys for upcoming frames, one entry consumed per `pressed_keys` call
    script: VecDeque<Vec<Key>>,
    /// Keys reported once the script runs out
    held: Vec<Key>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface that closes after `frames` plotted frames
    pub fn with_frame_limit(frames: u64) -> Self {
        Self {
            frame_limit: Some(frames),
            ..Self::default()
        }
    }

    /// Queue keys for the next frames (one entry per frame)
    pub fn script_keys<I>(&mut self, frames: I)
    where
        I: IntoIterator<Item = Vec<Key>>,
    {
        self.script.extend(frames);
    }

    /// Keys reported whenever no scripted frame is queued
    pub fn hold_keys(&mut self, keys: Vec<Key>) {
        self.held = keys;
    }

    pub fn frames_plotted(&self) -> u64 {
        self.frames_plotted
    }

    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    /// Texts drawn in the last plotted frame
    pub fn last_frame_texts(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn is_visible(&self) -> bool {
        self.frame_limit
            .map(|limit| self.frames_plotted < limit)
            .unwrap_or(true)
    }

    fn plot_canvas(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_plotted += 1;
    }

    fn add_rectangle(&mut self, rect: DrawRect, border_width: f32, filled: bool, color: Color) {
        self.pending.push(DrawCommand::Rectangle {
            rect,
            border_width,
            filled,
            color,
        });
    }

    fn add_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        self.pending.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            style,
        });
    }

    fn add_image(&mut self, name: &str, x: f32, y: f32, scale: f32, rotation: f32) {
        self.pending.push(DrawCommand::Image {
            name: name.to_string(),
            x,
            y,
            scale,
            rotation,
        });
    }

    fn add_block_image(&mut self, block_image: &str, x: f32, y: f32, scale: f32, rotation: f32) {
        self.pending.push(DrawCommand::BlockImage {
            block_image: block_image.to_string(),
            x,
            y,
            scale,
            rotation,
        });
    }

    fn pressed_keys(&mut self) -> Vec<Key> {
        self.script.pop_front().unwrap_or_else(|| self.held.clone())
    }
}
