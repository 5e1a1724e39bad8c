//! Frame loop gluing the game to a surface

use crate::error::GameError;
use crate::platform::Surface;
use crate::renderer;
use crate::sim::{GameManager, TickInput};

/// A game driven by a surface: keys in, frames out
pub struct App<S: Surface> {
    pub game: GameManager,
    pub surface: S,
    /// Let the autopilot fly instead of reading steering keys
    pub autopilot: bool,
}

impl<S: Surface> App<S> {
    pub fn new(game: GameManager, surface: S) -> Self {
        Self {
            game,
            surface,
            autopilot: false,
        }
    }

    pub fn with_autopilot(mut self, autopilot: bool) -> Self {
        self.autopilot = autopilot;
        self
    }

    /// Sample input, tick once and render
    pub fn frame(&mut self) -> Result<(), GameError> {
        let keys = self.surface.pressed_keys();
        let mut input = TickInput::from_keys(&keys);
        input.idle_mode = self.autopilot;

        self.game.tick(&input)?;
        renderer::draw_frame(&mut self.surface, &self.game);
        Ok(())
    }

    /// Run until the surface closes or the player quits; returns frames run
    pub fn run(&mut self) -> Result<u64, GameError> {
        let mut frames = 0;
        while self.surface.is_visible() && !self.game.is_terminal() {
            self.frame()?;
            frames += 1;
        }
        log::info!(
            "Stopped after {} frames (score {}, level {})",
            frames,
            self.game.stats().score,
            self.game.levels().current().number()
        );
        Ok(frames)
    }
}
