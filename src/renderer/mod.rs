//! Frame rendering
//!
//! Draws the actor registry back to front, then the HUD and any banner,
//! onto a [`Surface`] and commits the frame.

pub mod shapes;

pub use shapes::draw_actor;

use crate::consts::{FUEL_MAX, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::{Color, DrawRect, Surface, TextStyle};
use crate::sim::{GameManager, GamePhase};

/// Height of the HUD strip at the bottom of the screen
pub const HUD_HEIGHT: f32 = 40.0;

const FUEL_GAUGE_WIDTH: f32 = 200.0;

/// Banner text for a phase, if one is showing
pub fn banner_text(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::ShowingLevelCompleteMessage { .. } => Some("Level complete"),
        GamePhase::ShowingGameOverMessage { .. } => Some("Game over"),
        GamePhase::Playing | GamePhase::Terminal => None,
    }
}

/// Draw and commit one frame
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, game: &GameManager) {
    for actor in game.registry() {
        draw_actor(surface, actor);
    }
    draw_hud(surface, game);

    if let Some(text) = banner_text(game.phase()) {
        surface.add_text(
            text,
            SCREEN_WIDTH / 2.0,
            SCREEN_HEIGHT / 2.0,
            TextStyle::new(48.0, Color::WHITE).centered(),
        );
    }

    surface.plot_canvas();
}

fn draw_hud<S: Surface + ?Sized>(surface: &mut S, game: &GameManager) {
    let top = SCREEN_HEIGHT - HUD_HEIGHT;
    let stats = game.stats();
    let style = TextStyle::new(20.0, Color::BLACK);

    surface.add_rectangle(
        DrawRect {
            x: 0.0,
            y: top,
            width: SCREEN_WIDTH,
            height: HUD_HEIGHT,
        },
        0.0,
        true,
        Color::HUD,
    );
    surface.add_text(&format!("Score: {}", stats.score), 16.0, top + 10.0, style);
    surface.add_text(&format!("Lives: {}", stats.lives), 200.0, top + 10.0, style);
    surface.add_text(
        game.levels().current().name(),
        SCREEN_WIDTH / 2.0,
        top + HUD_HEIGHT / 2.0,
        style.centered(),
    );

    // Fuel gauge: outline plus fill proportional to the tank
    let gauge = DrawRect {
        x: SCREEN_WIDTH - FUEL_GAUGE_WIDTH - 16.0,
        y: top + 10.0,
        width: FUEL_GAUGE_WIDTH,
        height: HUD_HEIGHT - 20.0,
    };
    let fill = DrawRect {
        width: FUEL_GAUGE_WIDTH * (stats.fuel / FUEL_MAX).clamp(0.0, 1.0),
        ..gauge
    };
    surface.add_rectangle(fill, 0.0, true, Color::FUEL);
    surface.add_rectangle(gauge, 2.0, false, Color::BLACK);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{DrawCommand, RecordingSurface};
    use crate::sim::{LevelRegistry, TickInput};
    use crate::GameConfig;

    fn game() -> GameManager {
        GameManager::new(LevelRegistry::built_in().unwrap(), GameConfig::default())
    }

    #[test]
    fn test_frame_draws_background_first_and_hud() {
        let game = game();
        let mut surface = RecordingSurface::new();
        draw_frame(&mut surface, &game);

        assert_eq!(surface.frames_plotted(), 1);
        assert!(matches!(
            surface.last_frame().first(),
            Some(DrawCommand::Rectangle { color, .. }) if *color == Color::RIVER
        ));

        let texts = surface.last_frame_texts();
        assert!(texts.contains(&"Score: 0"));
        assert!(texts.contains(&"Lives: 10"));
        assert!(texts.contains(&"Delta"));
        assert!(!texts.contains(&"Game over"));
    }

    #[test]
    fn test_fuel_gauge_tracks_fuel() {
        let mut game = game();
        let mut surface = RecordingSurface::new();
        for _ in 0..100 {
            game.tick(&TickInput::default()).unwrap();
        }
        draw_frame(&mut surface, &game);

        let fill = surface
            .last_frame()
            .iter()
            .find_map(|cmd| match cmd {
                DrawCommand::Rectangle { rect, color, .. } if *color == Color::FUEL => Some(*rect),
                _ => None,
            })
            .unwrap();
        let expected = FUEL_GAUGE_WIDTH * game.stats().fuel / FUEL_MAX;
        assert!((fill.width - expected).abs() < 1e-3);
        assert!(fill.width < FUEL_GAUGE_WIDTH);
    }

    #[test]
    fn test_banner_text() {
        assert_eq!(
            banner_text(GamePhase::ShowingGameOverMessage { until: 3 }),
            Some("Game over")
        );
        assert_eq!(
            banner_text(GamePhase::ShowingLevelCompleteMessage { until: 3 }),
            Some("Level complete")
        );
        assert_eq!(banner_text(GamePhase::Playing), None);
    }
}
