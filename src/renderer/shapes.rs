//! Per-actor drawing

use crate::platform::{Color, DrawRect, Surface};
use crate::sim::{Actor, ActorKind, ActorState};

/// Player plane, one character per block
pub const PLAYER_ART: &str = "\
...YY...
...YY...
..YYYY..
.YYYYYY.
YYYYYYYY
...YY...
..YYYY..
.YY..YY.";

/// Columns in [`PLAYER_ART`]
const PLAYER_ART_COLUMNS: f32 = 8.0;

fn rect_of(actor: &Actor) -> DrawRect {
    let object = &actor.object;
    DrawRect {
        x: object.position.x,
        y: object.position.y,
        width: object.width,
        height: object.height,
    }
}

/// Image asset for enemy and depot kinds
pub fn image_name(kind: ActorKind) -> Option<&'static str> {
    match kind {
        ActorKind::Ship => Some("ship.png"),
        ActorKind::Helicopter => Some("helicopter.png"),
        ActorKind::Jet => Some("jet.png"),
        ActorKind::FuelDepot => Some("fuel.png"),
        _ => None,
    }
}

/// Draw one actor at its current position
pub fn draw_actor<S: Surface + ?Sized>(surface: &mut S, actor: &Actor) {
    let object = &actor.object;
    match actor.state {
        ActorState::Gone => return,
        ActorState::Exploding(explosion) => {
            surface.add_image(
                explosion.frame.image_name(),
                object.position.x,
                object.position.y,
                object.size,
                0.0,
            );
            return;
        }
        ActorState::Alive => {}
    }

    match actor.kind {
        ActorKind::Background => surface.add_rectangle(rect_of(actor), 0.0, true, Color::RIVER),
        ActorKind::Land => surface.add_rectangle(rect_of(actor), 0.0, true, Color::LAND),
        ActorKind::Bridge => {
            surface.add_rectangle(rect_of(actor), 0.0, true, Color::BRIDGE);
            surface.add_rectangle(rect_of(actor), 2.0, false, Color::BLACK);
        }
        ActorKind::Shot => surface.add_rectangle(rect_of(actor), 0.0, true, Color::SHOT),
        ActorKind::Player => {
            // Bank into the turn
            let dx = object.target_position.x - object.position.x;
            let rotation = if dx < 0.0 {
                -10.0
            } else if dx > 0.0 {
                10.0
            } else {
                0.0
            };
            surface.add_block_image(
                PLAYER_ART,
                object.position.x,
                object.position.y,
                object.width / PLAYER_ART_COLUMNS,
                rotation,
            );
        }
        kind => {
            if let Some(name) = image_name(kind) {
                // Face the drift direction
                let facing_left = actor.motion.as_ref().is_some_and(|m| !m.moving_right);
                let rotation = if facing_left { 180.0 } else { object.rotation };
                surface.add_image(name, object.position.x, object.position.y, object.size, rotation);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{DrawCommand, RecordingSurface};
    use crate::sim::{Position, TickContext};

    fn drawn(actor: &Actor) -> Vec<DrawCommand> {
        let mut surface = RecordingSurface::new();
        draw_actor(&mut surface, actor);
        surface.plot_canvas();
        surface.last_frame().to_vec()
    }

    #[test]
    fn test_player_art_is_rectangular() {
        let widths: Vec<usize> = PLAYER_ART.lines().map(str::len).collect();
        assert!(widths.iter().all(|w| *w as f32 == PLAYER_ART_COLUMNS));
    }

    #[test]
    fn test_land_is_filled_rectangle() {
        let land = Actor::land(1, Position::new(40.0, 80.0), 3);
        let commands = drawn(&land);
        assert_eq!(
            commands,
            vec![DrawCommand::Rectangle {
                rect: DrawRect {
                    x: 40.0,
                    y: 80.0,
                    width: 120.0,
                    height: 40.0
                },
                border_width: 0.0,
                filled: true,
                color: Color::LAND,
            }]
        );
    }

    #[test]
    fn test_exploding_actor_draws_explosion_frame() {
        let mut ship = Actor::ship(1, Position::new(0.0, 0.0), 1.0, None);
        ship.explode(&TickContext::new(0, 0.0, 4));
        let commands = drawn(&ship);
        assert!(matches!(
            &commands[..],
            [DrawCommand::Image { name, .. }] if name == "explosion_1.png"
        ));
    }

    #[test]
    fn test_images_use_object_size() {
        let mut ship = Actor::ship(1, Position::new(0.0, 0.0), 1.0, None);
        ship.object.size = 2.0;
        assert!(matches!(
            &drawn(&ship)[..],
            [DrawCommand::Image { name, scale, .. }] if name == "ship.png" && *scale == 2.0
        ));

        ship.explode(&TickContext::new(0, 0.0, 4));
        assert!(matches!(
            &drawn(&ship)[..],
            [DrawCommand::Image { scale, .. }] if *scale == 2.0
        ));
    }

    #[test]
    fn test_gone_actor_draws_nothing() {
        let mut heli = Actor::helicopter(1, Position::new(0.0, 0.0), 1.0, None);
        heli.state = ActorState::Gone;
        assert!(drawn(&heli).is_empty());
    }

    #[test]
    fn test_player_is_block_image() {
        let commands = drawn(&Actor::player(1));
        assert!(matches!(
            &commands[..],
            [DrawCommand::BlockImage { scale, .. }] if *scale == 4.0
        ));
    }
}
