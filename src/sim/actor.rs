//! Flat actor representation
//!
//! Every actor is a [`GameObject`] plus a kind tag. The kind selects update,
//! draw and collision behavior; an optional hitbox makes the actor take part
//! in the collision sweep and an optional [`MovementPattern`] makes it drift.

use serde::{Deserialize, Serialize};

use super::explosion::Explosion;
use super::gameplay::GameplayStats;
use super::movement::{Boundaries, MovementPattern, ReversalMode};
use super::object::{GameObject, HitboxInsets, Rect};
use super::position::Position;
use super::registry::Layered;
use crate::consts::*;

/// Actor variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// River backdrop, never collides
    Background,
    Land,
    Bridge,
    FuelDepot,
    Ship,
    Helicopter,
    Jet,
    /// Player projectile
    Shot,
    Player,
}

impl ActorKind {
    pub fn depth(&self) -> f32 {
        match self {
            ActorKind::Background => DEPTH_BACKGROUND,
            ActorKind::Land => DEPTH_LAND,
            ActorKind::Bridge | ActorKind::FuelDepot => DEPTH_GROUND_TARGET,
            ActorKind::Ship | ActorKind::Helicopter => DEPTH_BOAT,
            ActorKind::Jet => DEPTH_JET,
            ActorKind::Shot => DEPTH_SHOT,
            ActorKind::Player => DEPTH_PLAYER,
        }
    }

    /// Score for shooting this kind
    pub fn points(&self) -> u64 {
        match self {
            ActorKind::Ship => 30,
            ActorKind::Helicopter => 60,
            ActorKind::FuelDepot => 80,
            ActorKind::Jet => 100,
            ActorKind::Bridge => 500,
            _ => 0,
        }
    }

    /// Moves down with the world as the river scrolls
    pub fn scrolls_with_world(&self) -> bool {
        !matches!(
            self,
            ActorKind::Background | ActorKind::Shot | ActorKind::Player
        )
    }
}

/// Life cycle of an actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActorState {
    Alive,
    /// Playing the death animation
    Exploding(Explosion),
    /// Waiting for the cleanup pass
    Gone,
}

/// Per-tick values every actor update sees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub frame: u64,
    /// How far the world moved down this tick
    pub scroll_delta: f32,
    pub screen: Boundaries,
    pub screen_height: f32,
    pub explosion_frame_ticks: u64,
}

impl TickContext {
    pub fn new(frame: u64, scroll_delta: f32, explosion_frame_ticks: u64) -> Self {
        Self {
            frame,
            scroll_delta,
            screen: Boundaries::new(0.0, SCREEN_WIDTH),
            screen_height: SCREEN_HEIGHT,
            explosion_frame_ticks,
        }
    }
}

/// What the other side of a collision looks like to a reacting actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub kind: ActorKind,
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: u32,
    pub kind: ActorKind,
    pub object: GameObject,
    /// Present on colliding actors
    pub insets: Option<HitboxInsets>,
    pub motion: Option<MovementPattern>,
    pub state: ActorState,
}

impl Layered for Actor {
    fn depth(&self) -> f32 {
        self.object.distance_to_background
    }

    fn id(&self) -> u32 {
        self.id
    }
}

impl Actor {
    /// Non-colliding, motionless actor of `kind` with a `width` x `height` box
    pub fn new(id: u32, kind: ActorKind, position: Position, width: f32, height: f32) -> Self {
        Self {
            id,
            kind,
            object: GameObject::new(position, width, height, kind.depth()),
            insets: None,
            motion: None,
            state: ActorState::Alive,
        }
    }

    pub fn with_hitbox(mut self, insets: HitboxInsets) -> Self {
        self.insets = Some(insets.fit(self.object.width, self.object.height));
        self
    }

    pub fn with_motion(mut self, motion: MovementPattern) -> Self {
        self.motion = Some(motion);
        self
    }

    pub fn with_speed(mut self, speed_in_pixel: f32) -> Self {
        self.object.speed_in_pixel = speed_in_pixel;
        self
    }

    pub fn background(id: u32) -> Self {
        Self::new(
            id,
            ActorKind::Background,
            Position::new(0.0, 0.0),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
        )
    }

    /// Player plane at its start position, bottom center
    pub fn player(id: u32) -> Self {
        let position = Position::new(
            (SCREEN_WIDTH - PLAYER_WIDTH) / 2.0,
            SCREEN_HEIGHT - PLAYER_BOTTOM_MARGIN,
        );
        Self::new(id, ActorKind::Player, position, PLAYER_WIDTH, PLAYER_HEIGHT)
            .with_hitbox(HitboxInsets::uniform(4.0))
            .with_speed(PLAYER_STEER_PX)
    }

    /// Shot leaving the nose of `shooter`
    pub fn shot(id: u32, shooter: &GameObject) -> Self {
        let position = Position::new(
            shooter.center_x() - SHOT_WIDTH / 2.0,
            shooter.position.y - SHOT_HEIGHT,
        );
        Self::new(id, ActorKind::Shot, position, SHOT_WIDTH, SHOT_HEIGHT)
            .with_hitbox(HitboxInsets::default())
            .with_speed(SHOT_SPEED)
    }

    /// Run of `cells` land blocks
    pub fn land(id: u32, position: Position, cells: usize) -> Self {
        Self::new(
            id,
            ActorKind::Land,
            position,
            cells as f32 * BLOCK_SIZE,
            BLOCK_SIZE,
        )
        .with_hitbox(HitboxInsets::default())
    }

    /// Run of `cells` bridge blocks
    pub fn bridge(id: u32, position: Position, cells: usize) -> Self {
        Self::new(
            id,
            ActorKind::Bridge,
            position,
            cells as f32 * BLOCK_SIZE,
            BLOCK_SIZE,
        )
        .with_hitbox(HitboxInsets::new(8.0, 0.0, 8.0, 0.0))
    }

    /// Fuel depot centered in the cell at `cell`
    pub fn fuel_depot(id: u32, cell: Position) -> Self {
        let position = Position::new(cell.x + 4.0, cell.y);
        Self::new(id, ActorKind::FuelDepot, position, 32.0, BLOCK_SIZE)
            .with_hitbox(HitboxInsets::uniform(2.0))
    }

    pub fn ship(id: u32, cell: Position, speed: f32, motion: Option<MovementPattern>) -> Self {
        let position = Position::new(cell.x, cell.y + 8.0);
        let actor = Self::new(id, ActorKind::Ship, position, 64.0, 24.0)
            .with_hitbox(HitboxInsets::new(4.0, 6.0, 4.0, 6.0))
            .with_speed(speed);
        match motion {
            Some(motion) => actor.with_motion(motion),
            None => actor,
        }
    }

    pub fn helicopter(id: u32, cell: Position, speed: f32, motion: Option<MovementPattern>) -> Self {
        let position = Position::new(cell.x, cell.y + 4.0);
        let actor = Self::new(id, ActorKind::Helicopter, position, BLOCK_SIZE, 32.0)
            .with_hitbox(HitboxInsets::uniform(4.0))
            .with_speed(speed);
        match motion {
            Some(motion) => actor.with_motion(motion),
            None => actor,
        }
    }

    pub fn jet(id: u32, cell: Position, speed: f32, motion: MovementPattern) -> Self {
        let position = Position::new(cell.x, cell.y + 10.0);
        Self::new(id, ActorKind::Jet, position, 48.0, 20.0)
            .with_hitbox(HitboxInsets::uniform(4.0))
            .with_speed(speed)
            .with_motion(motion)
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.state, ActorState::Alive)
    }

    pub fn is_gone(&self) -> bool {
        matches!(self.state, ActorState::Gone)
    }

    /// Effective hitbox, `None` for non-colliding actors
    pub fn hitbox(&self) -> Option<Rect> {
        self.insets.as_ref().map(|insets| self.object.hitbox(insets))
    }

    pub fn contact(&self) -> Contact {
        Contact {
            kind: self.kind,
            alive: self.is_alive(),
        }
    }

    /// Start the death animation
    pub fn explode(&mut self, ctx: &TickContext) {
        if self.is_alive() {
            self.state = ActorState::Exploding(Explosion::start(
                ctx.frame,
                ctx.explosion_frame_ticks,
                EXPLOSION_CYCLES,
            ));
        }
    }

    /// Reverse drift and undo the step that caused the contact
    pub fn bounce(&mut self, ctx: &TickContext) {
        if let Some(motion) = self.motion.as_mut() {
            if motion.change_direction_if_object_hits_boundary(&self.object, &ctx.screen) {
                motion.drift(&mut self.object);
            }
        }
    }

    /// Step a running explosion; the actor is gone once it has played out
    pub fn advance_explosion(&mut self, frame: u64, interval: u64) {
        if let ActorState::Exploding(explosion) = &mut self.state {
            if explosion.advance(frame, interval) {
                self.state = ActorState::Gone;
            }
        }
    }

    /// Timers, fuel and despawn checks
    pub fn update_status(&mut self, ctx: &TickContext, stats: &mut GameplayStats) {
        match self.state {
            ActorState::Gone => {}
            ActorState::Exploding(_) => {
                self.advance_explosion(ctx.frame, ctx.explosion_frame_ticks);
            }
            ActorState::Alive => match self.kind {
                ActorKind::Player => {
                    if stats.drain_fuel(FUEL_DRAIN_PER_TICK) {
                        log::debug!("Out of fuel at frame {}", ctx.frame);
                        stats.lose_life();
                        self.explode(ctx);
                    }
                }
                ActorKind::Shot => {
                    if self.object.position.y + self.object.height < 0.0 {
                        self.state = ActorState::Gone;
                    }
                }
                kind if kind.scrolls_with_world() => {
                    // Scrolled past the bottom edge
                    if self.object.position.y > ctx.screen_height + DRIFT_BAND_MARGIN {
                        self.state = ActorState::Gone;
                    }
                }
                _ => {}
            },
        }
    }

    /// World scroll, steering, projectile flight and scripted drift
    pub fn update_position(&mut self, ctx: &TickContext) {
        if self.kind.scrolls_with_world() {
            self.object.position.down(ctx.scroll_delta);
        }
        if !self.is_alive() {
            return;
        }

        match self.kind {
            ActorKind::Player => {
                let target = self.object.target_position;
                let speed = self.object.speed_in_pixel;
                self.object.position.move_toward(target, speed);
            }
            ActorKind::Shot => {
                self.object.position.up(self.object.speed_in_pixel);
            }
            _ => {}
        }

        let Some(motion) = self.motion.as_mut() else {
            return;
        };
        if motion.drift_in_band(&mut self.object, ctx.screen_height) {
            if motion.reversal == ReversalMode::AtBoundary {
                motion.change_direction_if_object_hits_boundary(&self.object, &ctx.screen);
            }
            motion.replay(&mut self.object);
        }
    }

    /// Apply this actor's side of a collision with `other`
    pub fn react_to_collision_with(
        &mut self,
        other: Contact,
        stats: &mut GameplayStats,
        ctx: &TickContext,
    ) {
        super::collision::react(self, other, stats, ctx);
    }
}
