//! Gameplay bookkeeping
//!
//! Owns score/lives/fuel, the world scroll offset and the spawn/despawn
//! policy. Builds the actor set for a level from its grid.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::actor::{Actor, ActorKind};
use super::level::{Cell, Level};
use super::movement::{MovementPattern, ReversalMode, ScriptedPattern};
use super::registry::DepthSortedRegistry;
use crate::consts::*;
use crate::settings::GameConfig;

pub type ActorRegistry = DepthSortedRegistry<Actor>;

/// Score, lives and fuel
#[derive(Debug, Clone, PartialEq)]
pub struct GameplayStats {
    pub score: u64,
    pub lives: u32,
    pub fuel: f32,
}

impl GameplayStats {
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            lives,
            fuel: FUEL_MAX,
        }
    }

    pub fn add_points(&mut self, points: u64) {
        self.score += points;
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        log::debug!("Life lost, {} left", self.lives);
    }

    /// Drain fuel; returns true when the tank is empty
    pub fn drain_fuel(&mut self, amount: f32) -> bool {
        self.fuel = (self.fuel - amount).max(0.0);
        self.fuel <= 0.0
    }

    pub fn refuel(&mut self, amount: f32) {
        self.fuel = (self.fuel + amount).min(FUEL_MAX);
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }
}

/// World scroll speed selected by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl ScrollSpeed {
    pub fn pixels_per_tick(&self) -> f32 {
        match self {
            ScrollSpeed::Slow => SCROLL_SLOW,
            ScrollSpeed::Normal => SCROLL_NORMAL,
            ScrollSpeed::Fast => SCROLL_FAST,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub speed: ScrollSpeed,
    pub fire: bool,
    /// Leave the game
    pub quit: bool,
    /// Switch difficulty (applies from the next new game)
    pub toggle_difficulty: bool,
    /// Let the autopilot fly
    pub idle_mode: bool,
}

impl TickInput {
    pub fn from_keys(keys: &[crate::platform::Key]) -> Self {
        use crate::platform::Key;

        let held = |key: Key| keys.contains(&key);
        let speed = if held(Key::Up) {
            ScrollSpeed::Fast
        } else if held(Key::Down) {
            ScrollSpeed::Slow
        } else {
            ScrollSpeed::Normal
        };

        Self {
            left: held(Key::Left),
            right: held(Key::Right),
            speed,
            fire: held(Key::Space),
            quit: held(Key::Escape),
            toggle_difficulty: held(Key::F1),
            idle_mode: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameplayManager {
    pub stats: GameplayStats,
    /// Pixels the viewport has moved up since the level started
    scroll: f32,
    scroll_speed: ScrollSpeed,
    fire_requested: bool,
    next_id: u32,
    rng: Pcg32,
}

impl GameplayManager {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            stats: GameplayStats::new(config.starting_lives),
            scroll: 0.0,
            scroll_speed: ScrollSpeed::Normal,
            fire_requested: false,
            next_id: 1,
            rng: Pcg32::seed_from_u64(config.seed),
        }
    }

    /// Fresh score and lives for a new game
    pub fn reset_stats(&mut self, config: &GameConfig) {
        self.stats = GameplayStats::new(config.starting_lives);
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Allocate a new actor id
    pub fn next_actor_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace all actors with those of `level` and restart its section
    pub fn init_level(&mut self, level: &Level, config: &GameConfig, registry: &mut ActorRegistry) {
        registry.clear();
        self.scroll = 0.0;
        self.scroll_speed = ScrollSpeed::Normal;
        self.fire_requested = false;
        self.stats.fuel = FUEL_MAX;
        self.rng = Pcg32::seed_from_u64(config.seed ^ u64::from(level.number()));

        let id = self.next_actor_id();
        registry.insert(Actor::background(id));

        let jet_pattern = ScriptedPattern::from_name(&config.jet_pattern);
        if jet_pattern.is_none() {
            log::warn!("Unknown jet pattern '{}', jets fly level", config.jet_pattern);
        }

        for run in level.runs() {
            let origin = level.cell_origin(run.column, run.line);
            let id = self.next_actor_id();
            let actor = match run.cell {
                Cell::Water => continue,
                Cell::Land => Actor::land(id, origin, run.len),
                Cell::Bridge => Actor::bridge(id, origin, run.len),
                Cell::FuelDepot => Actor::fuel_depot(id, origin),
                Cell::Ship => {
                    let motion = self.boat_motion(config);
                    Actor::ship(id, origin, config.enemy_speed, motion)
                }
                Cell::Helicopter => {
                    let motion = self.boat_motion(config);
                    Actor::helicopter(id, origin, config.enemy_speed, motion)
                }
                Cell::Jet => {
                    let mut motion =
                        MovementPattern::new(self.rng.random_bool(0.5), ReversalMode::AtBoundary);
                    motion.pattern = jet_pattern;
                    Actor::jet(id, origin, config.enemy_speed * 2.0, motion)
                }
            };
            registry.insert(actor);
        }

        let id = self.next_actor_id();
        registry.insert(Actor::player(id));

        log::info!(
            "Level {} '{}' initialized with {} actors",
            level.number(),
            level.name(),
            registry.len()
        );
    }

    /// Drift for a ship or helicopter, if it is active at all
    fn boat_motion(&mut self, config: &GameConfig) -> Option<MovementPattern> {
        let active = self.rng.random_range(0..100) < config.enemy_activation_percent;
        let moving_right = self.rng.random_bool(0.5);
        active.then(|| MovementPattern::new(moving_right, ReversalMode::Unconditional))
    }

    pub fn player<'a>(&self, registry: &'a ActorRegistry) -> Option<&'a Actor> {
        registry.iter().find(|a| a.kind == ActorKind::Player)
    }

    pub fn player_alive(&self, registry: &ActorRegistry) -> bool {
        self.player(registry).is_some_and(|p| p.is_alive())
    }

    /// Turn input into player intent: steering target, scroll speed, fire
    pub fn apply_input(&mut self, input: &TickInput, registry: &mut ActorRegistry) {
        self.scroll_speed = input.speed;
        self.fire_requested = input.fire;

        let Some(player) = registry
            .iter_mut()
            .find(|a| a.kind == ActorKind::Player && a.is_alive())
        else {
            return;
        };

        let object = &mut player.object;
        let max_x = SCREEN_WIDTH - object.width;
        let x = object.position.x;
        object.target_position.y = object.position.y;
        object.target_position.x = match (input.left, input.right) {
            (true, false) => (x - PLAYER_STEER_PX).max(0.0),
            (false, true) => (x + PLAYER_STEER_PX).min(max_x),
            _ => x,
        };
    }

    /// Advance the world scroll for this tick; returns the delta.
    /// The world stands still while the player is not flying.
    pub fn advance_scroll(&mut self, registry: &ActorRegistry) -> f32 {
        if !self.player_alive(registry) {
            return 0.0;
        }
        let delta = self.scroll_speed.pixels_per_tick();
        self.scroll += delta;
        delta
    }

    /// Drop despawned actors, then spawn a requested shot
    pub fn cleanup_and_spawn(&mut self, registry: &mut ActorRegistry) {
        registry.retain(|a| !a.is_gone());

        if !self.fire_requested {
            return;
        }
        let shot_live = registry.iter().any(|a| a.kind == ActorKind::Shot);
        let shooter = registry
            .iter()
            .find(|a| a.kind == ActorKind::Player && a.is_alive())
            .map(|p| p.object.clone());
        if let (false, Some(shooter)) = (shot_live, shooter) {
            let id = self.next_actor_id();
            registry.insert(Actor::shot(id, &shooter));
        }
    }

    /// The viewport reached the top of the level grid
    pub fn end_of_level_section_reached(&self, level: &Level) -> bool {
        self.scroll >= level.terminal_scroll()
    }

    /// Cosmetic scroll while a banner is showing; gameplay state is untouched
    pub fn scroll_world_up(&self, registry: &mut ActorRegistry, pixels: f32) {
        for actor in registry.iter_mut() {
            if actor.kind.scrolls_with_world() {
                actor.object.position.down(pixels);
            }
        }
    }

    /// Keep death animations running while gameplay is paused
    pub fn advance_explosions(&self, registry: &mut ActorRegistry, frame: u64, interval: u64) {
        for actor in registry.iter_mut() {
            actor.advance_explosion(frame, interval);
        }
    }

    /// Demo pilot: refuel when low, otherwise hunt enemies, and dodge land
    pub fn autopilot_input(&self, registry: &ActorRegistry) -> TickInput {
        let mut input = TickInput {
            idle_mode: true,
            ..TickInput::default()
        };
        let Some(player) = self.player(registry).filter(|p| p.is_alive()) else {
            return input;
        };
        let px = player.object.center_x();
        let py = player.object.position.y;

        let ahead = |a: &&Actor| a.is_alive() && a.object.position.y < py;
        let nearest = |kinds: &[ActorKind]| {
            registry
                .iter()
                .filter(ahead)
                .filter(|a| kinds.contains(&a.kind))
                .min_by(|a, b| {
                    let da = py - a.object.position.y;
                    let db = py - b.object.position.y;
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                })
        };

        let target = if self.stats.fuel < FUEL_MAX * 0.4 {
            nearest(&[ActorKind::FuelDepot])
        } else {
            nearest(&[
                ActorKind::Ship,
                ActorKind::Helicopter,
                ActorKind::Jet,
                ActorKind::Bridge,
            ])
        };

        if let Some(target) = target {
            let dx = target.object.center_x() - px;
            input.left = dx < -PLAYER_STEER_PX;
            input.right = dx > PLAYER_STEER_PX;
            input.fire = target.kind != ActorKind::FuelDepot
                && (dx.abs() < target.object.width / 2.0 || target.kind == ActorKind::Bridge);
        }

        // Land straight ahead overrides the target
        let left_edge = player.object.position.x - PLAYER_STEER_PX * 2.0;
        let right_edge = left_edge + player.object.width + PLAYER_STEER_PX * 4.0;
        let danger = registry.iter().filter(ahead).find(|a| {
            a.kind == ActorKind::Land
                && a.object.position.y > py - BLOCK_SIZE * 3.0
                && a.object.position.x < right_edge
                && a.object.position.x + a.object.width > left_edge
        });
        if let Some(land) = danger {
            let steer_right = land.object.center_x() < px;
            input.left = !steer_right;
            input.right = steer_right;
            input.speed = ScrollSpeed::Slow;
        }

        input
    }
}
