//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, timers are frame deadlines
//! - Seeded RNG only
//! - Stable iteration order (by depth, then insertion)
//! - No rendering dependencies

pub mod actor;
pub mod collision;
pub mod explosion;
pub mod game;
pub mod gameplay;
pub mod level;
pub mod movement;
pub mod object;
pub mod position;
pub mod registry;

pub use actor::{Actor, ActorKind, ActorState, TickContext};
pub use collision::{Reaction, reaction, sweep};
pub use explosion::{Explosion, ExplosionState};
pub use game::{GameManager, GamePhase, UpdatePass, for_each_update};
pub use gameplay::{ActorRegistry, GameplayManager, GameplayStats, ScrollSpeed, TickInput};
pub use level::{Cell, CellRun, Level, LevelAdvance, LevelRegistry};
pub use movement::{Boundaries, MovementPattern, ReversalMode, ScriptedPattern};
pub use object::{GameObject, HitboxInsets, Rect};
pub use position::Position;
pub use registry::{DepthSortedRegistry, Layered};
