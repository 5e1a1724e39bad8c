//! Collision detection and reaction dispatch
//!
//! The sweep tests every unordered pair of colliding actors once per tick.
//! On overlap both sides react. What a reaction does depends on both kinds,
//! so it is looked up from the `(me, other)` pair rather than from either
//! actor alone. Reactions only mutate state; removal happens later in the
//! cleanup pass.

use super::actor::{Actor, ActorKind, Contact, TickContext};
use super::gameplay::GameplayStats;
use crate::consts::FUEL_REFILL_PER_TICK;

/// Outcome of a collision for one participant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Ignore,
    /// Player hit something solid: lose a life and explode
    Crash,
    /// Destroyed, awarding `points`
    Explode { points: u64 },
    /// Vanish without an explosion
    Despawn,
    /// Top up the fuel tank
    Refuel,
    /// Reverse drift (scenery bounce)
    Bounce,
}

/// Reaction table keyed by both kinds
pub fn reaction(me: ActorKind, other: ActorKind) -> Reaction {
    use ActorKind::*;

    match (me, other) {
        (Player, Land | Bridge | Ship | Helicopter | Jet) => Reaction::Crash,
        (Player, FuelDepot) => Reaction::Refuel,
        (Ship | Helicopter | Jet | FuelDepot | Bridge, Shot) => Reaction::Explode {
            points: me.points(),
        },
        // Rammed by the player: destroyed, no points
        (Ship | Helicopter | Jet | Bridge, Player) => Reaction::Explode { points: 0 },
        (Shot, Land | Bridge | FuelDepot | Ship | Helicopter | Jet) => Reaction::Despawn,
        (Ship | Helicopter, Land) => Reaction::Bounce,
        _ => Reaction::Ignore,
    }
}

/// Apply `actor`'s side of a collision with `other`
pub fn react(actor: &mut Actor, other: Contact, stats: &mut GameplayStats, ctx: &TickContext) {
    // Only live actors react, and only to live actors
    if !actor.is_alive() || !other.alive {
        return;
    }

    match reaction(actor.kind, other.kind) {
        Reaction::Ignore => {}
        Reaction::Crash => {
            log::debug!("Player crashed into {:?} at frame {}", other.kind, ctx.frame);
            stats.lose_life();
            actor.explode(ctx);
        }
        Reaction::Explode { points } => {
            if points > 0 {
                log::debug!("{:?} destroyed (+{})", actor.kind, points);
            }
            stats.add_points(points);
            actor.explode(ctx);
        }
        Reaction::Despawn => actor.state = super::actor::ActorState::Gone,
        Reaction::Refuel => stats.refuel(FUEL_REFILL_PER_TICK),
        Reaction::Bounce => actor.bounce(ctx),
    }
}

/// Test every unordered pair of colliding actors and dispatch reactions.
///
/// Returns the ids of each overlapping pair, in sweep order.
pub fn sweep(
    actors: &mut [Actor],
    stats: &mut GameplayStats,
    ctx: &TickContext,
) -> Vec<(u32, u32)> {
    let mut contacts = Vec::new();

    for j in 1..actors.len() {
        let (head, tail) = actors.split_at_mut(j);
        let b = &mut tail[0];
        for a in head.iter_mut() {
            let (Some(box_a), Some(box_b)) = (a.hitbox(), b.hitbox()) else {
                continue;
            };
            if !box_a.overlaps(&box_b) {
                continue;
            }

            // Both sides see the other as it was before either reacted
            let contact_a = a.contact();
            let contact_b = b.contact();
            a.react_to_collision_with(contact_b, stats, ctx);
            b.react_to_collision_with(contact_a, stats, ctx);
            contacts.push((a.id, b.id));
        }
    }

    contacts
}
