//! Snapshot system: reads the world and registry into a `SimSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use shieldwall_core::components::{Explosive, Position, Projectile, ProjectileDef};
use shieldwall_core::enums::SimPhase;
use shieldwall_core::events::SimEvent;
use shieldwall_core::state::*;
use shieldwall_core::types::{MapId, SimTime};

use crate::registry::ShieldManager;

pub fn build_snapshot(
    world: &World,
    registry: &ShieldManager,
    time: &SimTime,
    phase: SimPhase,
    interception_enabled: bool,
    events: Vec<SimEvent>,
    tally: TallyView,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        phase,
        interception_enabled,
        projectiles: build_projectiles(world),
        shields: registry.shields().map(|shield| shield.view()).collect(),
        events,
        tally,
    }
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut query =
        world.query::<(&MapId, &Projectile, &ProjectileDef, &Position, Option<&Explosive>)>();
    query
        .iter()
        .map(|(_entity, (map, projectile, def, position, explosive))| ProjectileView {
            map: *map,
            position: position.0,
            destination: projectile.destination,
            ticks_to_impact: projectile.ticks_to_impact,
            fly_overhead: def.fly_overhead,
            explosive: explosive.is_some(),
        })
        .collect()
}
