//! Projectile flight system.
//!
//! For every projectile: run the interception hook, then either apply the
//! interception result or fall through to the default flight advance.

use glam::Vec3;
use hecs::{Entity, World};

use shieldwall_core::components::{Explosive, Position, Projectile, ProjectileDef};
use shieldwall_core::enums::{Outcome, TickVerdict};
use shieldwall_core::events::SimEvent;
use shieldwall_core::state::TallyView;
use shieldwall_core::types::MapId;

use crate::capabilities::InterceptionConfig;
use crate::hook;
use crate::ports::{Detonate, ProjectileAccess, ShieldRegistry};

/// Explosive payload bound to the `Detonate` port. Records the detonation so
/// the engine can emit it once the tick's side effects are settled.
#[derive(Debug, Clone, Copy)]
pub struct Charge {
    pub explosive: Explosive,
    pub detonated_on: Option<MapId>,
}

impl Detonate for Charge {
    fn detonate(&mut self, map: MapId) {
        self.detonated_on = Some(map);
    }
}

/// A projectile's components, copied out of the world for one tick and bound
/// to `ProjectileAccess`.
#[derive(Debug, Clone)]
pub struct ProjectileBody {
    pub map: MapId,
    pub projectile: Projectile,
    pub def: ProjectileDef,
    pub position: Vec3,
    pub charge: Option<Charge>,
    pub destroyed: bool,
}

impl ProjectileBody {
    /// Read a projectile entity. `None` if it lacks flight components.
    pub fn read(world: &World, entity: Entity) -> Option<Self> {
        let map = *world.get::<&MapId>(entity).ok()?;
        let projectile = *world.get::<&Projectile>(entity).ok()?;
        let def = *world.get::<&ProjectileDef>(entity).ok()?;
        let position = world
            .get::<&Position>(entity)
            .map(|p| p.0)
            .unwrap_or(projectile.origin);
        let charge = world.get::<&Explosive>(entity).ok().map(|explosive| Charge {
            explosive: *explosive,
            detonated_on: None,
        });
        Some(Self {
            map,
            projectile,
            def,
            position,
            charge,
            destroyed: false,
        })
    }

    /// Write mutated flight state back, or queue the entity for despawn.
    pub fn write_back(&self, world: &mut World, entity: Entity, despawn_buffer: &mut Vec<Entity>) {
        if self.destroyed {
            despawn_buffer.push(entity);
            return;
        }
        if let Ok(mut projectile) = world.get::<&mut Projectile>(entity) {
            *projectile = self.projectile;
        }
        if let Ok(mut position) = world.get::<&mut Position>(entity) {
            position.0 = self.position;
        }
    }

    /// The engine's own per-tick update: one tick closer to impact.
    /// Lands the projectile when the countdown reaches zero.
    fn advance(&mut self, events: &mut Vec<SimEvent>, tally: &mut TallyView) {
        let flight = &mut self.projectile;
        flight.ticks_to_impact = flight.ticks_to_impact.saturating_sub(1);
        let progress =
            1.0 - flight.ticks_to_impact as f32 / flight.starting_ticks_to_impact as f32;
        self.position = flight.origin.lerp(flight.destination, progress);

        if flight.ticks_to_impact == 0 {
            self.position = flight.destination;
            events.push(SimEvent::Landed {
                map: self.map,
                position: self.position,
            });
            tally.landed += 1;
            let map = self.map;
            if let Some(charge) = self.explosive() {
                charge.detonate(map);
            }
            self.destroy();
        }
    }

    /// Emit the detonation recorded this tick, if any.
    fn settle_detonation(&self, events: &mut Vec<SimEvent>, tally: &mut TallyView) {
        let Some(charge) = self.charge else {
            return;
        };
        if let Some(map) = charge.detonated_on {
            events.push(SimEvent::Detonation {
                map,
                position: self.position,
                radius: charge.explosive.radius,
                damage: charge.explosive.damage,
            });
            tally.detonations += 1;
        }
    }
}

impl ProjectileAccess for ProjectileBody {
    fn origin(&self) -> Vec3 {
        self.projectile.origin
    }

    fn destination(&self) -> Vec3 {
        self.projectile.destination
    }

    fn ticks_to_impact(&self) -> u32 {
        self.projectile.ticks_to_impact
    }

    fn starting_ticks_to_impact(&self) -> u32 {
        self.projectile.starting_ticks_to_impact
    }

    fn def(&self) -> &ProjectileDef {
        &self.def
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }

    fn explosive(&mut self) -> Option<&mut dyn Detonate> {
        self.charge.as_mut().map(|charge| charge as &mut dyn Detonate)
    }
}

/// Run interception and flight for every projectile.
pub fn run<R: ShieldRegistry + ?Sized>(
    world: &mut World,
    registry: &mut R,
    config: &InterceptionConfig,
    events: &mut Vec<SimEvent>,
    tally: &mut TallyView,
    despawn_buffer: &mut Vec<Entity>,
) {
    let entities: Vec<Entity> = world
        .query::<&Projectile>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    for entity in entities {
        let Some(mut body) = ProjectileBody::read(world, entity) else {
            continue;
        };

        let outcome = hook::intercept(config, body.map, &mut body, registry);
        let verdict = outcome.map_or(TickVerdict::Allow, TickVerdict::from);

        match outcome {
            Some(Outcome::Blocked { shield, impact }) => {
                events.push(SimEvent::HitAbsorbed {
                    map: body.map,
                    shield,
                    impact,
                    damage: body.def.damage_amount_base,
                });
                tally.absorbed += 1;
            }
            Some(Outcome::Indeterminate) => tally.indeterminate += 1,
            Some(Outcome::NotBlocked) | None => {}
        }

        if verdict == TickVerdict::Allow {
            body.advance(events, tally);
        }

        body.settle_detonation(events, tally);
        body.write_back(world, entity, despawn_buffer);
    }
}
