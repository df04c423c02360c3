//! Ports between the interception core and the host it runs inside.
//!
//! The core never names host fields or types. A host binds these traits to
//! its own representation (see `systems::flight::ProjectileBody`).

use glam::{Vec2, Vec3};

use shieldwall_core::components::ProjectileDef;
use shieldwall_core::types::{MapId, Ray2, ShieldId};

use crate::error::RegistryError;

/// Resolution callback handed to the registry for each candidate shield.
/// Returns true when the shield consumed the hit.
pub type OnHit<'a> = dyn FnMut(&mut dyn Shield, Vec2) -> bool + 'a;

/// Port for reading and mutating a live projectile.
pub trait ProjectileAccess {
    fn origin(&self) -> Vec3;
    fn destination(&self) -> Vec3;
    fn ticks_to_impact(&self) -> u32;
    fn starting_ticks_to_impact(&self) -> u32;
    fn def(&self) -> &ProjectileDef;
    fn set_position(&mut self, position: Vec3);
    fn destroy(&mut self);
    /// The explosive capability, if this projectile carries one.
    fn explosive(&mut self) -> Option<&mut dyn Detonate>;
}

/// Port for an explosive payload.
pub trait Detonate {
    fn detonate(&mut self, map: MapId);
}

/// Port for a single shield's damage capability.
pub trait Shield {
    fn id(&self) -> ShieldId;
    /// Apply damage at a ground-plane point. True when the hit was consumed.
    fn damage(&mut self, amount: f32, at: Vec2) -> bool;
}

/// Port for the shield registry.
///
/// Implementations must enumerate candidates in a deterministic order and stop
/// at the first shield whose `on_hit` returns true.
pub trait ShieldRegistry {
    /// Test a single point for overhead impact. `origin` and `destination`
    /// give the flight path for shields that care about arrival direction.
    fn try_impact_point(
        &mut self,
        map: MapId,
        point: Vec2,
        origin: Vec2,
        destination: Vec2,
        on_hit: &mut OnHit<'_>,
    ) -> Result<bool, RegistryError>;

    /// Test a ray over at most `travel_budget` units. `origin_hint` is the
    /// projectile's launch point in world space.
    fn try_impact_ray(
        &mut self,
        map: MapId,
        origin_hint: Vec3,
        ray: Ray2,
        travel_budget: f32,
        on_hit: &mut OnHit<'_>,
    ) -> Result<bool, RegistryError>;
}
