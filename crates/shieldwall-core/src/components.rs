//! ECS components for hecs entities, plus the shield descriptions shared
//! with the registry.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Live ballistic flight data of a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub origin: Vec3,
    pub destination: Vec3,
    pub ticks_to_impact: u32,
    pub starting_ticks_to_impact: u32,
}

/// Current world-space position of a projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec3);

/// The subset of a projectile definition interception needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileDef {
    /// Lobbed/overhead fire that passes over shields until its final impact.
    pub fly_overhead: bool,
    pub damage_amount_base: f32,
    /// Height the projectile flies at.
    pub altitude: f32,
}

impl Default for ProjectileDef {
    fn default() -> Self {
        Self {
            fly_overhead: false,
            damage_amount_base: DEFAULT_PROJECTILE_DAMAGE,
            altitude: DEFAULT_PROJECTILE_ALTITUDE,
        }
    }
}

/// Explosive payload, present only on explosive projectiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosive {
    pub radius: f32,
    pub damage: f32,
}

/// Angular limit for directional shields. Arrivals from outside the arc
/// pass through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShieldArc {
    /// Direction the shield faces on the ground plane (radians, 0 = +x).
    pub facing: f32,
    /// Half-width of the blocking arc (radians).
    pub half_width: f32,
}

/// Static description of a shield used to raise it in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShieldSpec {
    pub center: Vec2,
    pub radius: f32,
    pub max_energy: f32,
    pub recharge_per_tick: f32,
    /// Whether lobbed fire is intercepted at all.
    pub blocks_overhead: bool,
    pub arc: Option<ShieldArc>,
}

impl Default for ShieldSpec {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            radius: DEFAULT_SHIELD_RADIUS,
            max_energy: DEFAULT_SHIELD_ENERGY,
            recharge_per_tick: DEFAULT_SHIELD_RECHARGE,
            blocks_overhead: true,
            arc: None,
        }
    }
}
