//! Entity spawn factories and volley generation.

use glam::{Vec2, Vec3};
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use shieldwall_core::commands::SimCommand;
use shieldwall_core::components::*;
use shieldwall_core::constants::DEFAULT_FLIGHT_TICKS;
use shieldwall_core::types::{lift, MapId};

/// Spawn a projectile at its origin. Flight time is clamped to at least one
/// tick so progress is always defined.
pub fn spawn_projectile(
    world: &mut World,
    map: MapId,
    origin: Vec3,
    destination: Vec3,
    flight_ticks: u32,
    def: ProjectileDef,
    explosive: Option<Explosive>,
) -> hecs::Entity {
    let flight_ticks = flight_ticks.max(1);
    let projectile = Projectile {
        origin,
        destination,
        ticks_to_impact: flight_ticks,
        starting_ticks_to_impact: flight_ticks,
    };
    match explosive {
        Some(explosive) => world.spawn((map, projectile, def, Position(origin), explosive)),
        None => world.spawn((map, projectile, def, Position(origin))),
    }
}

/// A group of projectiles fired from around `source` at points around
/// `target`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolleySpec {
    pub map: MapId,
    pub count: u32,
    pub source: Vec2,
    /// Radius of the disc firing points are drawn from.
    pub source_spread: f32,
    pub target: Vec2,
    /// Radius of the disc aim points are drawn from.
    pub target_spread: f32,
    pub flight_ticks: u32,
    pub def: ProjectileDef,
    pub explosive: Option<Explosive>,
}

impl Default for VolleySpec {
    fn default() -> Self {
        Self {
            map: MapId::default(),
            count: 1,
            source: Vec2::ZERO,
            source_spread: 0.0,
            target: Vec2::ZERO,
            target_spread: 0.0,
            flight_ticks: DEFAULT_FLIGHT_TICKS,
            def: ProjectileDef::default(),
            explosive: None,
        }
    }
}

/// Roll the launch commands for a volley.
pub fn volley_commands(rng: &mut ChaCha8Rng, spec: &VolleySpec) -> Vec<SimCommand> {
    (0..spec.count)
        .map(|_| {
            let from = spec.source + scatter(rng, spec.source_spread);
            let to = spec.target + scatter(rng, spec.target_spread);
            SimCommand::Launch {
                map: spec.map,
                origin: lift(from, spec.def.altitude),
                destination: lift(to, spec.def.altitude),
                flight_ticks: spec.flight_ticks,
                def: spec.def,
                explosive: spec.explosive,
            }
        })
        .collect()
}

/// Uniform random offset inside a disc of the given radius.
fn scatter(rng: &mut ChaCha8Rng, radius: f32) -> Vec2 {
    let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let distance = radius * rng.gen::<f32>().sqrt();
    Vec2::from_angle(angle) * distance
}
