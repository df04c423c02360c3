//! Simulation snapshot: the complete visible state produced each tick.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::SimPhase;
use crate::events::SimEvent;
use crate::types::{MapId, ShieldId, SimTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub interception_enabled: bool,
    pub projectiles: Vec<ProjectileView>,
    pub shields: Vec<ShieldView>,
    pub events: Vec<SimEvent>,
    pub tally: TallyView,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub map: MapId,
    pub position: Vec3,
    pub destination: Vec3,
    pub ticks_to_impact: u32,
    pub fly_overhead: bool,
    pub explosive: bool,
}

/// A shield as seen from outside the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldView {
    pub id: ShieldId,
    pub map: MapId,
    pub center: Vec2,
    pub radius: f32,
    pub energy: f32,
    pub max_energy: f32,
    pub online: bool,
}

/// Running totals since the simulation started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyView {
    pub launched: u32,
    pub absorbed: u32,
    pub landed: u32,
    pub detonations: u32,
    /// Queries that could not be answered and were let through.
    pub indeterminate: u32,
}
