//! Events emitted by the simulation for UI and logging consumers.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::{MapId, ShieldId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A shield absorbed a projectile.
    HitAbsorbed {
        map: MapId,
        shield: ShieldId,
        impact: Vec2,
        damage: f32,
    },
    /// An explosive payload went off.
    Detonation {
        map: MapId,
        position: Vec3,
        radius: f32,
        damage: f32,
    },
    /// A projectile reached its destination unopposed.
    Landed { map: MapId, position: Vec3 },
    /// A shield ran out of energy and went offline.
    ShieldCollapsed { map: MapId, shield: ShieldId },
    /// A collapsed shield recharged enough to come back online.
    ShieldRestored { map: MapId, shield: ShieldId },
}
