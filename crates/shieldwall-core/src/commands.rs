//! Commands sent to the simulation by a host or a scripted scenario.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::{Explosive, ProjectileDef, ShieldSpec};
use crate::enums::ScenarioId;
use crate::types::{MapId, ShieldId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    // --- Fire ---
    /// Launch a projectile on a ballistic path.
    Launch {
        map: MapId,
        origin: Vec3,
        destination: Vec3,
        flight_ticks: u32,
        def: ProjectileDef,
        explosive: Option<Explosive>,
    },

    // --- Shields ---
    /// Raise a new shield on a map.
    RaiseShield { map: MapId, spec: ShieldSpec },
    /// Switch a shield on or off.
    SetShieldOnline { shield: ShieldId, online: bool },

    // --- Maps ---
    /// Begin tearing a map down. Shield queries on it fail until restored.
    TearDownMap { map: MapId },
    /// Finish a map transition and make its shields queryable again.
    RestoreMap { map: MapId },

    // --- Simulation control ---
    /// Raise a scenario's shields and start its fire schedule.
    LoadScenario { scenario: ScenarioId },
    Pause,
    Resume,
}
