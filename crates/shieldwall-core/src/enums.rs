//! Enumeration types used throughout the interception layer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::ShieldId;

/// The single shield query issued for a projectile on a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum InterceptionQuery {
    /// Lobbed fire: only the current position is tested, with the flight
    /// endpoints attached for shields that care about arrival direction.
    Point {
        at: Vec2,
        origin: Vec2,
        destination: Vec2,
    },
    /// Ground-level fire: the path from `start` toward `end`, limited to
    /// `budget` units of travel.
    Segment { start: Vec2, end: Vec2, budget: f32 },
}

/// Result of dispatching an interception query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// A shield consumed the hit.
    Blocked { shield: ShieldId, impact: Vec2 },
    /// No shield intersected, or every intersecting shield declined.
    NotBlocked,
    /// The registry could not answer this tick (e.g. the map is being torn
    /// down). Treated as not blocked.
    Indeterminate,
}

/// What the host should do with its default per-tick projectile update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickVerdict {
    /// Run the default flight advance.
    Allow,
    /// Skip it: the projectile was intercepted.
    Suppress,
}

impl From<Outcome> for TickVerdict {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Blocked { .. } => TickVerdict::Suppress,
            Outcome::NotBlocked | Outcome::Indeterminate => TickVerdict::Allow,
        }
    }
}

/// Host bindings the interception hook depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Projectile launch point.
    Origin,
    /// Projectile target point.
    Destination,
    /// Ticks remaining until impact.
    TicksToImpact,
    /// Total flight ticks.
    StartingTicksToImpact,
    /// Explosive detonation action.
    Detonate,
}

impl Capability {
    /// Every capability required for interception to activate.
    pub const REQUIRED: [Capability; 5] = [
        Capability::Origin,
        Capability::Destination,
        Capability::TicksToImpact,
        Capability::StartingTicksToImpact,
        Capability::Detonate,
    ];

    /// Human-readable binding name for diagnostics.
    pub fn binding_name(&self) -> &'static str {
        match self {
            Capability::Origin => "projectile.origin",
            Capability::Destination => "projectile.destination",
            Capability::TicksToImpact => "projectile.ticks_to_impact",
            Capability::StartingTicksToImpact => "projectile.starting_ticks_to_impact",
            Capability::Detonate => "explosive.detonate",
        }
    }
}

/// Simulation run state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
}

/// Built-in scenario selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioId {
    /// One shield, a few ground volleys and a mortar salvo.
    #[default]
    Skirmish,
    /// Overlapping and directional shields under sustained explosive fire.
    Siege,
    /// A weak shield is overwhelmed, then its map is torn down mid-volley.
    Breach,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 3] = [ScenarioId::Skirmish, ScenarioId::Siege, ScenarioId::Breach];

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::Skirmish => "skirmish",
            ScenarioId::Siege => "siege",
            ScenarioId::Breach => "breach",
        }
    }

    /// Case-insensitive lookup by `name()`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name().eq_ignore_ascii_case(name))
    }
}
