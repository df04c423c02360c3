//! Fundamental geometric and simulation types.
//!
//! World space is `Vec3` with `y` as altitude. All interception geometry runs
//! on the ground plane `(x, z)`, carried as `Vec2`.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::DEGENERATE_SEGMENT_EPSILON_SQ;

/// Identifies a map (a self-contained playfield with its own shields).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MapId(pub u32);

/// Opaque handle to a shield owned by the shield registry.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ShieldId(pub u32);

/// Project a world-space point onto the ground plane.
pub fn ground(point: Vec3) -> Vec2 {
    Vec2::new(point.x, point.z)
}

/// Lift a ground-plane point back into world space at the given altitude.
pub fn lift(point: Vec2, altitude: f32) -> Vec3 {
    Vec3::new(point.x, altitude, point.y)
}

/// A directed ray on the ground plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ray2 {
    pub origin: Vec2,
    /// Unit direction, or zero for a degenerate ray.
    pub direction: Vec2,
}

impl Ray2 {
    /// Ray starting at `from` and pointing toward `toward`.
    /// Coincident points produce a zero direction.
    pub fn between(from: Vec2, toward: Vec2) -> Self {
        let delta = toward - from;
        let direction = if delta.length_squared() <= DEGENERATE_SEGMENT_EPSILON_SQ {
            Vec2::ZERO
        } else {
            delta.normalize()
        };
        Self {
            origin: from,
            direction,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.direction == Vec2::ZERO
    }

    /// Point `distance` units along the ray.
    pub fn point_at(&self, distance: f32) -> Vec2 {
        self.origin + self.direction * distance
    }
}

/// Per-tick view of a projectile's flight, rebuilt from the live projectile
/// every tick and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub origin: Vec2,
    pub destination: Vec2,
    /// Ticks left until the projectile reaches its destination.
    pub ticks_to_impact: u32,
    /// Total flight time. Always > 0 for a live projectile.
    pub starting_ticks_to_impact: u32,
    pub fly_overhead: bool,
    pub damage: f32,
}

impl FlightState {
    /// Fraction of the flight completed at the current tick.
    pub fn progress(&self) -> f32 {
        self.progress_at(self.ticks_to_impact as i64)
    }

    /// Fraction of the flight completed one tick from now. Exceeds 1.0 when
    /// the projectile is already at its destination.
    pub fn next_progress(&self) -> f32 {
        self.progress_at(self.ticks_to_impact as i64 - 1)
    }

    fn progress_at(&self, remaining: i64) -> f32 {
        1.0 - remaining as f32 / self.starting_ticks_to_impact as f32
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
