//! Interception calculator: flight state to ground-plane position and query.
//!
//! Pure functions with no side effects.

use glam::Vec2;

use shieldwall_core::constants::RAY_TRAVEL_BUDGET;
use shieldwall_core::enums::InterceptionQuery;
use shieldwall_core::types::{ground, FlightState};

use crate::ports::ProjectileAccess;

/// Read a projectile's flight fields into a per-tick `FlightState`.
pub fn read_flight_state<P: ProjectileAccess + ?Sized>(projectile: &P) -> FlightState {
    let def = projectile.def();
    FlightState {
        origin: ground(projectile.origin()),
        destination: ground(projectile.destination()),
        ticks_to_impact: projectile.ticks_to_impact(),
        starting_ticks_to_impact: projectile.starting_ticks_to_impact(),
        fly_overhead: def.fly_overhead,
        damage: def.damage_amount_base,
    }
}

/// Position on the ground plane at the current tick.
pub fn current_position(state: &FlightState) -> Vec2 {
    state.origin.lerp(state.destination, state.progress())
}

/// Position on the ground plane one tick from now.
pub fn next_position(state: &FlightState) -> Vec2 {
    state.origin.lerp(state.destination, state.next_progress())
}

/// Build the single query for this tick: a point for lobbed fire, a
/// budgeted segment otherwise.
pub fn build_query(state: &FlightState) -> InterceptionQuery {
    let position = current_position(state);
    if state.fly_overhead {
        InterceptionQuery::Point {
            at: position,
            origin: state.origin,
            destination: state.destination,
        }
    } else {
        InterceptionQuery::Segment {
            start: position,
            end: next_position(state),
            budget: RAY_TRAVEL_BUDGET,
        }
    }
}
