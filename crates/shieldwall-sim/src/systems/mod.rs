//! Systems that operate on the simulation each tick.
//!
//! Systems are plain functions over the world and the shield registry.
//! They do not own state; all state lives in components or the engine.

pub mod cleanup;
pub mod flight;
pub mod schedule;
pub mod shields;
pub mod snapshot;
