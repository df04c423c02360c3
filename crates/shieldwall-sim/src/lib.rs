//! Projectile interception engine for SHIELDWALL.
//!
//! The interception core (calculator, dispatcher, per-tick hook) sits behind
//! narrow ports. A headless hecs simulation and a reference shield registry
//! drive it so every contract can be exercised end to end.

pub mod capabilities;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod hook;
pub mod interception;
pub mod ports;
pub mod registry;
pub mod resolution;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use shieldwall_core as core;
pub use capabilities::{HostBindings, InterceptionConfig};
pub use config::SimConfig;
pub use engine::SimulationEngine;
pub use registry::ShieldManager;
