//! Core types and definitions for the SHIELDWALL interception layer.
//!
//! This crate defines the vocabulary shared across the other crates:
//! flight-state geometry, components, commands, snapshots, events,
//! and constants. It has no dependency on any runtime or ECS.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
