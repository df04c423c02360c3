//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- Interception ---

/// Travel budget handed to ray queries, in world units.
///
/// A fixed unit step per tick, not the distance the projectile actually
/// covers in one tick. Fast projectiles that overshoot a shield boundary are
/// caught on the following tick because their ray then starts inside it.
pub const RAY_TRAVEL_BUDGET: f32 = 1.0;

/// Squared length below which a flight segment is treated as a point.
pub const DEGENERATE_SEGMENT_EPSILON_SQ: f32 = 1e-12;

// --- Shields ---

/// Default shield radius (world units).
pub const DEFAULT_SHIELD_RADIUS: f32 = 8.0;

/// Default shield energy pool.
pub const DEFAULT_SHIELD_ENERGY: f32 = 400.0;

/// Default shield recharge per tick.
pub const DEFAULT_SHIELD_RECHARGE: f32 = 0.5;

/// Fraction of max energy a collapsed shield must regain before it comes
/// back online.
pub const SHIELD_RESTART_FRACTION: f32 = 0.25;

// --- Volleys ---

/// Default flight time for generated volleys (ticks).
pub const DEFAULT_FLIGHT_TICKS: u32 = 90;

/// Default base damage of generated projectiles.
pub const DEFAULT_PROJECTILE_DAMAGE: f32 = 12.0;

/// Default altitude projectiles fly at (the `y` axis).
pub const DEFAULT_PROJECTILE_ALTITUDE: f32 = 1.0;
