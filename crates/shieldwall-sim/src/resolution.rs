//! Hit resolution: what happens to a projectile once a shield is found.
//!
//! Each function damages the candidate shield first. Side effects on the
//! projectile happen only when the shield reports the hit as consumed.

use glam::Vec2;

use shieldwall_core::types::{lift, MapId};

use crate::ports::{ProjectileAccess, Shield};

/// Lobbed fire: the shield takes the hit at the projectile's current
/// position and the projectile is destroyed.
pub fn resolve_overhead<P: ProjectileAccess + ?Sized>(
    projectile: &mut P,
    position: Vec2,
    shield: &mut dyn Shield,
) -> bool {
    if !shield.damage(projectile.def().damage_amount_base, position) {
        return false;
    }
    projectile.destroy();
    true
}

/// Ground-level fire: the shield takes the hit where the ray entered it.
/// Explosive payloads are moved to the impact point and detonated before the
/// projectile is destroyed.
pub fn resolve_ground<P: ProjectileAccess + ?Sized>(
    projectile: &mut P,
    map: MapId,
    impact: Vec2,
    shield: &mut dyn Shield,
) -> bool {
    let def = *projectile.def();
    if !shield.damage(def.damage_amount_base, impact) {
        return false;
    }
    if projectile.explosive().is_some() {
        projectile.set_position(lift(impact, def.altitude));
        if let Some(charge) = projectile.explosive() {
            charge.detonate(map);
        }
    }
    projectile.destroy();
    true
}
