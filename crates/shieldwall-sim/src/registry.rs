//! Reference shield registry.
//!
//! Shields are circles on the ground plane with an energy pool. They are
//! stored per map in registration order, which is also the order candidates
//! are offered to the resolution callback. Stored in `SimulationEngine`,
//! NOT as ECS entities.

use std::collections::BTreeMap;

use glam::{Vec2, Vec3};
use tracing::{debug, info};

use shieldwall_core::components::ShieldSpec;
use shieldwall_core::constants::SHIELD_RESTART_FRACTION;
use shieldwall_core::state::ShieldView;
use shieldwall_core::types::{ground, MapId, Ray2, ShieldId};

use crate::error::RegistryError;
use crate::ports::{OnHit, Shield, ShieldRegistry};

/// Energy-state change a shield went through since events were last drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShieldTransition {
    Collapsed,
    Restored,
}

/// A live shield.
#[derive(Debug, Clone)]
pub struct ShieldBody {
    id: ShieldId,
    map: MapId,
    spec: ShieldSpec,
    energy: f32,
    /// Operator switch.
    enabled: bool,
    /// Ran dry and has not recharged past the restart threshold yet.
    collapsed: bool,
    transition: Option<ShieldTransition>,
}

impl ShieldBody {
    fn new(id: ShieldId, map: MapId, spec: ShieldSpec) -> Self {
        Self {
            id,
            map,
            spec,
            energy: spec.max_energy,
            enabled: true,
            collapsed: false,
            transition: None,
        }
    }

    pub fn map(&self) -> MapId {
        self.map
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn is_online(&self) -> bool {
        self.enabled && !self.collapsed
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.spec.center) <= self.spec.radius * self.spec.radius
    }

    /// Whether something travelling along `heading` arrives inside the arc.
    /// Shields without an arc, and headings of zero length, always pass.
    fn faces(&self, heading: Vec2) -> bool {
        let Some(arc) = self.spec.arc else {
            return true;
        };
        let Some(heading) = heading.try_normalize() else {
            return true;
        };
        let facing = Vec2::from_angle(arc.facing);
        // The projectile comes *from* the opposite of its heading.
        (-heading).dot(facing) >= arc.half_width.cos()
    }

    /// Where `ray` enters this shield within `budget` units, if it does.
    /// A ray that already starts inside is stopped where it stands.
    fn ray_entry(&self, ray: &Ray2, budget: f32) -> Option<Vec2> {
        if self.contains(ray.origin) {
            return Some(ray.origin);
        }
        if ray.is_degenerate() {
            return None;
        }
        let offset = ray.origin - self.spec.center;
        let b = offset.dot(ray.direction);
        if b > 0.0 {
            return None;
        }
        let c = offset.length_squared() - self.spec.radius * self.spec.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let t = -b - discriminant.sqrt();
        (t <= budget).then(|| ray.point_at(t))
    }

    /// Add one tick of recharge. Returns true if the shield came back online.
    pub fn recharge(&mut self) -> bool {
        self.energy = (self.energy + self.spec.recharge_per_tick).min(self.spec.max_energy);
        if self.collapsed && self.energy >= self.spec.max_energy * SHIELD_RESTART_FRACTION {
            self.collapsed = false;
            self.transition = Some(ShieldTransition::Restored);
            return true;
        }
        false
    }

    /// Take the pending energy-state transition, if any.
    pub fn take_transition(&mut self) -> Option<ShieldTransition> {
        self.transition.take()
    }

    pub fn view(&self) -> ShieldView {
        ShieldView {
            id: self.id,
            map: self.map,
            center: self.spec.center,
            radius: self.spec.radius,
            energy: self.energy,
            max_energy: self.spec.max_energy,
            online: self.is_online(),
        }
    }
}

impl Shield for ShieldBody {
    fn id(&self) -> ShieldId {
        self.id
    }

    fn damage(&mut self, amount: f32, at: Vec2) -> bool {
        if !self.is_online() || self.energy <= 0.0 {
            return false;
        }
        self.energy -= amount;
        debug!(
            shield = self.id.0,
            x = at.x,
            z = at.y,
            amount,
            energy = self.energy,
            "shield absorbed hit"
        );
        if self.energy <= 0.0 {
            self.energy = 0.0;
            self.collapsed = true;
            self.transition = Some(ShieldTransition::Collapsed);
            debug!(shield = self.id.0, "shield collapsed");
        }
        true
    }
}

#[derive(Debug, Clone, Default)]
struct MapShields {
    shields: Vec<ShieldBody>,
    in_transition: bool,
}

/// All shields across all maps.
#[derive(Debug, Clone, Default)]
pub struct ShieldManager {
    maps: BTreeMap<MapId, MapShields>,
    next_id: u32,
}

impl ShieldManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new shield. Later shields are tested after earlier ones.
    pub fn raise(&mut self, map: MapId, spec: ShieldSpec) -> ShieldId {
        let id = ShieldId(self.next_id);
        self.next_id += 1;
        self.maps
            .entry(map)
            .or_default()
            .shields
            .push(ShieldBody::new(id, map, spec));
        debug!(shield = id.0, map = map.0, radius = spec.radius, "shield raised");
        id
    }

    /// Flip a shield's operator switch. Returns false for unknown ids.
    pub fn set_online(&mut self, id: ShieldId, online: bool) -> bool {
        match self.get_mut(id) {
            Some(shield) => {
                shield.enabled = online;
                true
            }
            None => false,
        }
    }

    /// Mark a map as mid-transition. Queries against it fail until restored.
    pub fn begin_teardown(&mut self, map: MapId) {
        self.maps.entry(map).or_default().in_transition = true;
        info!(map = map.0, "map teardown started");
    }

    pub fn restore(&mut self, map: MapId) {
        if let Some(entry) = self.maps.get_mut(&map) {
            entry.in_transition = false;
            info!(map = map.0, "map restored");
        }
    }

    pub fn get(&self, id: ShieldId) -> Option<&ShieldBody> {
        self.shields().find(|shield| shield.id == id)
    }

    pub fn get_mut(&mut self, id: ShieldId) -> Option<&mut ShieldBody> {
        self.shields_mut().find(|shield| shield.id == id)
    }

    /// Every shield, by map then registration order.
    pub fn shields(&self) -> impl Iterator<Item = &ShieldBody> {
        self.maps.values().flat_map(|entry| entry.shields.iter())
    }

    pub fn shields_mut(&mut self) -> impl Iterator<Item = &mut ShieldBody> {
        self.maps.values_mut().flat_map(|entry| entry.shields.iter_mut())
    }

    /// Shields of one map that can be queried right now.
    fn queryable(&mut self, map: MapId) -> Result<&mut [ShieldBody], RegistryError> {
        match self.maps.get_mut(&map) {
            Some(entry) if entry.in_transition => Err(RegistryError::MapInTransition(map)),
            Some(entry) => Ok(&mut entry.shields),
            None => Ok(&mut []),
        }
    }
}

impl ShieldRegistry for ShieldManager {
    fn try_impact_point(
        &mut self,
        map: MapId,
        point: Vec2,
        origin: Vec2,
        destination: Vec2,
        on_hit: &mut OnHit<'_>,
    ) -> Result<bool, RegistryError> {
        let heading = destination - origin;
        for shield in self.queryable(map)? {
            // Lobbed fire only comes down on a shield it is aimed inside.
            if !shield.spec.blocks_overhead
                || !shield.contains(point)
                || !shield.contains(destination)
                || shield.contains(origin)
                || !shield.faces(heading)
            {
                continue;
            }
            if on_hit(shield, point) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn try_impact_ray(
        &mut self,
        map: MapId,
        origin_hint: Vec3,
        ray: Ray2,
        travel_budget: f32,
        on_hit: &mut OnHit<'_>,
    ) -> Result<bool, RegistryError> {
        let launched_from = ground(origin_hint);
        for shield in self.queryable(map)? {
            if shield.contains(launched_from) || !shield.faces(ray.direction) {
                continue;
            }
            let Some(impact) = shield.ray_entry(&ray, travel_budget) else {
                continue;
            };
            if on_hit(shield, impact) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
