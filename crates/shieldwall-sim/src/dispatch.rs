//! Shield query dispatcher.
//!
//! Issues one registry query per projectile per tick and folds the result into
//! an `Outcome`. The first shield whose resolution consumes the hit wins.

use glam::{Vec2, Vec3};
use tracing::trace;

use shieldwall_core::enums::{InterceptionQuery, Outcome};
use shieldwall_core::types::{MapId, Ray2, ShieldId};

use crate::ports::{OnHit, Shield, ShieldRegistry};

/// Run `query` against the registry, calling `resolve` for each candidate
/// shield until one consumes the hit.
///
/// `origin_hint` is the projectile's launch point; it is only forwarded for
/// segment queries. A registry error yields `Outcome::Indeterminate` unless a
/// hit was already consumed, in which case the block stands.
pub fn dispatch<R: ShieldRegistry + ?Sized>(
    registry: &mut R,
    map: MapId,
    query: &InterceptionQuery,
    origin_hint: Vec3,
    resolve: &mut OnHit<'_>,
) -> Outcome {
    let mut consumed: Option<(ShieldId, Vec2)> = None;
    let mut on_hit = |shield: &mut dyn Shield, point: Vec2| -> bool {
        // A registry that keeps enumerating after a consume must not land a
        // second hit.
        if consumed.is_some() {
            return false;
        }
        let id = shield.id();
        if resolve(shield, point) {
            consumed = Some((id, point));
            true
        } else {
            false
        }
    };

    let result = match *query {
        InterceptionQuery::Point {
            at,
            origin,
            destination,
        } => registry.try_impact_point(map, at, origin, destination, &mut on_hit),
        InterceptionQuery::Segment { start, end, budget } => registry.try_impact_ray(
            map,
            origin_hint,
            Ray2::between(start, end),
            budget,
            &mut on_hit,
        ),
    };

    match (consumed, result) {
        (Some((shield, impact)), _) => Outcome::Blocked { shield, impact },
        (None, Ok(_)) => Outcome::NotBlocked,
        (None, Err(err)) => {
            trace!(map = map.0, %err, "shield query indeterminate, projectile continues");
            Outcome::Indeterminate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;

    struct MockShield {
        id: ShieldId,
        consumes: bool,
        damage_calls: u32,
    }

    impl Shield for MockShield {
        fn id(&self) -> ShieldId {
            self.id
        }

        fn damage(&mut self, _amount: f32, _at: Vec2) -> bool {
            self.damage_calls += 1;
            self.consumes
        }
    }

    /// Registry where every shield intersects every query, in list order.
    struct MockRegistry {
        shields: Vec<MockShield>,
        fail: bool,
        keep_going: bool,
        last_budget: Option<f32>,
        last_origin_hint: Option<Vec3>,
    }

    impl MockRegistry {
        fn new(consumes: &[bool]) -> Self {
            Self {
                shields: consumes
                    .iter()
                    .enumerate()
                    .map(|(i, &consumes)| MockShield {
                        id: ShieldId(i as u32),
                        consumes,
                        damage_calls: 0,
                    })
                    .collect(),
                fail: false,
                keep_going: false,
                last_budget: None,
                last_origin_hint: None,
            }
        }

        fn enumerate(&mut self, at: Vec2, on_hit: &mut OnHit<'_>) -> Result<bool, RegistryError> {
            if self.fail {
                return Err(RegistryError::MapInTransition(MapId(0)));
            }
            let mut hit = false;
            for shield in &mut self.shields {
                if on_hit(shield, at) {
                    hit = true;
                    if !self.keep_going {
                        return Ok(true);
                    }
                }
            }
            Ok(hit)
        }
    }

    impl ShieldRegistry for MockRegistry {
        fn try_impact_point(
            &mut self,
            _map: MapId,
            point: Vec2,
            _origin: Vec2,
            _destination: Vec2,
            on_hit: &mut OnHit<'_>,
        ) -> Result<bool, RegistryError> {
            self.enumerate(point, on_hit)
        }

        fn try_impact_ray(
            &mut self,
            _map: MapId,
            origin_hint: Vec3,
            ray: Ray2,
            travel_budget: f32,
            on_hit: &mut OnHit<'_>,
        ) -> Result<bool, RegistryError> {
            self.last_budget = Some(travel_budget);
            self.last_origin_hint = Some(origin_hint);
            self.enumerate(ray.origin, on_hit)
        }
    }

    fn damage_all(shield: &mut dyn Shield, at: Vec2) -> bool {
        shield.damage(10.0, at)
    }

    fn segment() -> InterceptionQuery {
        InterceptionQuery::Segment {
            start: Vec2::new(1.0, 2.0),
            end: Vec2::new(1.0, 3.0),
            budget: 1.0,
        }
    }

    #[test]
    fn test_first_consuming_shield_wins() {
        let mut registry = MockRegistry::new(&[true, true]);
        let outcome = dispatch(&mut registry, MapId(0), &segment(), Vec3::ZERO, &mut damage_all);

        assert_eq!(
            outcome,
            Outcome::Blocked {
                shield: ShieldId(0),
                impact: Vec2::new(1.0, 2.0)
            }
        );
        assert_eq!(registry.shields[0].damage_calls, 1);
        assert_eq!(registry.shields[1].damage_calls, 0);
    }

    #[test]
    fn test_declining_shield_falls_through_to_next() {
        let mut registry = MockRegistry::new(&[false, true, true]);
        let outcome = dispatch(&mut registry, MapId(0), &segment(), Vec3::ZERO, &mut damage_all);

        assert!(matches!(outcome, Outcome::Blocked { shield: ShieldId(1), .. }));
        let calls: Vec<u32> = registry.shields.iter().map(|s| s.damage_calls).collect();
        assert_eq!(calls, vec![1, 1, 0]);
    }

    #[test]
    fn test_all_declining_is_not_blocked() {
        let mut registry = MockRegistry::new(&[false, false]);
        let outcome = dispatch(&mut registry, MapId(0), &segment(), Vec3::ZERO, &mut damage_all);
        assert_eq!(outcome, Outcome::NotBlocked);
    }

    #[test]
    fn test_no_shields_is_not_blocked() {
        let mut registry = MockRegistry::new(&[]);
        let point = InterceptionQuery::Point {
            at: Vec2::ZERO,
            origin: Vec2::ZERO,
            destination: Vec2::X,
        };
        let outcome = dispatch(&mut registry, MapId(0), &point, Vec3::ZERO, &mut damage_all);
        assert_eq!(outcome, Outcome::NotBlocked);
    }

    #[test]
    fn test_registry_error_fails_open() {
        let mut registry = MockRegistry::new(&[true]);
        registry.fail = true;
        let outcome = dispatch(&mut registry, MapId(0), &segment(), Vec3::ZERO, &mut damage_all);
        assert_eq!(outcome, Outcome::Indeterminate);
        assert_eq!(registry.shields[0].damage_calls, 0);
    }

    #[test]
    fn test_second_hit_is_refused_if_registry_keeps_going() {
        let mut registry = MockRegistry::new(&[true, true]);
        registry.keep_going = true;
        let outcome = dispatch(&mut registry, MapId(0), &segment(), Vec3::ZERO, &mut damage_all);

        assert!(matches!(outcome, Outcome::Blocked { shield: ShieldId(0), .. }));
        assert_eq!(registry.shields[1].damage_calls, 0);
    }

    #[test]
    fn test_segment_forwards_budget_and_origin_hint() {
        let mut registry = MockRegistry::new(&[]);
        let hint = Vec3::new(4.0, 1.0, -4.0);
        dispatch(&mut registry, MapId(0), &segment(), hint, &mut damage_all);
        assert_eq!(registry.last_budget, Some(1.0));
        assert_eq!(registry.last_origin_hint, Some(hint));
    }
}
