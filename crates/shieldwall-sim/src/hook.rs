//! Per-tick hook: runs before the host's default projectile update and may
//! veto it.

use glam::Vec2;

use shieldwall_core::enums::{InterceptionQuery, Outcome, TickVerdict};
use shieldwall_core::types::MapId;

use crate::capabilities::InterceptionConfig;
use crate::dispatch::dispatch;
use crate::interception::{build_query, read_flight_state};
use crate::ports::{ProjectileAccess, Shield, ShieldRegistry};
use crate::resolution::{resolve_ground, resolve_overhead};

/// Test a projectile against the shields of `map` for this tick.
///
/// Returns `None` when interception is disabled; the projectile is not read.
pub fn intercept<P, R>(
    config: &InterceptionConfig,
    map: MapId,
    projectile: &mut P,
    registry: &mut R,
) -> Option<Outcome>
where
    P: ProjectileAccess + ?Sized,
    R: ShieldRegistry + ?Sized,
{
    if !config.is_enabled() {
        return None;
    }

    let origin_hint = projectile.origin();
    let state = read_flight_state(projectile);
    let query = build_query(&state);

    let outcome = match query {
        InterceptionQuery::Point { at, .. } => dispatch(
            registry,
            map,
            &query,
            origin_hint,
            &mut |shield: &mut dyn Shield, _: Vec2| resolve_overhead(projectile, at, shield),
        ),
        InterceptionQuery::Segment { .. } => dispatch(
            registry,
            map,
            &query,
            origin_hint,
            &mut |shield: &mut dyn Shield, impact: Vec2| {
                resolve_ground(projectile, map, impact, shield)
            },
        ),
    };
    Some(outcome)
}

/// `intercept`, reduced to whether the host should run its default update.
pub fn pre_tick<P, R>(
    config: &InterceptionConfig,
    map: MapId,
    projectile: &mut P,
    registry: &mut R,
) -> TickVerdict
where
    P: ProjectileAccess + ?Sized,
    R: ShieldRegistry + ?Sized,
{
    intercept(config, map, projectile, registry).map_or(TickVerdict::Allow, TickVerdict::from)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec3;

    use shieldwall_core::components::ProjectileDef;
    use shieldwall_core::types::{Ray2, ShieldId};

    use super::*;
    use crate::capabilities::HostBindings;
    use crate::error::RegistryError;
    use crate::ports::{Detonate, OnHit};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        SetPosition(Vec3),
        Detonate(MapId),
        Destroy,
    }

    type Log = Rc<RefCell<Vec<Call>>>;

    struct Charge {
        log: Log,
    }

    impl Detonate for Charge {
        fn detonate(&mut self, map: MapId) {
            self.log.borrow_mut().push(Call::Detonate(map));
        }
    }

    /// Projectile that records every mutation, detonations included, in one log.
    struct Recorder {
        def: ProjectileDef,
        ticks_to_impact: u32,
        charge: Option<Charge>,
        log: Log,
    }

    impl Recorder {
        fn new(fly_overhead: bool, explosive: bool) -> Self {
            let log = Log::default();
            Self {
                def: ProjectileDef {
                    fly_overhead,
                    damage_amount_base: 20.0,
                    altitude: 2.0,
                },
                ticks_to_impact: 5,
                charge: explosive.then(|| Charge { log: log.clone() }),
                log,
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.log.borrow().clone()
        }
    }

    impl ProjectileAccess for Recorder {
        fn origin(&self) -> Vec3 {
            Vec3::new(0.0, 2.0, 0.0)
        }
        fn destination(&self) -> Vec3 {
            Vec3::new(10.0, 2.0, 0.0)
        }
        fn ticks_to_impact(&self) -> u32 {
            self.ticks_to_impact
        }
        fn starting_ticks_to_impact(&self) -> u32 {
            10
        }
        fn def(&self) -> &ProjectileDef {
            &self.def
        }
        fn set_position(&mut self, position: Vec3) {
            self.log.borrow_mut().push(Call::SetPosition(position));
        }
        fn destroy(&mut self) {
            self.log.borrow_mut().push(Call::Destroy);
        }
        fn explosive(&mut self) -> Option<&mut dyn Detonate> {
            self.charge.as_mut().map(|c| c as &mut dyn Detonate)
        }
    }

    struct Wall {
        id: ShieldId,
        consumes: bool,
        hits: Vec<(f32, Vec2)>,
    }

    impl Shield for Wall {
        fn id(&self) -> ShieldId {
            self.id
        }
        fn damage(&mut self, amount: f32, at: Vec2) -> bool {
            self.hits.push((amount, at));
            self.consumes
        }
    }

    /// Every shield intersects; rays hit at a fixed impact point.
    struct Walls {
        shields: Vec<Wall>,
        impact: Vec2,
        fail: bool,
        queries: Vec<&'static str>,
    }

    impl Walls {
        fn new(consumes: &[bool]) -> Self {
            Self {
                shields: consumes
                    .iter()
                    .enumerate()
                    .map(|(i, &consumes)| Wall {
                        id: ShieldId(i as u32 + 1),
                        consumes,
                        hits: Vec::new(),
                    })
                    .collect(),
                impact: Vec2::new(5.5, 0.0),
                fail: false,
                queries: Vec::new(),
            }
        }

        fn run(&mut self, at: Vec2, on_hit: &mut OnHit<'_>) -> Result<bool, RegistryError> {
            if self.fail {
                return Err(RegistryError::MapInTransition(MapId(7)));
            }
            for shield in &mut self.shields {
                if on_hit(shield, at) {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }

    impl ShieldRegistry for Walls {
        fn try_impact_point(
            &mut self,
            _map: MapId,
            point: Vec2,
            _origin: Vec2,
            _destination: Vec2,
            on_hit: &mut OnHit<'_>,
        ) -> Result<bool, RegistryError> {
            self.queries.push("point");
            self.run(point, on_hit)
        }

        fn try_impact_ray(
            &mut self,
            _map: MapId,
            _origin_hint: Vec3,
            _ray: Ray2,
            _travel_budget: f32,
            on_hit: &mut OnHit<'_>,
        ) -> Result<bool, RegistryError> {
            self.queries.push("ray");
            let impact = self.impact;
            self.run(impact, on_hit)
        }
    }

    fn enabled() -> InterceptionConfig {
        InterceptionConfig::probe(&HostBindings::native())
    }

    #[test]
    fn test_explosive_sequence_reposition_detonate_destroy() {
        let mut projectile = Recorder::new(false, true);
        let mut walls = Walls::new(&[true]);

        let verdict = pre_tick(&enabled(), MapId(7), &mut projectile, &mut walls);

        assert_eq!(verdict, TickVerdict::Suppress);
        assert_eq!(
            projectile.calls(),
            vec![
                Call::SetPosition(Vec3::new(5.5, 2.0, 0.0)),
                Call::Detonate(MapId(7)),
                Call::Destroy,
            ]
        );
        assert_eq!(walls.shields[0].hits, vec![(20.0, Vec2::new(5.5, 0.0))]);
    }

    #[test]
    fn test_inert_ground_fire_is_only_destroyed() {
        let mut projectile = Recorder::new(false, false);
        let mut walls = Walls::new(&[true]);

        let outcome = intercept(&enabled(), MapId(7), &mut projectile, &mut walls);

        assert_eq!(
            outcome,
            Some(Outcome::Blocked {
                shield: ShieldId(1),
                impact: Vec2::new(5.5, 0.0)
            })
        );
        assert_eq!(projectile.calls(), vec![Call::Destroy]);
    }

    #[test]
    fn test_lobbed_fire_issues_point_query_and_damages_at_position() {
        let mut projectile = Recorder::new(true, true);
        let mut walls = Walls::new(&[true]);

        let verdict = pre_tick(&enabled(), MapId(7), &mut projectile, &mut walls);

        assert_eq!(verdict, TickVerdict::Suppress);
        assert_eq!(walls.queries, vec!["point"]);
        // Halfway along (0,0) -> (10,0); lobbed fire never detonates on a shield.
        assert_eq!(walls.shields[0].hits, vec![(20.0, Vec2::new(5.0, 0.0))]);
        assert_eq!(projectile.calls(), vec![Call::Destroy]);
    }

    #[test]
    fn test_ground_fire_issues_exactly_one_ray_query() {
        let mut projectile = Recorder::new(false, false);
        let mut walls = Walls::new(&[]);
        pre_tick(&enabled(), MapId(7), &mut projectile, &mut walls);
        assert_eq!(walls.queries, vec!["ray"]);
    }

    #[test]
    fn test_no_shields_allows_default_flight() {
        let mut projectile = Recorder::new(false, true);
        let mut walls = Walls::new(&[]);

        let verdict = pre_tick(&enabled(), MapId(7), &mut projectile, &mut walls);

        assert_eq!(verdict, TickVerdict::Allow);
        assert!(projectile.calls().is_empty());
    }

    #[test]
    fn test_declined_hit_has_no_side_effects() {
        let mut projectile = Recorder::new(false, true);
        let mut walls = Walls::new(&[false]);

        let verdict = pre_tick(&enabled(), MapId(7), &mut projectile, &mut walls);

        assert_eq!(verdict, TickVerdict::Allow);
        assert_eq!(walls.shields[0].hits.len(), 1);
        assert!(projectile.calls().is_empty());
    }

    #[test]
    fn test_first_consumer_only_is_damaged() {
        let mut projectile = Recorder::new(false, false);
        let mut walls = Walls::new(&[true, true]);

        pre_tick(&enabled(), MapId(7), &mut projectile, &mut walls);

        assert_eq!(walls.shields[0].hits.len(), 1);
        assert!(walls.shields[1].hits.is_empty());
    }

    #[test]
    fn test_registry_failure_allows_flight() {
        let mut projectile = Recorder::new(false, true);
        let mut walls = Walls::new(&[true]);
        walls.fail = true;

        let outcome = intercept(&enabled(), MapId(7), &mut projectile, &mut walls);

        assert_eq!(outcome, Some(Outcome::Indeterminate));
        assert_eq!(
            pre_tick(&enabled(), MapId(7), &mut projectile, &mut walls),
            TickVerdict::Allow
        );
        assert!(projectile.calls().is_empty());
    }

    #[test]
    fn test_disabled_hook_is_pass_through() {
        let mut projectile = Recorder::new(false, true);
        let mut walls = Walls::new(&[true]);

        let outcome = intercept(&InterceptionConfig::disabled(), MapId(7), &mut projectile, &mut walls);

        assert_eq!(outcome, None);
        assert!(walls.queries.is_empty());
        assert!(walls.shields[0].hits.is_empty());
    }

    #[test]
    fn test_partial_bindings_disable_hook() {
        let config = InterceptionConfig::probe(
            &HostBindings::native().without(shieldwall_core::enums::Capability::Detonate),
        );
        let mut projectile = Recorder::new(false, false);
        let mut walls = Walls::new(&[true]);

        assert_eq!(
            pre_tick(&config, MapId(7), &mut projectile, &mut walls),
            TickVerdict::Allow
        );
        assert!(walls.queries.is_empty());
    }
}
