//! Scenario definitions: hardcoded shield layouts and fire schedules.

use std::f32::consts::{FRAC_PI_3, PI};

use glam::Vec2;

use shieldwall_core::commands::SimCommand;
use shieldwall_core::components::{Explosive, ProjectileDef, ShieldArc, ShieldSpec};
use shieldwall_core::constants::TICK_RATE;
use shieldwall_core::enums::ScenarioId;
use shieldwall_core::types::MapId;

use crate::systems::schedule::{FireSchedule, ScheduleEntry};
use crate::world_setup::VolleySpec;

/// Map every built-in scenario plays on.
pub const HOME_MAP: MapId = MapId(0);

/// Shields to raise plus the fire schedule.
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    pub shields: Vec<(MapId, ShieldSpec)>,
    pub schedule: FireSchedule,
}

pub fn build(scenario: ScenarioId) -> Scenario {
    match scenario {
        ScenarioId::Skirmish => build_skirmish(),
        ScenarioId::Siege => build_siege(),
        ScenarioId::Breach => build_breach(),
    }
}

/// Skirmish: a single shield at the origin.
/// Two rifle volleys from the east cross it; a mortar salvo lobs onto it.
fn build_skirmish() -> Scenario {
    Scenario {
        shields: vec![(HOME_MAP, ShieldSpec::default())],
        schedule: FireSchedule {
            entries: vec![
                ScheduleEntry::volley(0, rifle_volley(Vec2::new(40.0, 0.0), 6)),
                ScheduleEntry::volley(secs_to_ticks(2.0), rifle_volley(Vec2::new(35.0, 10.0), 6)),
                ScheduleEntry::volley(secs_to_ticks(3.0), mortar_salvo(Vec2::new(60.0, -20.0), 4)),
            ],
        },
    }
}

/// Siege: two overlapping shields and a directional wall facing north.
/// Explosive fire from the east and north, mortars from the south.
fn build_siege() -> Scenario {
    let wall = ShieldSpec {
        center: Vec2::new(0.0, 14.0),
        radius: 6.0,
        arc: Some(ShieldArc {
            facing: PI / 2.0,
            half_width: FRAC_PI_3,
        }),
        blocks_overhead: false,
        ..Default::default()
    };
    Scenario {
        shields: vec![
            (HOME_MAP, ShieldSpec::default()),
            (
                HOME_MAP,
                ShieldSpec {
                    center: Vec2::new(6.0, 0.0),
                    ..Default::default()
                },
            ),
            (HOME_MAP, wall),
        ],
        schedule: FireSchedule {
            entries: vec![
                ScheduleEntry::volley(0, rocket_volley(Vec2::new(50.0, 0.0), Vec2::ZERO, 8)),
                ScheduleEntry::volley(
                    secs_to_ticks(1.5),
                    rocket_volley(Vec2::new(0.0, 60.0), Vec2::new(0.0, 2.0), 8),
                ),
                ScheduleEntry::volley(secs_to_ticks(3.0), mortar_salvo(Vec2::new(0.0, -70.0), 6)),
                ScheduleEntry::volley(
                    secs_to_ticks(4.5),
                    rocket_volley(Vec2::new(-50.0, 5.0), Vec2::new(3.0, 0.0), 8),
                ),
            ],
        },
    }
}

/// Breach: a thin shield is worn down by sustained fire, then the map is torn
/// down mid-volley and every query on it is let through until restored.
fn build_breach() -> Scenario {
    let thin = ShieldSpec {
        max_energy: 60.0,
        recharge_per_tick: 0.1,
        ..Default::default()
    };
    Scenario {
        shields: vec![(HOME_MAP, thin)],
        schedule: FireSchedule {
            entries: vec![
                ScheduleEntry::volley(0, rifle_volley(Vec2::new(40.0, 0.0), 10)),
                ScheduleEntry::volley(secs_to_ticks(2.0), rifle_volley(Vec2::new(-40.0, 0.0), 10)),
                ScheduleEntry::command(
                    secs_to_ticks(4.0),
                    SimCommand::TearDownMap { map: HOME_MAP },
                ),
                ScheduleEntry::volley(secs_to_ticks(4.0), rifle_volley(Vec2::new(0.0, 40.0), 6)),
                ScheduleEntry::command(secs_to_ticks(6.0), SimCommand::RestoreMap { map: HOME_MAP }),
            ],
        },
    }
}

/// Straight-line inert fire across the origin.
fn rifle_volley(source: Vec2, count: u32) -> VolleySpec {
    VolleySpec {
        map: HOME_MAP,
        count,
        source,
        source_spread: 2.0,
        target: -source,
        target_spread: 3.0,
        flight_ticks: 60,
        ..Default::default()
    }
}

/// Straight-line explosive fire.
fn rocket_volley(source: Vec2, target: Vec2, count: u32) -> VolleySpec {
    VolleySpec {
        map: HOME_MAP,
        count,
        source,
        source_spread: 3.0,
        target,
        target_spread: 2.0,
        flight_ticks: 75,
        def: ProjectileDef {
            damage_amount_base: 30.0,
            ..Default::default()
        },
        explosive: Some(Explosive {
            radius: 2.5,
            damage: 45.0,
        }),
    }
}

/// Lobbed explosive fire landing near the origin.
fn mortar_salvo(source: Vec2, count: u32) -> VolleySpec {
    VolleySpec {
        map: HOME_MAP,
        count,
        source,
        source_spread: 1.0,
        target: Vec2::ZERO,
        target_spread: 4.0,
        flight_ticks: 120,
        def: ProjectileDef {
            fly_overhead: true,
            damage_amount_base: 40.0,
            ..Default::default()
        },
        explosive: Some(Explosive {
            radius: 3.0,
            damage: 60.0,
        }),
    }
}

fn secs_to_ticks(secs: f64) -> u64 {
    (secs * TICK_RATE as f64).round() as u64
}
