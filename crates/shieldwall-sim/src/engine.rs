//! Simulation engine: the reference host for the interception hook.
//!
//! `SimulationEngine` owns the hecs world and the shield registry, processes
//! commands, runs all systems in a fixed order, and produces `SimSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use shieldwall_core::commands::SimCommand;
use shieldwall_core::components::Projectile;
use shieldwall_core::enums::SimPhase;
use shieldwall_core::events::SimEvent;
use shieldwall_core::state::{SimSnapshot, TallyView};
use shieldwall_core::types::SimTime;

use crate::capabilities::{HostBindings, InterceptionConfig};
use crate::config::SimConfig;
use crate::registry::ShieldManager;
use crate::scenario;
use crate::systems;
use crate::systems::schedule::FireSchedule;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    shields: ShieldManager,
    interception: InterceptionConfig,
    recharge_enabled: bool,
    time: SimTime,
    phase: SimPhase,
    rng: ChaCha8Rng,
    schedule: FireSchedule,
    command_queue: VecDeque<SimCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SimEvent>,
    tally: TallyView,
}

impl SimulationEngine {
    /// Create an engine bound natively to every capability.
    pub fn new(config: SimConfig) -> Self {
        Self::with_bindings(config, &HostBindings::native())
    }

    /// Create an engine for a host that resolved only `bindings`.
    pub fn with_bindings(config: SimConfig, bindings: &HostBindings) -> Self {
        let interception = if config.interception_enabled {
            InterceptionConfig::probe(bindings)
        } else {
            info!("projectile interception disabled by configuration");
            InterceptionConfig::disabled()
        };

        Self {
            world: World::new(),
            shields: ShieldManager::new(),
            interception,
            recharge_enabled: config.recharge_enabled,
            time: SimTime::default(),
            phase: SimPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            schedule: FireSchedule::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            tally: TallyView::default(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.process_commands();

        if self.phase == SimPhase::Running {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.shields,
            &self.time,
            self.phase,
            self.interception.is_enabled(),
            events,
            self.tally,
        )
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn interception(&self) -> InterceptionConfig {
        self.interception
    }

    pub fn tally(&self) -> TallyView {
        self.tally
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the shield registry.
    pub fn shields(&self) -> &ShieldManager {
        &self.shields
    }

    /// Whether the loaded schedule has fired and every projectile is gone.
    pub fn is_settled(&self) -> bool {
        self.schedule.is_exhausted()
            && self.command_queue.is_empty()
            && self.world.query::<&Projectile>().iter().next().is_none()
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::Launch {
                map,
                origin,
                destination,
                flight_ticks,
                def,
                explosive,
            } => {
                world_setup::spawn_projectile(
                    &mut self.world,
                    map,
                    origin,
                    destination,
                    flight_ticks,
                    def,
                    explosive,
                );
                self.tally.launched += 1;
            }
            SimCommand::RaiseShield { map, spec } => {
                self.shields.raise(map, spec);
            }
            SimCommand::SetShieldOnline { shield, online } => {
                if !self.shields.set_online(shield, online) {
                    warn!(shield = shield.0, "ignoring switch for unknown shield");
                }
            }
            SimCommand::TearDownMap { map } => self.shields.begin_teardown(map),
            SimCommand::RestoreMap { map } => self.shields.restore(map),
            SimCommand::LoadScenario { scenario } => {
                let scenario_def = scenario::build(scenario);
                for (map, spec) in scenario_def.shields {
                    self.shields.raise(map, spec);
                }
                info!(
                    ?scenario,
                    projectiles = scenario_def.schedule.total_projectiles(),
                    "scenario loaded"
                );
                self.schedule = scenario_def.schedule;
            }
            SimCommand::Pause => {
                if self.phase == SimPhase::Running {
                    self.phase = SimPhase::Paused;
                }
            }
            SimCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Running;
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Scheduled fire and scripted commands
        let due = systems::schedule::run(&mut self.rng, &mut self.schedule, self.time.tick);
        for command in due {
            self.handle_command(command);
        }
        // 2. Shield recharge
        if self.recharge_enabled {
            systems::shields::recharge(&mut self.shields);
        }
        // 3. Interception hook + default flight advance
        systems::flight::run(
            &mut self.world,
            &mut self.shields,
            &self.interception,
            &mut self.events,
            &mut self.tally,
            &mut self.despawn_buffer,
        );
        // 4. Shield collapse/restore events
        systems::shields::drain_transitions(&mut self.shields, &mut self.events);
        // 5. Cleanup (destroyed, landed)
        if !self.despawn_buffer.is_empty() {
            debug!(
                count = self.despawn_buffer.len(),
                tick = self.time.tick,
                "despawning projectiles"
            );
        }
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}
