//! Fire schedule system: releases scripted actions at their tick.

use rand_chacha::ChaCha8Rng;

use shieldwall_core::commands::SimCommand;

use crate::world_setup::{volley_commands, VolleySpec};

/// What a schedule entry does when it comes due.
#[derive(Debug, Clone)]
pub enum ScheduledAction {
    Volley(VolleySpec),
    Command(SimCommand),
}

/// A single scheduled action.
#[derive(Debug, Clone)]
pub struct ScheduleEntry {
    /// Tick at which this entry fires.
    pub at_tick: u64,
    pub action: ScheduledAction,
    /// Whether this entry has already fired.
    pub fired: bool,
}

impl ScheduleEntry {
    pub fn volley(at_tick: u64, spec: VolleySpec) -> Self {
        Self {
            at_tick,
            action: ScheduledAction::Volley(spec),
            fired: false,
        }
    }

    pub fn command(at_tick: u64, command: SimCommand) -> Self {
        Self {
            at_tick,
            action: ScheduledAction::Command(command),
            fired: false,
        }
    }
}

/// The complete fire schedule for a scenario.
#[derive(Debug, Clone, Default)]
pub struct FireSchedule {
    pub entries: Vec<ScheduleEntry>,
}

impl FireSchedule {
    /// Total projectiles across all volleys.
    pub fn total_projectiles(&self) -> u32 {
        self.entries
            .iter()
            .filter_map(|entry| match &entry.action {
                ScheduledAction::Volley(spec) => Some(spec.count),
                ScheduledAction::Command(_) => None,
            })
            .sum()
    }

    /// Whether every entry has fired.
    pub fn is_exhausted(&self) -> bool {
        self.entries.iter().all(|entry| entry.fired)
    }
}

/// Collect the commands of every entry due at `current_tick`.
pub fn run(rng: &mut ChaCha8Rng, schedule: &mut FireSchedule, current_tick: u64) -> Vec<SimCommand> {
    let mut due = Vec::new();
    for entry in &mut schedule.entries {
        if entry.fired || current_tick < entry.at_tick {
            continue;
        }
        match &entry.action {
            ScheduledAction::Volley(spec) => due.extend(volley_commands(rng, spec)),
            ScheduledAction::Command(command) => due.push(command.clone()),
        }
        entry.fired = true;
    }
    due
}
