//! Shield upkeep: recharge and energy-state events.

use shieldwall_core::events::SimEvent;

use crate::ports::Shield;
use crate::registry::{ShieldManager, ShieldTransition};

/// Add one tick of recharge to every shield.
pub fn recharge(registry: &mut ShieldManager) {
    for shield in registry.shields_mut() {
        if shield.recharge() {
            tracing::debug!(shield = shield.id().0, "shield back online");
        }
    }
}

/// Turn pending collapse/restore transitions into events.
pub fn drain_transitions(registry: &mut ShieldManager, events: &mut Vec<SimEvent>) {
    for shield in registry.shields_mut() {
        let Some(transition) = shield.take_transition() else {
            continue;
        };
        let (map, id) = (shield.map(), shield.id());
        events.push(match transition {
            ShieldTransition::Collapsed => SimEvent::ShieldCollapsed { map, shield: id },
            ShieldTransition::Restored => SimEvent::ShieldRestored { map, shield: id },
        });
    }
}
