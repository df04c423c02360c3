//! Startup capability probe.
//!
//! Interception activates only if the host resolved every binding it needs.
//! The probe runs once and its result is injected into the per-tick hook.

use std::collections::BTreeSet;

use tracing::{error, info};

use shieldwall_core::enums::Capability;

/// Bindings a host managed to resolve against its projectile types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostBindings {
    resolved: BTreeSet<Capability>,
}

impl HostBindings {
    /// Bindings of the built-in engine, which implements every port natively.
    pub fn native() -> Self {
        Self::from_resolved(Capability::REQUIRED)
    }

    pub fn from_resolved(resolved: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            resolved: resolved.into_iter().collect(),
        }
    }

    /// Drop a binding, e.g. when a host build lacks it.
    pub fn without(mut self, capability: Capability) -> Self {
        self.resolved.remove(&capability);
        self
    }

    pub fn resolves(&self, capability: Capability) -> bool {
        self.resolved.contains(&capability)
    }

    /// Required capabilities this host did not resolve, in declaration order.
    pub fn missing(&self) -> Vec<Capability> {
        Capability::REQUIRED
            .into_iter()
            .filter(|capability| !self.resolves(*capability))
            .collect()
    }
}

/// Process-wide interception switch, decided once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterceptionConfig {
    enabled: bool,
}

impl InterceptionConfig {
    /// Probe the host bindings. Any missing capability disables interception
    /// entirely; each one is logged once.
    pub fn probe(bindings: &HostBindings) -> Self {
        let missing = bindings.missing();
        for capability in &missing {
            error!(
                binding = capability.binding_name(),
                "projectile interception capability unresolved"
            );
        }

        let enabled = missing.is_empty();
        if enabled {
            info!("projectile interception enabled");
        } else {
            info!(
                missing = missing.len(),
                "projectile interception disabled due to unresolved bindings"
            );
        }
        Self { enabled }
    }

    /// Interception switched off regardless of bindings.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_bindings_enable_interception() {
        assert!(HostBindings::native().missing().is_empty());
        assert!(InterceptionConfig::probe(&HostBindings::native()).is_enabled());
    }

    #[test]
    fn test_single_missing_binding_disables_everything() {
        for capability in Capability::REQUIRED {
            let bindings = HostBindings::native().without(capability);
            assert_eq!(bindings.missing(), vec![capability]);
            assert!(!InterceptionConfig::probe(&bindings).is_enabled());
        }
    }

    #[test]
    fn test_no_bindings_reports_all_missing() {
        let bindings = HostBindings::default();
        assert_eq!(bindings.missing(), Capability::REQUIRED.to_vec());
        assert!(!InterceptionConfig::probe(&bindings).is_enabled());
    }

    #[test]
    fn test_disabled_config() {
        assert!(!InterceptionConfig::disabled().is_enabled());
    }
}
