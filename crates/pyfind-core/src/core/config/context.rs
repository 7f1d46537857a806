use std::sync::Arc;

use crate::config::Config;
use crate::discovery::DiscoveryOptions;
use crate::effects::{Effects, SharedEffects, SystemEffects};

pub struct CommandContext {
    config: Config,
    effects: SharedEffects,
}

impl CommandContext {
    /// Creates a context backed by the real host, configured from the
    /// process environment.
    #[must_use]
    pub fn new() -> Self {
        let config = Config::from_env();
        let effects: SharedEffects = Arc::new(SystemEffects::new(config.discovery()));
        Self::with_effects(config, effects)
    }

    #[must_use]
    pub fn with_effects(config: Config, effects: SharedEffects) -> Self {
        Self { config, effects }
    }

    pub fn effects(&self) -> &dyn Effects {
        self.effects.as_ref()
    }

    /// Discovery options for this command; the host interpreter is only
    /// probed when nothing more specific was requested.
    pub fn discovery_options(&self, explicit: Option<&str>) -> DiscoveryOptions {
        DiscoveryOptions::resolve(explicit, self.config.discovery(), || {
            self.effects
                .prober()
                .current()
                .map(|info| info.executable.display().to_string())
        })
    }

    /// Like [`Self::discovery_options`], but never runs the host interpreter;
    /// an unspecified request falls back to the generic default.
    pub fn request_without_probe(&self, explicit: Option<&str>) -> DiscoveryOptions {
        DiscoveryOptions::resolve(explicit, self.config.discovery(), || None)
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new()
    }
}
