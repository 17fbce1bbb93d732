//! Options methods for VectorGridEngine

use std::path::Path;

use super::VectorGridEngine;
use crate::culling::VectorGeometry;
use crate::frame::DynamicColorFn;
use crate::options::Options;
use crate::pulse::PulseListener;

impl VectorGridEngine {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options. Takes effect on the next tick.
    ///
    /// Grid changes mark the layout stale; a different animation kind
    /// discards every item's strategy state and seeds the new kind's.
    pub fn set_options(&mut self, new: Options) {
        let old = std::mem::replace(&mut self.options, new);

        if old.grid != self.options.grid {
            self.layout_stale = true;
        }
        if old.animation.seed != self.options.animation.seed {
            self.runtime.reseed(self.options.animation.seed);
        }
        self.apply_options();

        if !old.animation.kind.same_strategy(&self.options.animation.kind) {
            log::info!(
                "animation kind {} -> {}",
                old.animation.kind.tag(),
                self.options.animation.kind.tag()
            );
            self.reset_animation_states();
        }
    }

    /// Push current option values to the subsystems.
    fn apply_options(&mut self) {
        self.pulses.set_options(self.options.animation.pulse.clone());
        self.culling.set_options(self.options.culling.clone());
        self.colors.set_mode(self.options.vector.color.clone());
        self.geometry = VectorGeometry::from_options(&self.options.vector);
        self.sync_continuous_pulses();
    }

    /// Install a per-entity color callback, or remove it with `None`.
    pub fn set_dynamic_color(&mut self, dynamic: Option<DynamicColorFn>) {
        self.colors.set_dynamic(dynamic);
    }

    /// Register a callback for pulse completion events. While one is
    /// installed, events go to it instead of the polling buffer.
    pub fn set_pulse_listener(&mut self, listener: Option<PulseListener>) {
        self.pulses.set_listener(listener);
    }

    /// Name of the last loaded or saved preset.
    #[must_use]
    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }

    /// Load a named preset from `presets_dir`.
    /// Returns true on success.
    pub fn load_preset(&mut self, name: &str, presets_dir: &Path) -> bool {
        let path = presets_dir.join(format!("{name}.toml"));
        match Options::load(&path) {
            Ok(opts) => {
                log::info!("Loaded preset '{name}'");
                self.set_options(opts);
                self.active_preset = Some(name.to_owned());
                true
            }
            Err(e) => {
                log::warn!("Failed to load preset '{name}': {e}");
                false
            }
        }
    }

    /// Save the current options as a named preset.
    /// Returns true on success.
    pub fn save_preset(&mut self, name: &str, presets_dir: &Path) -> bool {
        let path = presets_dir.join(format!("{name}.toml"));
        match self.options.save(&path) {
            Ok(()) => {
                log::info!("Saved preset '{name}'");
                self.active_preset = Some(name.to_owned());
                true
            }
            Err(e) => {
                log::error!("Failed to save preset '{name}': {e}");
                false
            }
        }
    }

    /// Toggle the pause flag. Returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        let paused = !self.options.animation.paused;
        self.options.animation.paused = paused;
        log::debug!("animation {}", if paused { "paused" } else { "resumed" });
        paused
    }
}
