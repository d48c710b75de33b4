//! Theme controller
//!
//! Applies a theme to the stage as one transaction: palette tokens first,
//! then the opposite mode's layers come down, then the current mode's
//! layers go up, then the body pulse fires. Applying the mode that is
//! already showing is a no-op.

use aura_theme::{Palette, ThemeMode, ThemeState};

use crate::effects::{BackdropSettings, LayerManager, layers_for_mode};
use crate::signal::ThemeSignal;
use crate::stage::Stage;

/// Owner label for the body pulse clear timer
pub const PULSE_OWNER: &str = "theme-pulse";

/// Drives theme transitions against one stage
pub struct ThemeController<S: Stage> {
    state: ThemeState,
    default_mode: ThemeMode,
    settings: BackdropSettings,
    layers: LayerManager<S>,
    applied: bool,
}

impl<S: Stage> ThemeController<S> {
    pub fn new(settings: BackdropSettings, default_mode: ThemeMode) -> Self {
        Self {
            state: ThemeState::new(default_mode),
            default_mode,
            settings,
            layers: LayerManager::new(),
            applied: false,
        }
    }

    /// Currently selected theme mode
    pub fn mode(&self) -> ThemeMode {
        self.state.mode()
    }

    /// The layer manager, for inspection and direct layer work
    pub fn layers(&self) -> &LayerManager<S> {
        &self.layers
    }

    /// Apply a theme mode
    ///
    /// Repeating the current mode re-applies the palette and rebuilds the
    /// same layers; rebuilding replaces, so nothing accumulates. The first
    /// apply paints without a pulse, every later one pulses.
    pub fn apply(&mut self, stage: &mut S, mode: ThemeMode) {
        let first = !self.applied;
        self.state.transition(mode);
        self.applied = true;

        log::info!("Applying {} theme", mode.name());
        for (token, value) in Palette::for_mode(mode).entries() {
            stage.set_token(token, value);
        }

        self.layers.teardown_mode(stage, mode.opposite());
        for layer in layers_for_mode(mode, &self.settings) {
            self.layers.build(stage, layer);
        }

        if !first {
            self.pulse(stage);
        }
    }

    /// Apply the default mode, for startup before any host reading
    pub fn initialize(&mut self, stage: &mut S) {
        self.apply(stage, self.default_mode);
    }

    /// Drain the host signal and apply the latest reading, if any
    ///
    /// A reading of None means the host has no opinion; the configured
    /// default mode applies.
    pub fn drain_signal(&mut self, stage: &mut S, signal: &ThemeSignal) -> bool {
        match signal.drain() {
            Some(reading) => {
                let mode = reading.map(ThemeMode::from_dark).unwrap_or(self.default_mode);
                self.apply(stage, mode);
                true
            }
            None => false,
        }
    }

    /// Swap in new settings and rebuild the current layers, without a pulse
    pub fn reconfigure(&mut self, stage: &mut S, settings: BackdropSettings) {
        self.settings = settings;
        if !self.applied {
            return;
        }
        log::info!("Rebuilding layers for new settings");
        for layer in layers_for_mode(self.state.mode(), &self.settings) {
            self.layers.build(stage, layer);
        }
    }

    /// Advance animations and timers by one tick
    pub fn tick(&mut self, stage: &mut S, dt: f32) {
        self.layers.tick(stage, dt);
    }

    fn pulse(&mut self, stage: &mut S) {
        // Rapid toggles restart the pulse instead of stacking clears
        self.layers.timers().cancel_owner(PULSE_OWNER);
        stage.set_pulse(true);
        self.layers
            .timers()
            .schedule(PULSE_OWNER, self.settings.pulse_secs, |stage: &mut S, _| {
                stage.set_pulse(false);
            });
    }
}
