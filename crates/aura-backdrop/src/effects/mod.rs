//! Decorative layer effects
//!
//! Each effect builds one named overlay layer for a theme mode: static
//! gradient washes, keyframe-driven particle fields, a scheduler-driven
//! star field, and a timer-driven shooting-star emitter. The
//! [`LayerManager`] owns the schedulers and guarantees that destroying a
//! layer stops its frame tasks and cancels its timers together.

pub mod clouds;
pub mod shooting;
pub mod starfield;
pub mod wash;

mod particles;

pub use clouds::CloudBank;
pub use particles::GlowParticles;
pub use shooting::ShootingStars;
pub use starfield::StarField;
pub use wash::BackgroundWash;

use aura_config::Config;
use aura_theme::ThemeMode;

use crate::scheduler::{FrameHandle, FrameScheduler, TimerScheduler};
use crate::stage::Stage;

/// Layer names, matching the node ids the original skin used
pub mod names {
    pub const LIGHT_BACKGROUND: &str = "light-background";
    pub const FLOATING_PARTICLES: &str = "floating-particles";
    pub const FLOATING_CLOUDS: &str = "floating-clouds";
    pub const DARK_BACKGROUND: &str = "dark-background";
    pub const STAR_FIELD: &str = "star-field";
    pub const SHOOTING_STARS: &str = "shooting-stars";
    pub const ENERGY_PARTICLES: &str = "energy-particles";
}

/// Shared keyframe animation names
pub mod anims {
    pub const FLOAT_LIGHT: [&str; 3] = ["float-light", "float-light-2", "float-light-3"];
    pub const CLOUD_DRIFT: &str = "cloud-drift";
    pub const ENERGY_FLOAT: &str = "energy-float";
    pub const SHOOTING_STAR: &str = "shooting-star";
}

/// Hash-based pseudo-random number generator
///
/// Same seed and index always produce the same value, which keeps particle
/// generation reproducible in tests.
pub(crate) fn hash_random(seed: u64, index: u64) -> f32 {
    let mut x = index.wrapping_add(seed);
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51afd7ed558ccd);
    x ^= x >> 33;
    x = x.wrapping_mul(0xc4ceb9fe1a85ec53);
    x ^= x >> 33;
    ((x as f64) / (u64::MAX as f64)) as f32
}

/// Resolved effect parameters, derived from configuration
#[derive(Debug, Clone)]
pub struct BackdropSettings {
    /// Star count for the dark star field
    pub star_count: usize,
    /// Star fall-speed multiplier
    pub star_speed: f32,
    /// Whether stars oscillate opacity per frame
    pub twinkle: bool,
    /// Floating glow particle count (light)
    pub floating_count: usize,
    /// Drifting cloud count (light)
    pub cloud_count: usize,
    /// Energy orb count (dark)
    pub energy_count: usize,
    /// Minimum seconds between shooting-star spawns
    pub shoot_min: f32,
    /// Maximum seconds between shooting-star spawns
    pub shoot_max: f32,
    /// Body pulse duration in seconds
    pub pulse_secs: f32,
    /// Seed for reproducible particle generation
    pub seed: u64,
}

impl Default for BackdropSettings {
    fn default() -> Self {
        Self {
            star_count: 400,
            star_speed: 1.0,
            twinkle: true,
            floating_count: 30,
            cloud_count: 5,
            energy_count: 20,
            shoot_min: 3.0,
            shoot_max: 8.0,
            pulse_secs: 0.6,
            seed: 12345,
        }
    }
}

impl BackdropSettings {
    /// Resolve settings from a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        let (shoot_min, shoot_max) = config.shooting.interval_bounds();
        Self {
            star_count: config.starfield.density.star_count(),
            star_speed: config.starfield.speed.multiplier(),
            twinkle: config.starfield.twinkle,
            floating_count: config.particles.floating_count.min(500),
            cloud_count: config.particles.cloud_count.min(100),
            energy_count: config.particles.energy_count.min(500),
            shoot_min,
            shoot_max,
            pulse_secs: config.general.pulse_ms as f32 / 1000.0,
            seed: 12345,
        }
    }
}

/// Schedulers a layer may register against while mounting
pub struct LayerResources<'a, S> {
    pub frames: &'a mut FrameScheduler<S>,
    pub timers: &'a mut TimerScheduler<S>,
}

/// One buildable decorative layer
///
/// `mount` consumes the effect so continuously-animated layers can move
/// their particle state into the frame closure they register. Timers must
/// be scheduled under the layer's own name so teardown can sweep them.
pub trait DecorativeLayer<S: Stage> {
    /// Unique layer name
    fn name(&self) -> &'static str;

    /// Theme mode this layer belongs to
    fn mode(&self) -> ThemeMode;

    /// Mount the layer onto the stage, returning any frame tasks started
    fn mount(
        self: Box<Self>,
        stage: &mut S,
        res: &mut LayerResources<'_, S>,
    ) -> Vec<FrameHandle>;
}

/// The full layer set for a theme mode, in mount order
pub fn layers_for_mode<S: Stage>(
    mode: ThemeMode,
    settings: &BackdropSettings,
) -> Vec<Box<dyn DecorativeLayer<S>>> {
    match mode {
        ThemeMode::Light => vec![
            Box::new(BackgroundWash::new(ThemeMode::Light)),
            Box::new(GlowParticles::floating(settings)),
            Box::new(CloudBank::new(settings)),
        ],
        ThemeMode::Dark => vec![
            Box::new(BackgroundWash::new(ThemeMode::Dark)),
            Box::new(StarField::new(settings)),
            Box::new(ShootingStars::new(settings)),
            Box::new(GlowParticles::energy(settings)),
        ],
    }
}

struct ActiveLayer {
    name: &'static str,
    mode: ThemeMode,
    frame_handles: Vec<FrameHandle>,
}

/// Owns active layers and the schedulers that animate them
///
/// Building a layer whose name is already active destroys the old one
/// first, so at most one node per name ever exists. Destroying a layer
/// stops its frame tasks, cancels its timers, and unmounts its node as
/// one unit.
pub struct LayerManager<S: Stage> {
    frames: FrameScheduler<S>,
    timers: TimerScheduler<S>,
    active: Vec<ActiveLayer>,
}

impl<S: Stage> Default for LayerManager<S> {
    fn default() -> Self {
        Self {
            frames: FrameScheduler::new(),
            timers: TimerScheduler::new(),
            active: Vec::new(),
        }
    }
}

impl<S: Stage> LayerManager<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layer, replacing any active layer with the same name
    pub fn build(&mut self, stage: &mut S, layer: Box<dyn DecorativeLayer<S>>) {
        let name = layer.name();
        let mode = layer.mode();
        self.destroy(stage, name);

        log::debug!("Building layer '{}'", name);
        let mut res = LayerResources {
            frames: &mut self.frames,
            timers: &mut self.timers,
        };
        let frame_handles = layer.mount(stage, &mut res);
        self.active.push(ActiveLayer {
            name,
            mode,
            frame_handles,
        });
    }

    /// Destroy a layer and everything scheduled on its behalf
    pub fn destroy(&mut self, stage: &mut S, name: &str) -> bool {
        let Some(pos) = self.active.iter().position(|l| l.name == name) else {
            return false;
        };
        let layer = self.active.remove(pos);

        for handle in layer.frame_handles {
            self.frames.stop(handle);
        }
        let cancelled = self.timers.cancel_owner(layer.name);
        stage.unmount_layer(layer.name);
        log::debug!(
            "Destroyed layer '{}' ({} pending timers cancelled)",
            layer.name,
            cancelled
        );
        true
    }

    /// Destroy every active layer belonging to a theme mode
    pub fn teardown_mode(&mut self, stage: &mut S, mode: ThemeMode) -> usize {
        let doomed: Vec<&'static str> = self
            .active
            .iter()
            .filter(|l| l.mode == mode)
            .map(|l| l.name)
            .collect();
        for name in &doomed {
            self.destroy(stage, name);
        }
        doomed.len()
    }

    /// Whether a layer is currently active
    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|l| l.name == name)
    }

    /// Active layer names, in build order
    pub fn active_names(&self) -> Vec<&'static str> {
        self.active.iter().map(|l| l.name).collect()
    }

    /// Advance both schedulers by one tick
    pub fn tick(&mut self, stage: &mut S, dt: f32) {
        self.frames.tick(stage, dt);
        self.timers.tick(stage, dt);
    }

    /// Timer scheduler, for owner-keyed timers outside any layer
    pub fn timers(&mut self) -> &mut TimerScheduler<S> {
        &mut self.timers
    }

    /// Number of live frame tasks across all layers
    pub fn frame_task_count(&self) -> usize {
        self.frames.active_count()
    }

    /// Pending timers owned by a layer or label
    pub fn pending_timers(&self, owner: &str) -> usize {
        self.timers.owner_pending(owner)
    }
}
