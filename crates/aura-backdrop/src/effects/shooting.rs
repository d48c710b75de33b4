//! Shooting-star emitter (dark theme)
//!
//! Spawns a streak at a random interval, removes it once its animation
//! finishes, and reschedules itself. The whole chain runs as one-shot
//! timers owned by the layer name, so tearing the layer down severs the
//! chain in the same sweep that unmounts the node.

use aura_theme::ThemeMode;

use crate::scheduler::{FrameHandle, TimerFn};
use crate::stage::{LayerNode, Particle, Stage};

use super::{BackdropSettings, DecorativeLayer, LayerResources, anims, hash_random, names};

#[derive(Debug, Clone, Copy)]
struct SpawnParams {
    seed: u64,
    min_interval: f32,
    max_interval: f32,
}

impl SpawnParams {
    fn next_interval(&self, iter: u64) -> f32 {
        let r = hash_random(self.seed, iter * 16 + 15);
        self.min_interval + r * (self.max_interval - self.min_interval)
    }
}

/// Self-rescheduling streak emitter
pub struct ShootingStars {
    params: SpawnParams,
}

impl ShootingStars {
    pub fn new(settings: &BackdropSettings) -> Self {
        Self {
            params: SpawnParams {
                seed: settings.seed ^ 0x5005,
                min_interval: settings.shoot_min,
                max_interval: settings.shoot_max,
            },
        }
    }
}

/// One link of the spawn chain
///
/// Spawns a streak, schedules its removal after the streak's own
/// duration, then schedules the next link. Everything lands under the
/// layer-name owner.
fn spawn_link<S: Stage>(params: SpawnParams, iter: u64) -> TimerFn<S> {
    Box::new(move |stage, req| {
        let r = |k: u64| hash_random(params.seed, iter * 16 + k);

        let duration = 1.0 + r(0) * 2.0;
        let streak = Particle {
            x: r(1) * 100.0,
            y: r(2) * 50.0,
            // Streak length doubles as the size field
            size: 40.0 + r(3) * 80.0,
            opacity: 1.0,
            duration,
            animation: Some(anims::SHOOTING_STAR),
            ..Particle::default()
        };

        if let Some(id) = stage.spawn_transient(names::SHOOTING_STARS, streak) {
            req.schedule(names::SHOOTING_STARS, duration, move |stage: &mut S, _| {
                stage.remove_transient(names::SHOOTING_STARS, id);
            });
        }

        req.schedule_boxed(
            names::SHOOTING_STARS,
            params.next_interval(iter),
            spawn_link(params, iter + 1),
        );
    })
}

impl<S: Stage> DecorativeLayer<S> for ShootingStars {
    fn name(&self) -> &'static str {
        names::SHOOTING_STARS
    }

    fn mode(&self) -> ThemeMode {
        ThemeMode::Dark
    }

    fn mount(
        self: Box<Self>,
        stage: &mut S,
        res: &mut LayerResources<'_, S>,
    ) -> Vec<FrameHandle> {
        stage.ensure_animation(anims::SHOOTING_STAR);
        stage.mount_layer(LayerNode {
            name: names::SHOOTING_STARS,
            opacity: 0.9,
            particles: Vec::new(),
        });

        let params = self.params;
        res.timers.schedule_boxed(
            names::SHOOTING_STARS,
            params.next_interval(0),
            spawn_link(params, 1),
        );
        Vec::new()
    }
}
