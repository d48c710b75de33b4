//! Drifting cloud layer (light theme)
//!
//! A few large blurred blobs that enter from off-screen left and drift
//! across on a shared keyframe animation.

use aura_theme::ThemeMode;

use crate::scheduler::FrameHandle;
use crate::stage::{LayerNode, Particle, Stage};

use super::{BackdropSettings, DecorativeLayer, LayerResources, anims, hash_random, names};

/// Slow horizontal cloud drift
pub struct CloudBank {
    count: usize,
    seed: u64,
}

impl CloudBank {
    pub fn new(settings: &BackdropSettings) -> Self {
        Self {
            count: settings.cloud_count,
            seed: settings.seed ^ 0xc10d,
        }
    }

    fn generate(&self) -> Vec<Particle> {
        let mut clouds = Vec::with_capacity(self.count);
        for i in 0..self.count {
            let r = |k: u64| hash_random(self.seed, i as u64 * 8 + k);
            clouds.push(Particle {
                // Off-screen left so the drift carries it in
                x: -(10.0 + r(0) * 10.0),
                y: r(1) * 80.0,
                size: 100.0 + r(2) * 150.0,
                opacity: 1.0,
                duration: 40.0 + r(3) * 30.0,
                delay: r(4) * 20.0,
                animation: Some(anims::CLOUD_DRIFT),
                blur: 2.0,
                ..Particle::default()
            });
        }
        clouds
    }
}

impl<S: Stage> DecorativeLayer<S> for CloudBank {
    fn name(&self) -> &'static str {
        names::FLOATING_CLOUDS
    }

    fn mode(&self) -> ThemeMode {
        ThemeMode::Light
    }

    fn mount(
        self: Box<Self>,
        stage: &mut S,
        _res: &mut LayerResources<'_, S>,
    ) -> Vec<FrameHandle> {
        stage.ensure_animation(anims::CLOUD_DRIFT);
        stage.mount_layer(LayerNode {
            name: names::FLOATING_CLOUDS,
            opacity: 0.3,
            particles: self.generate(),
        });
        Vec::new()
    }
}
