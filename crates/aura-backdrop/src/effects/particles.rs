//! Keyframe-driven glow particle layers
//!
//! Floating glow particles (light theme) and energy orbs (dark theme).
//! Both generate their descriptors once at mount; the host plays the
//! shared keyframe animations, so no scheduler work is needed after
//! mounting.

use aura_theme::ThemeMode;

use crate::scheduler::FrameHandle;
use crate::stage::{LayerNode, Particle, Stage};

use super::{BackdropSettings, DecorativeLayer, LayerResources, anims, hash_random, names};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Variant {
    Floating,
    Energy,
}

/// A glow particle layer in one of its two variants
pub struct GlowParticles {
    variant: Variant,
    count: usize,
    seed: u64,
}

impl GlowParticles {
    /// Floating particles that rise from below the viewport (light theme)
    pub fn floating(settings: &BackdropSettings) -> Self {
        Self {
            variant: Variant::Floating,
            count: settings.floating_count,
            seed: settings.seed,
        }
    }

    /// Energy orbs scattered across the viewport (dark theme)
    pub fn energy(settings: &BackdropSettings) -> Self {
        Self {
            variant: Variant::Energy,
            count: settings.energy_count,
            seed: settings.seed ^ 0xe0e0,
        }
    }

    fn generate(&self) -> Vec<Particle> {
        let mut particles = Vec::with_capacity(self.count);
        for i in 0..self.count {
            let r = |k: u64| hash_random(self.seed, i as u64 * 8 + k);
            let particle = match self.variant {
                Variant::Floating => Particle {
                    x: r(0) * 100.0,
                    // Starts below the viewport, the keyframes carry it up
                    y: 100.0,
                    size: 2.0 + r(1) * 6.0,
                    opacity: 1.0,
                    duration: 15.0 + r(2) * 20.0,
                    delay: r(3) * 10.0,
                    animation: Some(anims::FLOAT_LIGHT[i % 3]),
                    blur: 1.0,
                    ..Particle::default()
                },
                Variant::Energy => Particle {
                    x: r(0) * 100.0,
                    y: r(1) * 100.0,
                    size: 3.0 + r(2) * 8.0,
                    opacity: 1.0,
                    duration: 10.0 + r(3) * 15.0,
                    delay: r(4) * 5.0,
                    animation: Some(anims::ENERGY_FLOAT),
                    blur: 0.0,
                    ..Particle::default()
                },
            };
            particles.push(particle);
        }
        particles
    }
}

impl<S: Stage> DecorativeLayer<S> for GlowParticles {
    fn name(&self) -> &'static str {
        match self.variant {
            Variant::Floating => names::FLOATING_PARTICLES,
            Variant::Energy => names::ENERGY_PARTICLES,
        }
    }

    fn mode(&self) -> ThemeMode {
        match self.variant {
            Variant::Floating => ThemeMode::Light,
            Variant::Energy => ThemeMode::Dark,
        }
    }

    fn mount(
        self: Box<Self>,
        stage: &mut S,
        _res: &mut LayerResources<'_, S>,
    ) -> Vec<FrameHandle> {
        let (name, opacity) = match self.variant {
            Variant::Floating => {
                for anim in anims::FLOAT_LIGHT {
                    stage.ensure_animation(anim);
                }
                (names::FLOATING_PARTICLES, 0.6)
            }
            Variant::Energy => {
                stage.ensure_animation(anims::ENERGY_FLOAT);
                (names::ENERGY_PARTICLES, 0.7)
            }
        };

        stage.mount_layer(LayerNode {
            name,
            opacity,
            particles: self.generate(),
        });
        Vec::new()
    }
}
