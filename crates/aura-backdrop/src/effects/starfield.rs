//! Continuously animated star field (dark theme)
//!
//! Unlike the keyframe layers, stars are driven per frame: each tick they
//! fall by their own velocity, twinkle their opacity, and wrap back above
//! the viewport once they pass the bottom. The star state moves into the
//! frame closure at mount; destroying the layer stops the task and drops
//! the state with it.

use aura_theme::ThemeMode;

use crate::scheduler::FrameHandle;
use crate::stage::{LayerNode, Particle, ParticleInstance, Stage};

use super::{BackdropSettings, DecorativeLayer, LayerResources, hash_random, names};

/// Percent of viewport height a velocity-1.0 star falls per second
const FALL_SCALE: f32 = 10.0;

#[derive(Debug, Clone)]
struct Star {
    x: f32,
    y: f32,
    size: f32,
    /// Fall velocity in velocity-units (0.1-0.6)
    velocity: f32,
    /// Current opacity, oscillated in place by the twinkle
    opacity: f32,
    /// Twinkle oscillation rate
    rate: f32,
    index: u64,
    wraps: u64,
}

/// Falling, twinkling star field
pub struct StarField {
    stars: Vec<Star>,
    speed: f32,
    twinkle: bool,
    seed: u64,
}

impl StarField {
    pub fn new(settings: &BackdropSettings) -> Self {
        let seed = settings.seed ^ 0x57a2;
        let mut stars = Vec::with_capacity(settings.star_count);
        for i in 0..settings.star_count {
            let r = |k: u64| hash_random(seed, i as u64 * 8 + k);
            stars.push(Star {
                x: r(0) * 100.0,
                y: r(1) * 100.0,
                size: 0.5 + r(2) * 2.0,
                velocity: 0.1 + r(3) * 0.5,
                opacity: 0.2 + r(4) * 0.8,
                rate: 0.01 + r(5) * 0.02,
                index: i as u64,
                wraps: 0,
            });
        }
        Self {
            stars,
            speed: settings.star_speed,
            twinkle: settings.twinkle,
            seed,
        }
    }

    fn step(stars: &mut [Star], seed: u64, speed: f32, twinkle: bool, dt: f32, time: f32) {
        for star in stars.iter_mut() {
            star.y += star.velocity * speed * FALL_SCALE * dt;

            if twinkle {
                star.opacity += (time * 1000.0 * star.rate).sin() * 0.1;
            }
            star.opacity = star.opacity.clamp(0.1, 1.0);

            if star.y > 100.0 {
                star.wraps += 1;
                star.y = -0.5;
                star.x = hash_random(seed, star.index * 1000 + star.wraps) * 100.0;
            }
        }
    }

    fn snapshot(stars: &[Star]) -> Vec<ParticleInstance> {
        stars
            .iter()
            .map(|s| ParticleInstance {
                x: s.x,
                y: s.y,
                size: s.size,
                opacity: s.opacity,
            })
            .collect()
    }
}

impl<S: Stage> DecorativeLayer<S> for StarField {
    fn name(&self) -> &'static str {
        names::STAR_FIELD
    }

    fn mode(&self) -> ThemeMode {
        ThemeMode::Dark
    }

    fn mount(
        self: Box<Self>,
        stage: &mut S,
        res: &mut LayerResources<'_, S>,
    ) -> Vec<FrameHandle> {
        let particles = self
            .stars
            .iter()
            .map(|s| Particle {
                x: s.x,
                y: s.y,
                size: s.size,
                opacity: s.opacity,
                velocity: s.velocity,
                ..Particle::default()
            })
            .collect();
        stage.mount_layer(LayerNode {
            name: names::STAR_FIELD,
            opacity: 0.8,
            particles,
        });

        let StarField {
            mut stars,
            speed,
            twinkle,
            seed,
        } = *self;
        let handle = res.frames.start(move |stage: &mut S, tick| {
            Self::step(&mut stars, seed, speed, twinkle, tick.dt, tick.time);
            stage.update_particles(names::STAR_FIELD, &Self::snapshot(&stars));
        });
        vec![handle]
    }
}
