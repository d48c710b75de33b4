//! Background wash layers
//!
//! The full-viewport gradient backdrop each theme sits on. Static: no
//! schedulers, just a handful of large blurred blobs behind everything
//! else.

use aura_theme::ThemeMode;

use crate::scheduler::FrameHandle;
use crate::stage::{LayerNode, Particle, Stage};

use super::{DecorativeLayer, LayerResources, names};

/// Static gradient backdrop for one theme mode
pub struct BackgroundWash {
    mode: ThemeMode,
}

impl BackgroundWash {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    fn blobs(&self) -> Vec<Particle> {
        // Three soft accents at fixed positions; the host paints the base
        // gradient from the palette tokens
        let spots: [(f32, f32, f32); 3] = match self.mode {
            ThemeMode::Light => [(15.0, 20.0, 300.0), (75.0, 10.0, 380.0), (50.0, 70.0, 260.0)],
            ThemeMode::Dark => [(20.0, 15.0, 340.0), (70.0, 60.0, 300.0), (40.0, 85.0, 220.0)],
        };

        spots
            .iter()
            .map(|&(x, y, size)| Particle {
                x,
                y,
                size,
                opacity: 0.4,
                blur: 80.0,
                ..Particle::default()
            })
            .collect()
    }
}

impl<S: Stage> DecorativeLayer<S> for BackgroundWash {
    fn name(&self) -> &'static str {
        match self.mode {
            ThemeMode::Light => names::LIGHT_BACKGROUND,
            ThemeMode::Dark => names::DARK_BACKGROUND,
        }
    }

    fn mode(&self) -> ThemeMode {
        self.mode
    }

    fn mount(
        self: Box<Self>,
        stage: &mut S,
        _res: &mut LayerResources<'_, S>,
    ) -> Vec<FrameHandle> {
        let name = match self.mode {
            ThemeMode::Light => names::LIGHT_BACKGROUND,
            ThemeMode::Dark => names::DARK_BACKGROUND,
        };
        stage.mount_layer(LayerNode {
            name,
            opacity: 1.0,
            particles: self.blobs(),
        });
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MemoryStage;
    use crate::scheduler::{FrameScheduler, TimerScheduler};

    fn mount(mode: ThemeMode) -> MemoryStage {
        let mut stage = MemoryStage::new();
        let mut frames = FrameScheduler::new();
        let mut timers = TimerScheduler::new();
        let mut res = LayerResources {
            frames: &mut frames,
            timers: &mut timers,
        };
        let handles = Box::new(BackgroundWash::new(mode)).mount(&mut stage, &mut res);
        assert!(handles.is_empty());
        assert_eq!(frames.active_count(), 0);
        stage
    }

    #[test]
    fn test_light_wash_mounts_named_layer() {
        let stage = mount(ThemeMode::Light);
        let layer = stage.layer(names::LIGHT_BACKGROUND).unwrap();
        assert_eq!(layer.node.opacity, 1.0);
        assert_eq!(layer.node.particles.len(), 3);
    }

    #[test]
    fn test_dark_wash_mounts_named_layer() {
        let stage = mount(ThemeMode::Dark);
        assert!(stage.has_layer(names::DARK_BACKGROUND));
        assert!(!stage.has_layer(names::LIGHT_BACKGROUND));
    }

    #[test]
    fn test_blobs_are_static() {
        let stage = mount(ThemeMode::Light);
        for p in &stage.layer(names::LIGHT_BACKGROUND).unwrap().node.particles {
            assert_eq!(p.velocity, 0.0);
            assert_eq!(p.animation, None);
            assert!(p.blur > 0.0);
        }
    }
}
