//! Aura backdrop engine
//!
//! Theme-driven decorative layers for a chat surface: palette application,
//! per-mode particle layers, a cooperative animation scheduler, and the
//! controller that ties them to the host's theme signal.
//!
//! The engine never touches a real document; it drives any [`Stage`]
//! implementation the host supplies. [`mock::MemoryStage`] is the bundled
//! in-memory one, used by the tests and by headless runs.

pub mod controller;
pub mod effects;
pub mod mock;
pub mod scheduler;
pub mod signal;
pub mod stage;

pub use controller::{PULSE_OWNER, ThemeController};
pub use effects::{BackdropSettings, DecorativeLayer, LayerManager, LayerResources, layers_for_mode};
pub use scheduler::{FrameHandle, FrameScheduler, FrameTick, TimerHandle, TimerScheduler};
pub use signal::{ThemeSignal, ThemeSignalSource};
pub use stage::{LayerNode, NodeId, Particle, ParticleInstance, Stage};
