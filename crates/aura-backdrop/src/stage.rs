//! Stage trait abstractions for testing and host integration
//!
//! The stage is the injected host surface the engine decorates: it holds the
//! style-variable scope, the overlay layers, the shared animation registry,
//! and the body pulse marker. Implementing [`Stage`] is all a host needs to
//! do; the engine itself never reaches for ambient globals.

use aura_theme::Token;

/// Identifier for a transient node spawned into a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// A single decorative element descriptor
///
/// Position is in percent of the viewport; size in host pixels. Fields are
/// fixed once generated, except position and opacity for particles in
/// continuously-scheduled layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Horizontal position, percent of viewport width
    pub x: f32,
    /// Vertical position, percent of viewport height
    pub y: f32,
    /// Diameter in pixels
    pub size: f32,
    /// Opacity (0-1)
    pub opacity: f32,
    /// Vertical drift velocity, percent per time-unit (0 for keyframe layers)
    pub velocity: f32,
    /// Keyframe animation duration in seconds (0 for scheduled layers)
    pub duration: f32,
    /// Keyframe animation delay in seconds
    pub delay: f32,
    /// Shared keyframe animation this particle plays, if any
    pub animation: Option<&'static str>,
    /// Blur radius in pixels
    pub blur: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            size: 1.0,
            opacity: 1.0,
            velocity: 0.0,
            duration: 0.0,
            delay: 0.0,
            animation: None,
            blur: 0.0,
        }
    }
}

/// One named overlay of decorative elements, owned by a theme
#[derive(Debug, Clone, PartialEq)]
pub struct LayerNode {
    /// Unique layer name; at most one node per name exists at a time
    pub name: &'static str,
    /// Layer-wide opacity (0-1)
    pub opacity: f32,
    /// Generated particle descriptors
    pub particles: Vec<Particle>,
}

/// Per-frame position/opacity snapshot for one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleInstance {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
}

/// The injected host surface
///
/// All operations are best-effort: referring to a missing layer is a no-op,
/// never an error.
pub trait Stage {
    /// Write one palette token into the global style-variable scope
    fn set_token(&mut self, token: Token, value: &str);

    /// Insert an overlay layer node
    ///
    /// Callers guarantee any previous node with the same name was unmounted
    /// first; implementations may assert but must not accumulate duplicates.
    fn mount_layer(&mut self, layer: LayerNode);

    /// Remove a layer node; returns whether one existed
    fn unmount_layer(&mut self, name: &str) -> bool;

    /// Whether a layer node with this name is currently mounted
    fn has_layer(&self, name: &str) -> bool;

    /// Names of all mounted layers, in mount order
    fn layer_names(&self) -> Vec<&'static str>;

    /// Register a shared keyframe animation once
    ///
    /// Returns true when the registration was new, false when the name was
    /// already present (the guard against duplicate style registration).
    fn ensure_animation(&mut self, name: &'static str) -> bool;

    /// Sync per-frame particle positions/opacities for a scheduled layer
    fn update_particles(&mut self, layer: &str, instances: &[ParticleInstance]);

    /// Spawn a short-lived element into a layer; None if the layer is gone
    fn spawn_transient(&mut self, layer: &str, particle: Particle) -> Option<NodeId>;

    /// Remove a transient element; returns whether it was present
    fn remove_transient(&mut self, layer: &str, id: NodeId) -> bool;

    /// Toggle the document-body pulse marker
    fn set_pulse(&mut self, active: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_default_is_inert() {
        let p = Particle::default();
        assert_eq!(p.velocity, 0.0);
        assert_eq!(p.animation, None);
        assert_eq!(p.opacity, 1.0);
    }

    #[test]
    fn test_layer_node_holds_particles() {
        let layer = LayerNode {
            name: "star-field",
            opacity: 0.8,
            particles: vec![Particle::default(); 3],
        };
        assert_eq!(layer.particles.len(), 3);
        assert_eq!(layer.name, "star-field");
    }
}
