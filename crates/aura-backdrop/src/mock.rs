//! In-memory stage for testing and headless runs
//!
//! Provides a MemoryStage that implements [`Stage`] against an in-memory
//! document model and records all calls for test assertions, without
//! requiring a real host surface.

use std::collections::HashMap;

use aura_theme::Token;

use crate::stage::{LayerNode, NodeId, Particle, ParticleInstance, Stage};

/// Record of a stage call for test inspection
#[derive(Debug, Clone)]
pub enum StageCall {
    /// A palette token was written
    SetToken(Token, String),
    /// A layer node was mounted
    MountLayer(&'static str),
    /// A layer node was unmounted
    UnmountLayer(String),
    /// A keyframe animation registration was attempted
    EnsureAnimation {
        name: &'static str,
        was_new: bool,
    },
    /// Per-frame particle instances were synced for a layer
    UpdateParticles {
        layer: String,
        count: usize,
    },
    /// A transient element was spawned into a layer
    SpawnTransient(String, NodeId),
    /// A transient element was removed from a layer
    RemoveTransient(String, NodeId),
    /// The body pulse marker was toggled
    SetPulse(bool),
}

/// One mounted layer in the in-memory document
#[derive(Debug, Clone)]
pub struct MountedLayer {
    /// The node as mounted
    pub node: LayerNode,
    /// Live transient elements, in spawn order
    pub transients: Vec<(NodeId, Particle)>,
    /// Latest per-frame snapshot, if the layer is scheduler-driven
    pub instances: Vec<ParticleInstance>,
}

/// A stage that keeps the decorated document in memory
///
/// Doubles as the test stand-in and as the surface for headless demo runs:
/// every mutation is applied to the in-memory model and appended to a call
/// log that tests can inspect.
#[derive(Debug, Default)]
pub struct MemoryStage {
    /// All stage calls made, in order
    pub calls: Vec<StageCall>,
    layers: Vec<MountedLayer>,
    tokens: HashMap<Token, String>,
    animations: Vec<&'static str>,
    pulse: bool,
    next_node: u64,
}

impl MemoryStage {
    /// Create a new empty stage
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the call log without touching the document
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of recorded calls
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    // === Document inspection ===

    /// Current value of a palette token, if set
    pub fn token(&self, token: Token) -> Option<&str> {
        self.tokens.get(&token).map(String::as_str)
    }

    /// Number of tokens currently set
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// A mounted layer by name
    pub fn layer(&self, name: &str) -> Option<&MountedLayer> {
        self.layers.iter().find(|l| l.node.name == name)
    }

    /// Number of mounted layer nodes carrying this name (must stay <= 1)
    pub fn nodes_named(&self, name: &str) -> usize {
        self.layers.iter().filter(|l| l.node.name == name).count()
    }

    /// Registered keyframe animation names, in registration order
    pub fn animations(&self) -> &[&'static str] {
        &self.animations
    }

    /// Whether the body pulse marker is currently active
    pub fn pulse_active(&self) -> bool {
        self.pulse
    }

    /// Live transient count in a layer
    pub fn transient_count(&self, name: &str) -> usize {
        self.layer(name).map_or(0, |l| l.transients.len())
    }

    // === Assertion helpers ===

    /// Check if a layer was mounted at some point
    pub fn has_mounted(&self, name: &str) -> bool {
        self.calls
            .iter()
            .any(|call| matches!(call, StageCall::MountLayer(n) if *n == name))
    }

    /// Check if a layer was unmounted at some point
    pub fn has_unmounted(&self, name: &str) -> bool {
        self.calls
            .iter()
            .any(|call| matches!(call, StageCall::UnmountLayer(n) if n == name))
    }

    /// Last per-frame instance count synced for a layer, if any
    pub fn last_instance_count(&self, name: &str) -> Option<usize> {
        self.calls.iter().rev().find_map(|call| {
            if let StageCall::UpdateParticles { layer, count } = call {
                (layer == name).then_some(*count)
            } else {
                None
            }
        })
    }

    /// How many times particle instances were synced for a layer
    pub fn update_count(&self, name: &str) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, StageCall::UpdateParticles { layer, .. } if layer == name))
            .count()
    }

    /// Last value set for a token across the whole call log
    pub fn last_token_call(&self, token: Token) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| {
            if let StageCall::SetToken(t, value) = call {
                (*t == token).then_some(value.as_str())
            } else {
                None
            }
        })
    }

    /// How many times the pulse marker was set to a given state
    pub fn pulse_sets(&self, active: bool) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, StageCall::SetPulse(a) if *a == active))
            .count()
    }
}

impl Stage for MemoryStage {
    fn set_token(&mut self, token: Token, value: &str) {
        self.tokens.insert(token, value.to_string());
        self.calls.push(StageCall::SetToken(token, value.to_string()));
    }

    fn mount_layer(&mut self, layer: LayerNode) {
        self.calls.push(StageCall::MountLayer(layer.name));
        self.layers.push(MountedLayer {
            node: layer,
            transients: Vec::new(),
            instances: Vec::new(),
        });
    }

    fn unmount_layer(&mut self, name: &str) -> bool {
        self.calls.push(StageCall::UnmountLayer(name.to_string()));
        let before = self.layers.len();
        self.layers.retain(|l| l.node.name != name);
        self.layers.len() != before
    }

    fn has_layer(&self, name: &str) -> bool {
        self.layers.iter().any(|l| l.node.name == name)
    }

    fn layer_names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|l| l.node.name).collect()
    }

    fn ensure_animation(&mut self, name: &'static str) -> bool {
        let was_new = !self.animations.contains(&name);
        if was_new {
            self.animations.push(name);
        }
        self.calls.push(StageCall::EnsureAnimation { name, was_new });
        was_new
    }

    fn update_particles(&mut self, layer: &str, instances: &[ParticleInstance]) {
        self.calls.push(StageCall::UpdateParticles {
            layer: layer.to_string(),
            count: instances.len(),
        });
        if let Some(l) = self.layers.iter_mut().find(|l| l.node.name == layer) {
            l.instances = instances.to_vec();
        }
    }

    fn spawn_transient(&mut self, layer: &str, particle: Particle) -> Option<NodeId> {
        let id = NodeId(self.next_node);
        let l = self.layers.iter_mut().find(|l| l.node.name == layer)?;
        self.next_node += 1;
        l.transients.push((id, particle));
        self.calls.push(StageCall::SpawnTransient(layer.to_string(), id));
        Some(id)
    }

    fn remove_transient(&mut self, layer: &str, id: NodeId) -> bool {
        self.calls.push(StageCall::RemoveTransient(layer.to_string(), id));
        let Some(l) = self.layers.iter_mut().find(|l| l.node.name == layer) else {
            return false;
        };
        let before = l.transients.len();
        l.transients.retain(|(tid, _)| *tid != id);
        l.transients.len() != before
    }

    fn set_pulse(&mut self, active: bool) {
        self.pulse = active;
        self.calls.push(StageCall::SetPulse(active));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(name: &'static str) -> LayerNode {
        LayerNode {
            name,
            opacity: 1.0,
            particles: Vec::new(),
        }
    }

    #[test]
    fn test_new_stage_is_empty() {
        let stage = MemoryStage::new();
        assert_eq!(stage.call_count(), 0);
        assert!(stage.layer_names().is_empty());
        assert_eq!(stage.token_count(), 0);
        assert!(!stage.pulse_active());
    }

    #[test]
    fn test_set_token_records_and_applies() {
        let mut stage = MemoryStage::new();
        stage.set_token(Token::PrimaryColor, "#667eea");
        stage.set_token(Token::PrimaryColor, "#818cf8");

        assert_eq!(stage.token(Token::PrimaryColor), Some("#818cf8"));
        assert_eq!(stage.last_token_call(Token::PrimaryColor), Some("#818cf8"));
        assert_eq!(stage.call_count(), 2);
    }

    #[test]
    fn test_mount_unmount_layer() {
        let mut stage = MemoryStage::new();
        stage.mount_layer(layer("star-field"));

        assert!(stage.has_layer("star-field"));
        assert_eq!(stage.layer_names(), vec!["star-field"]);

        assert!(stage.unmount_layer("star-field"));
        assert!(!stage.has_layer("star-field"));
        assert!(!stage.unmount_layer("star-field"));
        assert!(stage.has_unmounted("star-field"));
    }

    #[test]
    fn test_ensure_animation_guards_duplicates() {
        let mut stage = MemoryStage::new();
        assert!(stage.ensure_animation("cloud-drift"));
        assert!(!stage.ensure_animation("cloud-drift"));
        assert_eq!(stage.animations(), &["cloud-drift"]);
    }

    #[test]
    fn test_update_particles_syncs_snapshot() {
        let mut stage = MemoryStage::new();
        stage.mount_layer(layer("star-field"));

        let instances = vec![
            ParticleInstance {
                x: 10.0,
                y: 20.0,
                size: 1.5,
                opacity: 0.5,
            };
            4
        ];
        stage.update_particles("star-field", &instances);

        assert_eq!(stage.last_instance_count("star-field"), Some(4));
        assert_eq!(stage.layer("star-field").unwrap().instances.len(), 4);
    }

    #[test]
    fn test_update_particles_missing_layer_is_noop() {
        let mut stage = MemoryStage::new();
        stage.update_particles("gone", &[]);
        assert_eq!(stage.update_count("gone"), 1);
        assert!(stage.layer("gone").is_none());
    }

    #[test]
    fn test_spawn_and_remove_transient() {
        let mut stage = MemoryStage::new();
        stage.mount_layer(layer("shooting-stars"));

        let id = stage
            .spawn_transient("shooting-stars", Particle::default())
            .unwrap();
        assert_eq!(stage.transient_count("shooting-stars"), 1);

        assert!(stage.remove_transient("shooting-stars", id));
        assert_eq!(stage.transient_count("shooting-stars"), 0);
        assert!(!stage.remove_transient("shooting-stars", id));
    }

    #[test]
    fn test_spawn_into_missing_layer_returns_none() {
        let mut stage = MemoryStage::new();
        assert!(stage.spawn_transient("gone", Particle::default()).is_none());
    }

    #[test]
    fn test_unmount_drops_transients() {
        let mut stage = MemoryStage::new();
        stage.mount_layer(layer("shooting-stars"));
        let id = stage
            .spawn_transient("shooting-stars", Particle::default())
            .unwrap();

        stage.unmount_layer("shooting-stars");
        assert!(!stage.remove_transient("shooting-stars", id));
    }

    #[test]
    fn test_pulse_toggles() {
        let mut stage = MemoryStage::new();
        stage.set_pulse(true);
        assert!(stage.pulse_active());
        stage.set_pulse(false);
        assert!(!stage.pulse_active());
        assert_eq!(stage.pulse_sets(true), 1);
        assert_eq!(stage.pulse_sets(false), 1);
    }

    #[test]
    fn test_clear_calls_keeps_document() {
        let mut stage = MemoryStage::new();
        stage.mount_layer(layer("light-background"));
        stage.clear_calls();

        assert_eq!(stage.call_count(), 0);
        assert!(stage.has_layer("light-background"));
    }
}
