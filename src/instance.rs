use glam::{Quat, Vec3};

/// A reusable visual note instance. The sequencer only moves these and flips
/// their visibility; how they are drawn is the host's business.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteInstance {
    /// Stable pool identity, assigned at initialization and never changed.
    pub id: usize,
    /// Display name carrying the identity suffix, matched by the tag-based
    /// contact detectors (e.g. `"NoteBlock_3"`).
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub visible: bool,
}

/// Hands the pool its fixed set of instances at initialization. Instances
/// are created exactly once, dormant, and never after; the provider is the
/// seam where a host swaps in engine-backed objects.
pub trait InstanceProvider {
    fn instantiate(&mut self, id: usize) -> NoteInstance;
}

/// Default provider: plain dormant instances named `"{prefix}_{id}"`.
#[derive(Debug, Clone)]
pub struct BlockProvider {
    pub name_prefix: String,
}

impl BlockProvider {
    pub fn new(name_prefix: impl Into<String>) -> Self {
        Self { name_prefix: name_prefix.into() }
    }
}

impl InstanceProvider for BlockProvider {
    fn instantiate(&mut self, id: usize) -> NoteInstance {
        NoteInstance {
            id,
            name: format!("{}_{}", self.name_prefix, id),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            visible: false,
        }
    }
}
