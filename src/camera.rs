use glam::Vec3;
use serde::{Deserialize, Serialize};

/// World-space pose of a scene's active camera, as reported by the
/// rendering collaborator.
///
/// `forward` is the camera's world direction. It is used as given; the
/// collaborator is expected to report a unit vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub forward: Vec3,
}

impl Default for CameraPose {
    /// Camera at the origin looking down `-Z`.
    fn default() -> Self {
        Self { position: Vec3::ZERO, forward: Vec3::NEG_Z }
    }
}

impl CameraPose {
    #[must_use]
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }
}
