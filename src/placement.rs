//! Placement engine: where a new tag and its secondary panel go.
//!
//! Depth is a positive magnitude chosen by the user. Markers are placed
//! along the camera's forward axis scaled by the negated depth, matching the
//! coordinate convention of the rendering engine, so a camera at the origin
//! facing `(0, 0, -1)` with depth 3 yields `(0, 0, 3)`.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use glam::Vec3;

use crate::camera::CameraPose;

/// How the caller wants a new tag positioned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Relative to the owning scene's camera, `depth` units along its view axis.
    Camera { depth: f32 },
    /// Used verbatim.
    At(Vec3),
}

impl Placement {
    /// Camera depth must be a finite distance in front of the viewer;
    /// explicit positions must have finite components.
    #[must_use]
    pub fn is_valid(self) -> bool {
        match self {
            Self::Camera { depth } => is_valid_depth(depth),
            Self::At(position) => position.is_finite(),
        }
    }
}

#[must_use]
pub fn is_valid_depth(depth: f32) -> bool {
    depth.is_finite() && depth > 0.0
}

/// Position `depth` units from the camera along its forward axis.
#[must_use]
pub fn compute_position(camera: &CameraPose, depth: f32) -> Vec3 {
    normalize_zero(camera.position + camera.forward * -depth)
}

/// Position of a secondary element anchored near its marker.
#[must_use]
pub fn compute_anchor_offset(marker: Vec3, offset: Vec3) -> Vec3 {
    normalize_zero(marker + offset)
}

/// Resolve a [`Placement`]; `None` means camera placement was requested but
/// no camera pose is available.
#[must_use]
pub fn resolve(placement: Placement, camera: Option<&CameraPose>) -> Option<Vec3> {
    match placement {
        Placement::At(position) => Some(position),
        Placement::Camera { depth } => camera.map(|c| compute_position(c, depth)),
    }
}

/// Format a position the way the rendering engine's attributes expect (`"x y z"`).
#[must_use]
pub fn format_position(v: Vec3) -> String {
    let v = normalize_zero(v);
    format!("{} {} {}", v.x, v.y, v.z)
}

// `-0.0` prints as "-0"; adding positive zero folds it into `0.0`.
fn normalize_zero(v: Vec3) -> Vec3 {
    v + Vec3::ZERO
}
