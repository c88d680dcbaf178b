//! Error taxonomy for editor operations.
//!
//! Every core operation is atomic: when one of these errors is returned the
//! registry, the selectors, and the element tree are exactly as they were
//! before the call.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::ids::{SceneId, TagId};
use crate::media::LoadTicket;

/// Grepable error code and severity flag, shown next to the message on the
/// status surface.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    /// Warnings leave the editor fully usable; only the requested action is
    /// refused.
    fn is_warning(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TourError {
    /// The operation named a scene that is not in the registry.
    #[error("scene not found: {0}")]
    SceneNotFound(SceneId),
    /// Placement was requested before the scene's camera was ready.
    #[error("camera not ready in {0}")]
    CameraUnavailable(SceneId),
    /// The requested tag position is not a usable point in the scene.
    #[error("invalid placement in {scene}: {detail}")]
    InvalidPlacement { scene: SceneId, detail: String },
    /// A door tag points at a scene that no longer exists.
    #[error("door {tag} in {scene} leads to missing scene {target}")]
    DanglingNavigation { scene: SceneId, tag: TagId, target: SceneId },
    /// The media collaborator could not produce a usable source.
    #[error("could not decode {file_name}: {reason}")]
    MediaDecode { file_name: String, reason: String },
    /// A load completion arrived for a ticket that is not pending.
    #[error("no pending load for ticket {0}")]
    UnknownLoad(LoadTicket),
}

impl ErrorCode for TourError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SceneNotFound(_) => "E_SCENE_NOT_FOUND",
            Self::CameraUnavailable(_) => "E_CAMERA_UNAVAILABLE",
            Self::InvalidPlacement { .. } => "E_INVALID_PLACEMENT",
            Self::DanglingNavigation { .. } => "W_DANGLING_NAVIGATION",
            Self::MediaDecode { .. } => "E_MEDIA_DECODE",
            Self::UnknownLoad(_) => "E_UNKNOWN_LOAD",
        }
    }

    fn is_warning(&self) -> bool {
        matches!(self, Self::DanglingNavigation { .. })
    }
}
