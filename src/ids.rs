//! Scene and tag identifiers.
//!
//! Scene ids come from a session-wide [`Sequence`] that never moves
//! backwards, so an id is never reissued after its scene is deleted, even
//! when a later scene ends up with the same ordinal name. Tag ids come from
//! a per-scene sequence and are only unique inside their owning scene.

#[cfg(test)]
#[path = "ids_test.rs"]
mod ids_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a scene. Doubles as the element id of the scene's subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SceneId(u64);

impl SceneId {
    /// The bootstrap/welcome scene. Never issued by a [`Sequence`].
    pub const DEFAULT: Self = Self(0);

    #[must_use]
    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }

    /// Raw ordinal; `0` for the default scene.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            f.write_str("defaultScene")
        } else {
            write!(f, "scene-{}", self.0)
        }
    }
}

/// Identifier of a tag within its owning scene (`1, 2, 3, ...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TagId(u64);

impl TagId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    /// Element id of the tag's primary marker. Prefixed with the owning scene
    /// so ids stay unique across the whole exported document.
    #[must_use]
    pub fn element_id(self, scene: SceneId) -> String {
        format!("{scene}-tag-{}", self.0)
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic counter backing one id scope.
///
/// Every id handed out by a sequence is strictly greater than all ids handed
/// out before it, no matter how quickly the calls follow each other.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    last: u64,
}

impl Sequence {
    fn bump(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    pub fn next_scene(&mut self) -> SceneId {
        SceneId(self.bump())
    }

    pub fn next_tag(&mut self) -> TagId {
        TagId(self.bump())
    }

    /// Number of ids issued so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.last
    }
}
