//! Tour manifest: the JSON description of scenes, media files, and tags that
//! the CLI replays against the editor.
//!
//! ```json
//! {
//!   "scenes": [
//!     {
//!       "key": "lobby",
//!       "file": "lobby.jpg",
//!       "name": "Lobby",
//!       "camera": { "position": [0, 1.6, 0], "forward": [0, 0, -1] },
//!       "tags": [
//!         { "kind": "door", "title": "Kitchen", "target": "kitchen", "depth": 3 },
//!         { "kind": "info", "title": "Fireplace", "description": "1890", "position": [1, 2, -4] },
//!         { "kind": "photo", "title": "Plan", "file": "plan.png" },
//!         { "kind": "video", "title": "Tour", "file": "tour.mp4" }
//!       ]
//!     }
//!   ]
//! }
//! ```

#[cfg(test)]
#[path = "manifest_test.rs"]
mod manifest_test;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::Deserialize;
use vrtour::camera::CameraPose;
use vrtour::ids::SceneId;
use vrtour::placement::{Placement, is_valid_depth};

use crate::CliError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub scenes: Vec<SceneEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneEntry {
    /// Manifest-local name other entries use to refer to this scene.
    pub key: String,
    /// Background image or video, relative to the manifest.
    pub file: PathBuf,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub camera: Option<CameraEntry>,
    #[serde(default)]
    pub tags: Vec<TagEntry>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraEntry {
    pub position: Vec3,
    #[serde(default = "default_forward")]
    pub forward: Vec3,
}

fn default_forward() -> Vec3 {
    Vec3::NEG_Z
}

impl From<CameraEntry> for CameraPose {
    fn from(entry: CameraEntry) -> Self {
        CameraPose::new(entry.position, entry.forward.normalize_or_zero())
    }
}

#[derive(Debug, Deserialize)]
pub struct TagEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub position: Option<Vec3>,
    #[serde(default)]
    pub depth: Option<f32>,
    #[serde(flatten)]
    pub kind: TagEntryKind,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TagEntryKind {
    Door { target: String },
    Info {
        #[serde(default)]
        description: String,
    },
    Photo { file: PathBuf },
    Video { file: PathBuf },
}

impl TagEntry {
    /// Explicit position wins over depth; with neither, `None` lets the
    /// editor pick its configured default.
    pub fn placement(&self) -> Option<Placement> {
        match (self.position, self.depth) {
            (Some(at), _) => Some(Placement::At(at)),
            (None, Some(depth)) => Some(Placement::Camera { depth }),
            (None, None) => None,
        }
    }
}

impl Manifest {
    /// Parse manifest text and check that scene keys are unique and that
    /// every door names a scene in the manifest.
    pub fn parse(text: &str) -> Result<Self, CliError> {
        let manifest: Self = serde_json::from_str(text)?;
        let mut seen = HashSet::new();
        for scene in &manifest.scenes {
            if !seen.insert(scene.key.as_str()) {
                return Err(CliError::DuplicateSceneKey(scene.key.clone()));
            }
        }
        for scene in &manifest.scenes {
            for tag in &scene.tags {
                if let TagEntryKind::Door { target } = &tag.kind {
                    if !seen.contains(target.as_str()) {
                        return Err(CliError::UnknownSceneKey {
                            scene: scene.key.clone(),
                            key: target.clone(),
                        });
                    }
                }
                if tag.depth.is_some_and(|d| !is_valid_depth(d)) {
                    return Err(CliError::InvalidTag {
                        scene: scene.key.clone(),
                        reason: "depth must be a positive number",
                    });
                }
            }
        }
        Ok(manifest)
    }
}

/// Scene ids assigned by the editor, by manifest key.
#[derive(Debug, Default)]
pub struct SceneKeys {
    ids: HashMap<String, SceneId>,
}

impl SceneKeys {
    pub fn insert(&mut self, key: &str, id: SceneId) {
        self.ids.insert(key.to_owned(), id);
    }

    pub fn resolve(&self, scene: &str, key: &str) -> Result<SceneId, CliError> {
        self.ids.get(key).copied().ok_or_else(|| CliError::UnknownSceneKey {
            scene: scene.to_owned(),
            key: key.to_owned(),
        })
    }
}

/// Resolve a manifest-relative path.
pub fn resolve_path(manifest_dir: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        manifest_dir.join(file)
    }
}
