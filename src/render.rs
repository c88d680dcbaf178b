//! Rendering collaborator contract and the in-memory element tree.
//!
//! The editor never draws anything itself. It describes each scene as a tree
//! of [`Element`]s (entity name, ordered attributes, children) and hands them
//! to a [`SceneGraph`], which mounts them, reports camera poses, and routes
//! activation (click) events back as [`Activation`] values. A browser host
//! implements the trait on top of the DOM; [`ElementTree`] implements it in
//! memory and is what tests and the CLI use.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::HashMap;

use crate::camera::CameraPose;
use crate::consts::WELCOME_SKY_COLOR;
use crate::ids::{SceneId, TagId};
use crate::media::{MediaKind, MediaSource};
use crate::placement::format_position;

/// One node of a scene's visual subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attrs: Vec::new(), children: Vec::new() }
    }

    /// Builder form of [`Element::set_attribute`].
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder form of pushing a child.
    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute, keeping its original position if it already exists.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name, value)),
        }
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Depth-first search for the element with `id`, including `self`.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Serialized markup of this element and its subtree.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    pub fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (k, v) in &self.attrs {
            out.push(' ');
            out.push_str(k);
            out.push_str("=\"");
            out.push_str(&escape_attr(v));
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            child.write_markup(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

/// Escape a value for use inside a double-quoted attribute.
#[must_use]
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// What happens when the user activates (clicks) a registered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// A door: switch the active scene to `target`.
    Navigate { tag: TagId, target: SceneId },
    /// Any other marker: select the tag in the tag selector.
    Select(TagId),
}

/// Contract the editor needs from the rendering engine.
///
/// Methods addressing an unmounted scene or a missing element are no-ops
/// that report `false`/`None`.
pub trait SceneGraph {
    /// Mount a scene subtree (replacing any previous subtree for `scene`).
    fn mount(&mut self, scene: SceneId, root: Element);

    /// Remove a scene subtree together with its activation listeners.
    fn unmount(&mut self, scene: SceneId) -> bool;

    fn set_visible(&mut self, scene: SceneId, visible: bool) -> bool;

    /// World pose of the scene's camera; `None` until the camera is ready.
    fn camera_pose(&self, scene: SceneId) -> Option<CameraPose>;

    /// Append an element as a direct child of the scene root.
    fn append(&mut self, scene: SceneId, element: Element) -> bool;

    /// Swap the element carrying `element`'s id for `element`.
    fn replace(&mut self, scene: SceneId, element: Element) -> bool;

    fn set_attribute(&mut self, scene: SceneId, element_id: &str, name: &str, value: &str) -> bool;

    /// Register the activation for an element; clicking it is then reported
    /// back through [`SceneGraph::activation`].
    fn listen(&mut self, scene: SceneId, element_id: &str, activation: Activation) -> bool;

    fn activation(&self, scene: SceneId, element_id: &str) -> Option<Activation>;

    /// Full serialized subtree of a mounted scene.
    fn outer_markup(&self, scene: SceneId) -> Option<String>;
}

// =============================================================================
// SUBTREE BUILDERS
// =============================================================================

/// Element id of a scene's camera entity.
#[must_use]
pub fn camera_element_id(scene: SceneId) -> String {
    format!("camera-{scene}")
}

/// Element id of a scene's background (sky or videosphere).
#[must_use]
pub fn background_element_id(scene: SceneId) -> String {
    format!("{scene}-sky")
}

/// Background element for a scene: a sky for images, a looping videosphere
/// for videos, or a flat color for the media-less welcome scene.
#[must_use]
pub fn background(scene: SceneId, media: Option<&MediaSource>) -> Element {
    let id = background_element_id(scene);
    match media {
        None => Element::new("a-sky").attr("id", id).attr("color", WELCOME_SKY_COLOR),
        Some(m) => match m.kind() {
            MediaKind::Image => Element::new("a-sky").attr("id", id).attr("src", m.src.as_str()),
            MediaKind::Video => Element::new("a-videosphere")
                .attr("id", id)
                .attr("src", m.src.as_str())
                .attr("autoplay", "true")
                .attr("loop", "true"),
        },
    }
}

/// Root subtree for a newly created scene, hidden until navigated to.
#[must_use]
pub fn scene_root(scene: SceneId, name: &str, media: Option<&MediaSource>) -> Element {
    let camera = CameraPose::default();
    Element::new("a-scene")
        .attr("id", scene.to_string())
        .attr("data-name", name)
        .attr("embedded", "")
        .attr("style", "display: none")
        .child(
            Element::new("a-entity")
                .attr("id", camera_element_id(scene))
                .attr("camera", "")
                .attr("look-controls", "")
                .attr("wasd-controls", "")
                .attr("position", format_position(camera.position)),
        )
        .child(background(scene, media))
}

// =============================================================================
// IN-MEMORY TREE
// =============================================================================

#[derive(Debug)]
struct MountedScene {
    id: SceneId,
    root: Element,
    camera: Option<CameraPose>,
    listeners: HashMap<String, Activation>,
}

/// [`SceneGraph`] kept entirely in memory, in mount order.
///
/// Cameras are ready as soon as a scene is mounted, posed at the origin
/// looking down `-Z`; [`ElementTree::set_camera`] moves or clears them.
#[derive(Debug, Default)]
pub struct ElementTree {
    scenes: Vec<MountedScene>,
}

impl ElementTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update (or with `None`, tear down) a scene's camera pose. The camera
    /// entity's `position` attribute follows the pose.
    pub fn set_camera(&mut self, scene: SceneId, pose: Option<CameraPose>) -> bool {
        let Some(mounted) = self.get_mut(scene) else {
            return false;
        };
        mounted.camera = pose;
        if let Some(pose) = pose {
            let camera_id = camera_element_id(scene);
            if let Some(el) = mounted.root.find_mut(&camera_id) {
                el.set_attribute("position", format_position(pose.position));
            }
        }
        true
    }

    /// Root element of a mounted scene.
    #[must_use]
    pub fn root(&self, scene: SceneId) -> Option<&Element> {
        self.get(scene).map(|m| &m.root)
    }

    #[must_use]
    pub fn is_mounted(&self, scene: SceneId) -> bool {
        self.get(scene).is_some()
    }

    #[must_use]
    pub fn is_visible(&self, scene: SceneId) -> bool {
        self.root(scene)
            .and_then(|r| r.attribute("style"))
            .is_some_and(|s| s != "display: none")
    }

    /// Mounted scene ids in mount order.
    #[must_use]
    pub fn mounted(&self) -> Vec<SceneId> {
        self.scenes.iter().map(|m| m.id).collect()
    }

    fn get(&self, scene: SceneId) -> Option<&MountedScene> {
        self.scenes.iter().find(|m| m.id == scene)
    }

    fn get_mut(&mut self, scene: SceneId) -> Option<&mut MountedScene> {
        self.scenes.iter_mut().find(|m| m.id == scene)
    }
}

impl SceneGraph for ElementTree {
    fn mount(&mut self, scene: SceneId, root: Element) {
        let mounted = MountedScene {
            id: scene,
            root,
            camera: Some(CameraPose::default()),
            listeners: HashMap::new(),
        };
        match self.get_mut(scene) {
            Some(existing) => *existing = mounted,
            None => self.scenes.push(mounted),
        }
    }

    fn unmount(&mut self, scene: SceneId) -> bool {
        let before = self.scenes.len();
        self.scenes.retain(|m| m.id != scene);
        self.scenes.len() != before
    }

    fn set_visible(&mut self, scene: SceneId, visible: bool) -> bool {
        let style = if visible { "display: block" } else { "display: none" };
        match self.get_mut(scene) {
            Some(m) => {
                m.root.set_attribute("style", style);
                true
            }
            None => false,
        }
    }

    fn camera_pose(&self, scene: SceneId) -> Option<CameraPose> {
        self.get(scene).and_then(|m| m.camera)
    }

    fn append(&mut self, scene: SceneId, element: Element) -> bool {
        match self.get_mut(scene) {
            Some(m) => {
                m.root.children.push(element);
                true
            }
            None => false,
        }
    }

    fn replace(&mut self, scene: SceneId, element: Element) -> bool {
        let Some(id) = element.id().map(str::to_owned) else {
            return false;
        };
        let Some(target) = self.get_mut(scene).and_then(|m| m.root.find_mut(&id)) else {
            return false;
        };
        *target = element;
        true
    }

    fn set_attribute(&mut self, scene: SceneId, element_id: &str, name: &str, value: &str) -> bool {
        match self.get_mut(scene).and_then(|m| m.root.find_mut(element_id)) {
            Some(el) => {
                el.set_attribute(name, value);
                true
            }
            None => false,
        }
    }

    fn listen(&mut self, scene: SceneId, element_id: &str, activation: Activation) -> bool {
        let Some(m) = self.get_mut(scene) else {
            return false;
        };
        if m.root.find(element_id).is_none() {
            return false;
        }
        m.listeners.insert(element_id.to_owned(), activation);
        true
    }

    fn activation(&self, scene: SceneId, element_id: &str) -> Option<Activation> {
        self.get(scene).and_then(|m| m.listeners.get(element_id).copied())
    }

    fn outer_markup(&self, scene: SceneId) -> Option<String> {
        self.root(scene).map(Element::to_markup)
    }
}
