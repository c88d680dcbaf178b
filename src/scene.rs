//! Scene registry: scenes, their tags, the active scene, and selector state.
//!
//! The registry is the single source of truth for what the UI selectors
//! show. Every mutation updates the affected selectors inside the same
//! `&mut self` call, so no selector can be observed with a stale label or a
//! missing entry.
//!
//! Operations addressing an unknown scene are no-ops that report `false` or
//! `None`; they never partially apply.
//!
//! Deleting a scene removes the scene and every tag it owns, but leaves door
//! tags in other scenes that point at it untouched. Such dangling doors are
//! reported by [`SceneRegistry::dangling_edges`] and refused at activation.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::Serialize;

use crate::ids::{SceneId, Sequence, TagId};
use crate::media::MediaSource;
use crate::tag::Tag;

/// One panorama (image or video) background and the tags placed inside it.
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub id: SceneId,
    pub name: String,
    /// `None` only for the default (welcome) scene.
    pub media: Option<MediaSource>,
    tags: Vec<Tag>,
    #[serde(skip)]
    tag_seq: Sequence,
}

impl Scene {
    fn new(id: SceneId, name: String, media: Option<MediaSource>) -> Self {
        Self { id, name, media, tags: Vec::new(), tag_seq: Sequence::default() }
    }

    /// The bootstrap scene, excluded from navigation targets and export.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.id.is_default()
    }

    /// Tags in creation order.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    #[must_use]
    pub fn tag(&self, id: TagId) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id)
    }
}

/// An entry of a dropdown-style selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorOption {
    pub value: String,
    pub label: String,
}

/// Ordered option list of one selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selector {
    options: Vec<SelectorOption>,
}

impl Selector {
    #[must_use]
    pub fn options(&self) -> &[SelectorOption] {
        &self.options
    }

    #[must_use]
    pub fn label_of(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    fn push(&mut self, value: String, label: String) {
        self.options.push(SelectorOption { value, label });
    }

    fn relabel(&mut self, value: &str, label: &str) {
        for option in self.options.iter_mut().filter(|o| o.value == value) {
            option.label = label.to_owned();
        }
    }

    fn remove(&mut self, value: &str) {
        self.options.retain(|o| o.value != value);
    }

    fn clear(&mut self) {
        self.options.clear();
    }
}

/// A door edge of the navigation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DoorEdge {
    pub scene: SceneId,
    pub tag: TagId,
    pub target: SceneId,
}

/// Label shown for a tag in the tag selector.
fn tag_label(tag: &Tag) -> String {
    if tag.title.trim().is_empty() {
        format!("Tag {}", tag.id)
    } else {
        tag.title.clone()
    }
}

/// The set of scenes for one editing session.
///
/// Starts with only the default scene and no active scene.
#[derive(Debug, Clone, Serialize)]
pub struct SceneRegistry {
    scenes: Vec<Scene>,
    active: Option<SceneId>,
    selected_tag: Option<TagId>,
    scene_selector: Selector,
    door_selector: Selector,
    tag_selector: Selector,
    #[serde(skip)]
    scene_seq: Sequence,
    #[serde(skip)]
    name_prefix: String,
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new("Scene")
    }
}

impl SceneRegistry {
    /// Empty registry (default scene only). New scenes are named
    /// `"{name_prefix} {n}"`.
    #[must_use]
    pub fn new(name_prefix: impl Into<String>) -> Self {
        let default = Scene::new(SceneId::DEFAULT, "Welcome".to_owned(), None);
        Self {
            scenes: vec![default],
            active: None,
            selected_tag: None,
            scene_selector: Selector::default(),
            door_selector: Selector::default(),
            tag_selector: Selector::default(),
            scene_seq: Sequence::default(),
            name_prefix: name_prefix.into(),
        }
    }

    // --- Scenes ---

    /// Register a new scene with a generated name and selector entries.
    pub fn add_scene(&mut self, media: MediaSource) -> &Scene {
        let id = self.scene_seq.next_scene();
        let name = format!("{} {}", self.name_prefix, self.user_scene_count() + 1);
        self.scene_selector.push(id.to_string(), name.clone());
        self.door_selector.push(id.to_string(), name.clone());
        self.scenes.push(Scene::new(id, name, Some(media)));
        &self.scenes[self.scenes.len() - 1]
    }

    /// Rename a scene and every selector label referencing it. Returns false
    /// (and changes nothing) for unknown ids and the default scene.
    pub fn rename_scene(&mut self, id: SceneId, name: &str) -> bool {
        let Some(scene) = self.user_scene_mut(id) else {
            return false;
        };
        scene.name = name.to_owned();
        let value = id.to_string();
        self.scene_selector.relabel(&value, name);
        self.door_selector.relabel(&value, name);
        true
    }

    /// Swap a scene's media; id and name are kept.
    pub fn replace_media(&mut self, id: SceneId, media: MediaSource) -> bool {
        let Some(scene) = self.user_scene_mut(id) else {
            return false;
        };
        scene.media = Some(media);
        true
    }

    /// Remove a scene and all of its tags. Doors elsewhere that target it are
    /// kept. If it was active, the default scene becomes active.
    pub fn remove_scene(&mut self, id: SceneId) -> Option<Scene> {
        if id.is_default() {
            return None;
        }
        let index = self.scenes.iter().position(|s| s.id == id)?;
        let removed = self.scenes.remove(index);
        let value = id.to_string();
        self.scene_selector.remove(&value);
        self.door_selector.remove(&value);
        if self.active == Some(id) {
            self.set_active(SceneId::DEFAULT);
        }
        Some(removed)
    }

    #[must_use]
    pub fn get(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: SceneId) -> bool {
        self.get(id).is_some()
    }

    /// Whether `id` names an existing scene other than the default one.
    #[must_use]
    pub fn is_navigable(&self, id: SceneId) -> bool {
        !id.is_default() && self.contains(id)
    }

    /// All scenes in registry order, default scene first.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter()
    }

    /// Non-default scenes in registry order.
    pub fn user_scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter().filter(|s| !s.is_default())
    }

    #[must_use]
    pub fn user_scene_count(&self) -> usize {
        self.user_scenes().count()
    }

    fn user_scene_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        self.scenes
            .iter_mut()
            .find(|s| s.id == id && !s.is_default())
    }

    // --- Active scene ---

    #[must_use]
    pub fn active(&self) -> Option<SceneId> {
        self.active
    }

    /// Make `id` the active scene and list its tags in the tag selector.
    /// Returns false (and changes nothing) for unknown ids.
    pub fn set_active(&mut self, id: SceneId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.active = Some(id);
        self.selected_tag = None;
        self.refresh_tag_selector();
        true
    }

    /// The scene shown as selected in the scene dropdown: the active scene,
    /// unless that is the default scene (which the dropdown does not list).
    #[must_use]
    pub fn selected_scene(&self) -> Option<SceneId> {
        self.active.filter(|id| !id.is_default())
    }

    // --- Tags ---

    /// Allocate the next tag id of `scene`, build the tag with it, and append
    /// it. The tag selector gains an entry when `scene` is active.
    pub fn insert_tag(&mut self, scene: SceneId, build: impl FnOnce(TagId) -> Tag) -> Option<&Tag> {
        let is_active = self.active == Some(scene);
        let owner = self.user_scene_mut(scene)?;
        let tag = build(owner.tag_seq.next_tag());
        let (value, label) = (tag.id.to_string(), tag_label(&tag));
        owner.tags.push(tag);
        if is_active {
            self.tag_selector.push(value, label);
        }
        self.get(scene).and_then(|s| s.tags.last())
    }

    /// Select a tag of the active scene in the tag selector.
    pub fn select_tag(&mut self, id: TagId) -> bool {
        let owned = self
            .active
            .and_then(|s| self.get(s))
            .is_some_and(|s| s.tag(id).is_some());
        if owned {
            self.selected_tag = Some(id);
        }
        owned
    }

    #[must_use]
    pub fn selected_tag(&self) -> Option<TagId> {
        self.selected_tag
    }

    fn refresh_tag_selector(&mut self) {
        self.tag_selector.clear();
        let Some(scene) = self.active.and_then(|id| self.scenes.iter().find(|s| s.id == id)) else {
            return;
        };
        for tag in &scene.tags {
            self.tag_selector.push(tag.id.to_string(), tag_label(tag));
        }
    }

    // --- Selectors ---

    /// Scene dropdown: every non-default scene.
    #[must_use]
    pub fn scene_selector(&self) -> &Selector {
        &self.scene_selector
    }

    /// Door-target dropdown: every non-default scene.
    #[must_use]
    pub fn door_selector(&self) -> &Selector {
        &self.door_selector
    }

    /// Tags of the active scene.
    #[must_use]
    pub fn tag_selector(&self) -> &Selector {
        &self.tag_selector
    }

    // --- Navigation graph ---

    /// Every door edge, in scene then tag order.
    #[must_use]
    pub fn door_edges(&self) -> Vec<DoorEdge> {
        self.scenes
            .iter()
            .flat_map(|s| s.tags.iter())
            .filter_map(|t| {
                t.door_target()
                    .map(|target| DoorEdge { scene: t.scene, tag: t.id, target })
            })
            .collect()
    }

    /// Door edges whose target is missing or is the default scene.
    #[must_use]
    pub fn dangling_edges(&self) -> Vec<DoorEdge> {
        self.door_edges()
            .into_iter()
            .filter(|e| !self.is_navigable(e.target))
            .collect()
    }
}
