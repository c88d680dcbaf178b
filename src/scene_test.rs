use glam::Vec3;

use super::*;
use crate::tag::TagPayload;

fn media(name: &str) -> MediaSource {
    MediaSource::new(format!("data:image/jpeg;base64,{name}"), format!("{name}.jpg"))
}

fn add(registry: &mut SceneRegistry, name: &str) -> SceneId {
    registry.add_scene(media(name)).id
}

fn tag_in(registry: &mut SceneRegistry, scene: SceneId, title: &str, payload: TagPayload) -> Option<TagId> {
    registry
        .insert_tag(scene, |id| Tag { id, scene, title: title.to_owned(), position: Vec3::ZERO, payload })
        .map(|t| t.id)
}

fn door_to(target: SceneId) -> TagPayload {
    TagPayload::Door { target }
}

fn info() -> TagPayload {
    TagPayload::Info { description: String::new() }
}

// =============================================================
// Scenes
// =============================================================

#[test]
fn new_registry_has_only_default_scene() {
    let registry = SceneRegistry::default();
    let all: Vec<_> = registry.scenes().map(|s| s.id).collect();
    assert_eq!(all, vec![SceneId::DEFAULT]);
    assert_eq!(registry.active(), None);
    assert_eq!(registry.user_scene_count(), 0);
    assert!(registry.scene_selector().is_empty());
    assert!(registry.door_selector().is_empty());
}

#[test]
fn add_scene_generates_name_and_selector_entries() {
    let mut registry = SceneRegistry::default();
    let id = add(&mut registry, "a");
    let scene = registry.get(id).unwrap();
    assert_eq!(scene.name, "Scene 1");
    assert_eq!(scene.media, Some(media("a")));
    assert_eq!(registry.scene_selector().label_of("scene-1"), Some("Scene 1"));
    assert_eq!(registry.door_selector().label_of("scene-1"), Some("Scene 1"));
}

#[test]
fn custom_name_prefix() {
    let mut registry = SceneRegistry::new("Room");
    let id = add(&mut registry, "a");
    assert_eq!(registry.get(id).map(|s| s.name.as_str()), Some("Room 1"));
}

#[test]
fn rapid_adds_get_distinct_ids() {
    let mut registry = SceneRegistry::default();
    let ids: Vec<_> = (0..50).map(|i| add(&mut registry, &i.to_string())).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), 50);

    let values: Vec<_> = registry.scene_selector().options().iter().map(|o| o.value.clone()).collect();
    let expected: Vec<_> = registry.user_scenes().map(|s| s.id.to_string()).collect();
    assert_eq!(values, expected);
    assert_eq!(registry.door_selector(), registry.scene_selector());
}

#[test]
fn ids_are_not_reused_after_delete() {
    let mut registry = SceneRegistry::default();
    let first = add(&mut registry, "a");
    registry.remove_scene(first);
    let second = add(&mut registry, "b");
    assert_ne!(first, second);
    // Names are ordinal and may repeat; ids may not.
    assert_eq!(registry.get(second).map(|s| s.name.as_str()), Some("Scene 1"));
}

#[test]
fn rename_updates_every_selector_label() {
    let mut registry = SceneRegistry::default();
    let id = add(&mut registry, "a");
    assert!(registry.rename_scene(id, "Kitchen"));
    assert_eq!(registry.get(id).map(|s| s.name.as_str()), Some("Kitchen"));
    assert_eq!(registry.scene_selector().label_of("scene-1"), Some("Kitchen"));
    assert_eq!(registry.door_selector().label_of("scene-1"), Some("Kitchen"));
}

#[test]
fn unknown_and_default_ids_are_noops() {
    let mut registry = SceneRegistry::default();
    let id = add(&mut registry, "a");
    let mut with_default = registry.clone();
    registry.remove_scene(id);
    let selector = registry.scene_selector().clone();

    assert!(!registry.rename_scene(id, "x"));
    assert!(!registry.replace_media(id, media("z")));
    assert!(registry.remove_scene(id).is_none());
    assert!(tag_in(&mut registry, id, "t", info()).is_none());
    assert!(!registry.set_active(id));
    assert_eq!(registry.scene_selector(), &selector);
    assert_eq!(registry.active(), None);

    assert!(!with_default.rename_scene(SceneId::DEFAULT, "x"));
    assert!(with_default.remove_scene(SceneId::DEFAULT).is_none());
    assert!(tag_in(&mut with_default, SceneId::DEFAULT, "t", info()).is_none());
    assert_eq!(with_default.get(SceneId::DEFAULT).map(|s| s.name.as_str()), Some("Welcome"));
}

#[test]
fn replace_media_keeps_id_and_name() {
    let mut registry = SceneRegistry::default();
    let id = add(&mut registry, "a");
    assert!(registry.replace_media(id, media("b")));
    let scene = registry.get(id).unwrap();
    assert_eq!(scene.name, "Scene 1");
    assert_eq!(scene.media, Some(media("b")));
}

#[test]
fn remove_active_scene_falls_back_to_default() {
    let mut registry = SceneRegistry::default();
    let id = add(&mut registry, "a");
    registry.set_active(id);
    let removed = registry.remove_scene(id).unwrap();
    assert_eq!(removed.id, id);
    assert_eq!(registry.active(), Some(SceneId::DEFAULT));
    assert_eq!(registry.selected_scene(), None);
    assert!(registry.scene_selector().is_empty());
}

#[test]
fn remove_inactive_scene_keeps_active() {
    let mut registry = SceneRegistry::default();
    let a = add(&mut registry, "a");
    let b = add(&mut registry, "b");
    registry.set_active(a);
    registry.remove_scene(b);
    assert_eq!(registry.active(), Some(a));
}

// =============================================================
// Tags
// =============================================================

#[test]
fn tag_ids_are_per_scene() {
    let mut registry = SceneRegistry::default();
    let a = add(&mut registry, "a");
    let b = add(&mut registry, "b");
    let a1 = tag_in(&mut registry, a, "one", info()).unwrap();
    let a2 = tag_in(&mut registry, a, "two", info()).unwrap();
    let b1 = tag_in(&mut registry, b, "one", info()).unwrap();
    assert_eq!((a1.get(), a2.get(), b1.get()), (1, 2, 1));
    let titles: Vec<_> = registry.get(a).unwrap().tags().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["one", "two"]);
}

#[test]
fn tag_selector_tracks_active_scene() {
    let mut registry = SceneRegistry::default();
    let a = add(&mut registry, "a");
    let b = add(&mut registry, "b");
    registry.set_active(a);
    tag_in(&mut registry, a, "Lamp", info());
    tag_in(&mut registry, b, "Hidden", info());
    tag_in(&mut registry, a, "", info());
    let labels: Vec<_> = registry.tag_selector().options().iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["Lamp", "Tag 2"]);

    registry.set_active(b);
    assert_eq!(registry.tag_selector().label_of("1"), Some("Hidden"));
    assert_eq!(registry.tag_selector().len(), 1);
}

#[test]
fn select_tag_only_in_active_scene() {
    let mut registry = SceneRegistry::default();
    let a = add(&mut registry, "a");
    let b = add(&mut registry, "b");
    let tag = tag_in(&mut registry, a, "x", info()).unwrap();
    registry.set_active(b);
    assert!(!registry.select_tag(tag));
    registry.set_active(a);
    assert!(registry.select_tag(tag));
    assert_eq!(registry.selected_tag(), Some(tag));

    registry.set_active(b);
    assert_eq!(registry.selected_tag(), None);
}

// =============================================================
// Navigation graph
// =============================================================

#[test]
fn door_edges_in_scene_then_tag_order() {
    let mut registry = SceneRegistry::default();
    let a = add(&mut registry, "a");
    let b = add(&mut registry, "b");
    let ab = tag_in(&mut registry, a, "to b", door_to(b)).unwrap();
    tag_in(&mut registry, a, "note", info());
    let ba = tag_in(&mut registry, b, "to a", door_to(a)).unwrap();
    assert_eq!(
        registry.door_edges(),
        vec![
            DoorEdge { scene: a, tag: ab, target: b },
            DoorEdge { scene: b, tag: ba, target: a },
        ]
    );
    assert!(registry.dangling_edges().is_empty());
}

#[test]
fn deleting_target_leaves_dangling_door() {
    let mut registry = SceneRegistry::default();
    let a = add(&mut registry, "a");
    let b = add(&mut registry, "b");
    let door = tag_in(&mut registry, a, "to b", door_to(b)).unwrap();
    registry.remove_scene(b);
    assert_eq!(registry.get(a).unwrap().tags().len(), 1);
    assert_eq!(registry.dangling_edges(), vec![DoorEdge { scene: a, tag: door, target: b }]);
    assert!(registry.door_selector().label_of("scene-2").is_none());
}

#[test]
fn deleting_scene_drops_its_own_doors() {
    let mut registry = SceneRegistry::default();
    let a = add(&mut registry, "a");
    let b = add(&mut registry, "b");
    tag_in(&mut registry, a, "to b", door_to(b));
    registry.remove_scene(a);
    assert!(registry.door_edges().is_empty());
}
