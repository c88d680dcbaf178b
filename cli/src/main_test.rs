use glam::Vec3;
use vrtour::ids::SceneId;

use super::*;

// =============================================================
// Helpers
// =============================================================

/// Write `files` and `manifest.json` into a fresh directory under the
/// system temp dir and return the manifest path.
async fn fixture(name: &str, files: &[(&str, Vec<u8>)], manifest: &Value) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vrtour-replay-{name}-{}", std::process::id()));
    if dir.exists() {
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
    tokio::fs::create_dir_all(&dir).await.unwrap();
    for (file, bytes) in files {
        tokio::fs::write(dir.join(file), bytes).await.unwrap();
    }
    let path = dir.join("manifest.json");
    tokio::fs::write(&path, manifest.to_string()).await.unwrap();
    path
}

async fn cleanup(manifest: &Path) {
    if let Some(dir) = manifest.parent() {
        tokio::fs::remove_dir_all(dir).await.unwrap();
    }
}

fn scene_named(editor: &EditorCore, name: &str) -> SceneId {
    editor
        .registry()
        .user_scenes()
        .find(|s| s.name == name)
        .map(|s| s.id)
        .unwrap()
}

fn two_room_manifest() -> Value {
    json!({
        "scenes": [
            {
                "key": "lobby",
                "file": "lobby.jpg",
                "name": "Lobby",
                "camera": { "position": [0.0, 1.6, 0.0], "forward": [0.0, 0.0, -1.0] },
                "tags": [
                    { "kind": "door", "title": "To kitchen", "target": "kitchen", "depth": 3.0 },
                    { "kind": "info", "title": "Fireplace", "description": "1890", "position": [1.0, 2.0, -4.0] }
                ]
            },
            {
                "key": "kitchen",
                "file": "kitchen.png",
                "tags": [
                    { "kind": "door", "title": "Back", "target": "lobby" }
                ]
            }
        ]
    })
}

// =============================================================
// Replay
// =============================================================

#[tokio::test]
async fn replay_maps_keys_to_scenes_in_manifest_order() {
    // The first background is much larger, so its read usually finishes
    // last; ids and names must still follow the manifest.
    let files = [("lobby.jpg", vec![7u8; 512 * 1024]), ("kitchen.png", vec![1u8; 16])];
    let manifest = fixture("order", &files, &two_room_manifest()).await;
    let editor = replay(&manifest, EditorConfig::default()).await.unwrap();
    cleanup(&manifest).await;

    let ids: Vec<_> = editor.registry().user_scenes().map(|s| (s.id.to_string(), s.name.clone())).collect();
    assert_eq!(
        ids,
        vec![("scene-1".to_owned(), "Lobby".to_owned()), ("scene-2".to_owned(), "Scene 2".to_owned())]
    );
    let lobby = scene_named(&editor, "Lobby");
    let kitchen = scene_named(&editor, "Scene 2");
    assert_eq!(editor.registry().active(), Some(lobby));

    let edges: Vec<_> = editor.registry().door_edges().iter().map(|e| (e.scene, e.target)).collect();
    assert_eq!(edges, vec![(lobby, kitchen), (kitchen, lobby)]);
    assert!(editor.registry().dangling_edges().is_empty());
}

#[tokio::test]
async fn replay_places_tags_from_camera_and_explicit_positions() {
    let files = [("lobby.jpg", vec![1u8; 8]), ("kitchen.png", vec![2u8; 8])];
    let manifest = fixture("placement", &files, &two_room_manifest()).await;
    let editor = replay(&manifest, EditorConfig::default()).await.unwrap();
    cleanup(&manifest).await;

    let lobby = editor.registry().get(scene_named(&editor, "Lobby")).unwrap();
    let positions: Vec<_> = lobby.tags().iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![Vec3::new(0.0, 1.6, 3.0), Vec3::new(1.0, 2.0, -4.0)]);
}

#[tokio::test]
async fn summary_reports_active_scene_and_doors() {
    let files = [("lobby.jpg", vec![1u8; 8]), ("kitchen.png", vec![2u8; 8])];
    let manifest = fixture("summary", &files, &two_room_manifest()).await;
    let editor = replay(&manifest, EditorConfig::default()).await.unwrap();
    cleanup(&manifest).await;

    let value = summary(&editor);
    assert_eq!(value["active"], "scene-1");
    assert_eq!(value["scenes"][0]["file"], "lobby.jpg");
    assert_eq!(value["scenes"][1]["media"], "image");
    assert_eq!(value["doors"][0]["target"], "scene-2");
    assert_eq!(value["doors"][1]["target"], "scene-1");
    assert_eq!(value["dangling"], json!([]));
}

#[tokio::test]
async fn missing_background_aborts_replay() {
    let files = [("lobby.jpg", vec![1u8; 8])];
    let manifest = fixture("missing", &files, &two_room_manifest()).await;
    let err = replay(&manifest, EditorConfig::default()).await.unwrap_err();
    cleanup(&manifest).await;

    assert!(matches!(err, CliError::Tour(TourError::MediaDecode { ref file_name, .. }) if file_name == "kitchen.png"));
}

#[tokio::test]
async fn build_writes_exported_document() {
    let files = [("lobby.jpg", vec![1u8; 8]), ("kitchen.png", vec![2u8; 8])];
    let manifest = fixture("build", &files, &two_room_manifest()).await;
    let out = manifest.with_file_name("tour.html");
    run_build(&manifest, Some(&out), EditorConfig::default()).await.unwrap();
    let document = tokio::fs::read_to_string(&out).await.unwrap();
    cleanup(&manifest).await;

    assert!(document.contains(r#"<a-scene id="scene-1""#));
    assert!(document.contains(r#"data-target-scene="scene-2""#));
    assert!(document.contains("data:image/png;base64,"));
}
