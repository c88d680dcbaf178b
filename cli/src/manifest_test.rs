use super::*;

fn scene_json(key: &str, tags: &str) -> String {
    format!(r#"{{ "key": "{key}", "file": "{key}.jpg", "tags": [{tags}] }}"#)
}

fn parse(scenes: &[String]) -> Result<Manifest, CliError> {
    Manifest::parse(&format!(r#"{{ "scenes": [{}] }}"#, scenes.join(",")))
}

#[test]
fn parses_every_tag_kind() {
    let tags = r#"
        { "kind": "door", "title": "To B", "target": "b", "depth": 3 },
        { "kind": "info", "title": "Note", "description": "old", "position": [1, 2, 3] },
        { "kind": "photo", "file": "p.png" },
        { "kind": "video", "title": "Clip", "file": "v.mp4" }
    "#;
    let manifest = parse(&[scene_json("a", tags), scene_json("b", "")]).unwrap();
    let tags = &manifest.scenes[0].tags;
    assert_eq!(tags.len(), 4);
    assert!(matches!(&tags[0].kind, TagEntryKind::Door { target } if target == "b"));
    assert!(matches!(tags[0].placement(), Some(Placement::Camera { depth }) if (depth - 3.0).abs() < f32::EPSILON));
    assert_eq!(tags[1].placement(), Some(Placement::At(Vec3::new(1.0, 2.0, 3.0))));
    assert_eq!(tags[2].title, "");
    assert_eq!(tags[2].placement(), None);
}

#[test]
fn duplicate_keys_are_rejected() {
    let err = parse(&[scene_json("a", ""), scene_json("a", "")]).unwrap_err();
    assert!(matches!(err, CliError::DuplicateSceneKey(key) if key == "a"));
}

#[test]
fn door_to_unknown_key_is_rejected() {
    let err = parse(&[scene_json("a", r#"{ "kind": "door", "target": "nowhere" }"#)]).unwrap_err();
    assert!(matches!(err, CliError::UnknownSceneKey { key, .. } if key == "nowhere"));
}

#[test]
fn non_positive_depth_is_rejected() {
    let err = parse(&[scene_json("a", r#"{ "kind": "info", "depth": 0 }"#)]).unwrap_err();
    assert!(matches!(err, CliError::InvalidTag { .. }));
}

#[test]
fn unknown_scene_fields_are_rejected() {
    let text = r#"{ "scenes": [{ "key": "a", "file": "a.jpg", "colour": "red" }] }"#;
    assert!(matches!(Manifest::parse(text), Err(CliError::InvalidManifest(_))));
}

#[test]
fn camera_forward_defaults_to_neg_z() {
    let text = r#"{ "scenes": [{ "key": "a", "file": "a.jpg", "camera": { "position": [0, 1.6, 0] } }] }"#;
    let manifest = Manifest::parse(text).unwrap();
    let pose: CameraPose = manifest.scenes[0].camera.unwrap().into();
    assert_eq!(pose.forward, Vec3::NEG_Z);
}

#[test]
fn relative_paths_resolve_against_manifest_dir() {
    let dir = Path::new("tours/museum");
    assert_eq!(resolve_path(dir, Path::new("hall.jpg")), PathBuf::from("tours/museum/hall.jpg"));
}
