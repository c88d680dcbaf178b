mod manifest;
mod media;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tokio::io::AsyncWriteExt;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vrtour::config::{ConfigError, EditorConfig};
use vrtour::editor::EditorCore;
use vrtour::error::TourError;
use vrtour::render::ElementTree;
use vrtour::tag::TagPayload;

use crate::manifest::{Manifest, SceneKeys, TagEntryKind, resolve_path};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manifest: {0}")]
    InvalidManifest(#[from] serde_json::Error),
    #[error("duplicate scene key `{0}`")]
    DuplicateSceneKey(String),
    #[error("scene `{scene}` refers to unknown scene key `{key}`")]
    UnknownSceneKey { scene: String, key: String },
    #[error("invalid tag in scene `{scene}`: {reason}")]
    InvalidTag { scene: String, reason: &'static str },
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Tour(#[from] TourError),
    #[error("media task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Parser, Debug)]
#[command(name = "vrtour", about = "Build standalone panoramic tours from a JSON manifest")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the tour as a single HTML document.
    Build {
        manifest: PathBuf,
        /// Output file; stdout when omitted.
        #[arg(long, short, env = "VRTOUR_OUT")]
        out: Option<PathBuf>,
        /// Document title, overriding `VRTOUR_EXPORT_TITLE`.
        #[arg(long)]
        title: Option<String>,
    },
    /// Print scenes, tags and door edges as JSON.
    Inspect { manifest: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = EditorConfig::from_env()?;

    match cli.command {
        Command::Build { manifest, out, title } => {
            if let Some(title) = title {
                config.export_title = title;
            }
            run_build(&manifest, out.as_deref(), config).await
        }
        Command::Inspect { manifest } => run_inspect(&manifest, config).await,
    }
}

async fn run_build(manifest: &Path, out: Option<&Path>, config: EditorConfig) -> Result<(), CliError> {
    let mut editor = replay(manifest, config).await?;
    let document = editor.export_document();
    match out {
        Some(path) => {
            tokio::fs::write(path, document.as_bytes())
                .await
                .map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
            info!(out = %path.display(), bytes = document.len(), "build: written");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(document.as_bytes())
                .await
                .map_err(|source| CliError::Io { path: PathBuf::from("<stdout>"), source })?;
            stdout
                .flush()
                .await
                .map_err(|source| CliError::Io { path: PathBuf::from("<stdout>"), source })?;
        }
    }
    Ok(())
}

async fn run_inspect(manifest: &Path, config: EditorConfig) -> Result<(), CliError> {
    let editor = replay(manifest, config).await?;
    print_json(&summary(&editor))
}

/// Replay a manifest against a fresh editor: load every scene's media,
/// apply names and camera poses, create tags, then display the first scene.
async fn replay(path: &Path, config: EditorConfig) -> Result<EditorCore, CliError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
    let manifest = Manifest::parse(&text)?;
    let dir = path.parent().map_or_else(PathBuf::new, Path::to_path_buf);
    let mut editor = EditorCore::new(ElementTree::new(), config);

    // All backgrounds decode concurrently; completions are applied in
    // manifest order so scene ids and names follow the manifest.
    let mut loads = Vec::with_capacity(manifest.scenes.len());
    for scene in &manifest.scenes {
        let ticket = editor.begin_add_scene();
        let handle = tokio::spawn(media::load(resolve_path(&dir, &scene.file)));
        loads.push((ticket, handle));
    }

    let mut keys = SceneKeys::default();
    for (scene, (ticket, handle)) in manifest.scenes.iter().zip(loads) {
        let loaded = handle.await?;
        let id = editor.complete_load(ticket, loaded)?;
        keys.insert(&scene.key, id);
        if let Some(name) = &scene.name {
            editor.rename_scene(id, name)?;
        }
        if let Some(camera) = scene.camera {
            editor.graph_mut().set_camera(id, Some(camera.into()));
        }
    }

    for scene in &manifest.scenes {
        let id = keys.resolve(&scene.key, &scene.key)?;
        for tag in &scene.tags {
            let payload = match &tag.kind {
                TagEntryKind::Door { target } => TagPayload::Door { target: keys.resolve(&scene.key, target)? },
                TagEntryKind::Info { description } => TagPayload::Info { description: description.clone() },
                TagEntryKind::Photo { file } => TagPayload::Photo { src: tag_media(&dir, file).await? },
                TagEntryKind::Video { file } => TagPayload::Video { src: tag_media(&dir, file).await? },
            };
            let placement = tag.placement().unwrap_or_else(|| editor.default_placement());
            editor.create_tag(id, &tag.title, placement, payload)?;
        }
    }

    if let Some(first) = manifest.scenes.first() {
        editor.activate(keys.resolve(&first.key, &first.key)?)?;
    }
    info!(
        scenes = editor.registry().user_scene_count(),
        doors = editor.registry().door_edges().len(),
        "replay: done"
    );
    Ok(editor)
}

async fn tag_media(dir: &Path, file: &Path) -> Result<String, CliError> {
    match media::load(resolve_path(dir, file)).await {
        Ok(source) => Ok(source.src),
        Err(failure) => Err(CliError::Tour(TourError::MediaDecode {
            file_name: failure.file_name,
            reason: failure.reason,
        })),
    }
}

fn summary(editor: &EditorCore) -> Value {
    let registry = editor.registry();
    let scenes: Vec<Value> = registry
        .user_scenes()
        .map(|scene| {
            let tags: Vec<Value> = scene
                .tags()
                .iter()
                .map(|tag| {
                    json!({
                        "id": tag.id.get(),
                        "kind": tag.kind(),
                        "title": tag.title,
                        "element": tag.element_id(),
                        "position": tag.position,
                        "target": tag.door_target().map(|t| t.to_string()),
                    })
                })
                .collect();
            json!({
                "id": scene.id.to_string(),
                "name": scene.name,
                "file": scene.media.as_ref().map(|m| m.file_name.as_str()),
                "media": scene.media.as_ref().map(vrtour::media::MediaSource::kind),
                "tags": tags,
            })
        })
        .collect();
    let edges = |edges: Vec<vrtour::scene::DoorEdge>| -> Vec<Value> {
        edges
            .into_iter()
            .map(|e| json!({ "scene": e.scene.to_string(), "tag": e.tag.get(), "target": e.target.to_string() }))
            .collect()
    };
    json!({
        "active": registry.active().map(|id| id.to_string()),
        "scenes": scenes,
        "doors": edges(registry.door_edges()),
        "dangling": edges(registry.dangling_edges()),
    })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
