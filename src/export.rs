//! Export serializer: the whole tour as one standalone document.
//!
//! Scenes are written in registry order (default scene excluded) and tags in
//! creation order, exactly as they sit in the element tree. The output has no
//! timestamps or random ids, so exporting twice without an intervening edit
//! yields byte-identical documents.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use tracing::{info, warn};

use crate::config::EditorConfig;
use crate::consts::EXPORT_SCENE_STYLE;
use crate::render::{SceneGraph, camera_element_id, escape_attr};
use crate::scene::SceneRegistry;

/// Serialize every non-default scene into a standalone document.
///
/// Before serializing, each scene's camera is switched to look-only controls
/// (look navigation on, walk navigation off). The registry is not modified.
pub fn export_document<G: SceneGraph + ?Sized>(
    registry: &SceneRegistry,
    graph: &mut G,
    config: &EditorConfig,
) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html><html lang=\"");
    out.push_str(&escape_attr(&config.export_lang));
    out.push_str("\"><head><meta charset=\"UTF-8\">");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    out.push_str("<title>");
    out.push_str(&escape_attr(&config.export_title));
    out.push_str("</title><script src=\"");
    out.push_str(&escape_attr(&config.aframe_src));
    out.push_str("\"></script><style>");
    out.push_str(EXPORT_SCENE_STYLE);
    out.push_str("</style></head><body>");

    let mut exported = 0usize;
    for scene in registry.user_scenes() {
        let camera = camera_element_id(scene.id);
        graph.set_attribute(scene.id, &camera, "wasd-controls", "enabled: false");
        graph.set_attribute(scene.id, &camera, "look-controls", "enabled: true");
        match graph.outer_markup(scene.id) {
            Some(markup) => {
                out.push_str(&markup);
                exported += 1;
            }
            None => warn!(scene = %scene.id, "export: scene not mounted, skipped"),
        }
    }

    out.push_str("</body></html>");
    info!(scenes = exported, bytes = out.len(), "export: document built");
    out
}
