//! Tags: interactive markers placed inside a scene.
//!
//! All variants share the same base record ([`Tag`]) and differ only in their
//! [`TagPayload`]. Rendering is a `match` over the payload producing the
//! variant's marker plus any secondary panel anchored near it.
//!
//! Tags are never edited in place. Re-creating is the only update path, and
//! a tag is only ever destroyed together with its owning scene.

#[cfg(test)]
#[path = "tag_test.rs"]
mod tag_test;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DOOR_BOX_POSITION, DOOR_COLOR, DOOR_DEPTH, DOOR_HEIGHT, DOOR_MARKER_RADIUS, DOOR_PANEL_OFFSET, DOOR_WIDTH,
    INFO_BACKING_HEIGHT, INFO_BACKING_MATERIAL, INFO_BACKING_POSITION, INFO_BACKING_WIDTH, INFO_DESCRIPTION_COLOR,
    INFO_DESCRIPTION_POSITION, INFO_MARKER_RADIUS, INFO_PANEL_OFFSET, INFO_TITLE_POSITION, MARKER_COLOR, PHOTO_HEIGHT,
    PHOTO_WIDTH, TEXT_FONT, VIDEO_HEIGHT, VIDEO_WIDTH,
};
use crate::ids::{SceneId, TagId};
use crate::placement::{compute_anchor_offset, format_position};
use crate::render::{Activation, Element};

/// The closed set of tag variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Door,
    Info,
    Photo,
    Video,
}

/// Variant-specific data carried by a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TagPayload {
    /// Navigates to `target` when activated.
    Door { target: SceneId },
    /// Free text shown under the title.
    Info { description: String },
    /// Image source.
    Photo { src: String },
    /// Video source; always autoplays and loops.
    Video { src: String },
}

impl TagPayload {
    #[must_use]
    pub fn kind(&self) -> TagKind {
        match self {
            Self::Door { .. } => TagKind::Door,
            Self::Info { .. } => TagKind::Info,
            Self::Photo { .. } => TagKind::Photo,
            Self::Video { .. } => TagKind::Video,
        }
    }
}

/// A marker owned by exactly one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique within the owning scene.
    pub id: TagId,
    /// Owning scene.
    pub scene: SceneId,
    pub title: String,
    pub position: Vec3,
    #[serde(flatten)]
    pub payload: TagPayload,
}

/// Elements making up a tag in the scene graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagVisual {
    /// Top-level elements appended to the scene root, marker first.
    pub elements: Vec<Element>,
    /// Id of the element that receives activation (clicks).
    pub primary_id: String,
}

impl Tag {
    #[must_use]
    pub fn kind(&self) -> TagKind {
        self.payload.kind()
    }

    /// Scene a door leads to; `None` for other variants.
    #[must_use]
    pub fn door_target(&self) -> Option<SceneId> {
        match self.payload {
            TagPayload::Door { target } => Some(target),
            _ => None,
        }
    }

    /// Element id of the tag's marker.
    #[must_use]
    pub fn element_id(&self) -> String {
        self.id.element_id(self.scene)
    }

    /// Element id receiving activation: the door box for doors, the marker
    /// itself for every other variant.
    #[must_use]
    pub fn primary_element_id(&self) -> String {
        match self.payload {
            TagPayload::Door { .. } => format!("{}-door", self.element_id()),
            _ => self.element_id(),
        }
    }

    /// What activating the primary element does.
    #[must_use]
    pub fn activation(&self) -> Activation {
        match self.payload {
            TagPayload::Door { target } => Activation::Navigate { tag: self.id, target },
            _ => Activation::Select(self.id),
        }
    }

    /// Build the marker and any secondary panel for this tag.
    #[must_use]
    pub fn visual(&self) -> TagVisual {
        let marker_id = self.element_id();
        let primary_id = self.primary_element_id();
        let position = format_position(self.position);
        match &self.payload {
            TagPayload::Door { target } => {
                let marker = marker_sphere(&marker_id, &position, DOOR_MARKER_RADIUS);
                let panel = panel(&marker_id, compute_anchor_offset(self.position, DOOR_PANEL_OFFSET)).child(
                    Element::new("a-box")
                        .attr("id", primary_id.as_str())
                        .attr("position", DOOR_BOX_POSITION)
                        .attr("color", DOOR_COLOR)
                        .attr("width", DOOR_WIDTH)
                        .attr("height", DOOR_HEIGHT)
                        .attr("depth", DOOR_DEPTH)
                        .attr("look-at-camera", "")
                        .attr("class", "door")
                        .attr("data-title", self.title.as_str())
                        .attr("data-target-scene", target.to_string()),
                );
                TagVisual { elements: vec![marker, panel], primary_id }
            }
            TagPayload::Info { description } => {
                let marker = marker_sphere(&marker_id, &position, INFO_MARKER_RADIUS);
                let panel = panel(&marker_id, compute_anchor_offset(self.position, INFO_PANEL_OFFSET))
                    .child(
                        Element::new("a-plane")
                            .attr("width", INFO_BACKING_WIDTH)
                            .attr("height", INFO_BACKING_HEIGHT)
                            .attr("color", "#000000")
                            .attr("material", INFO_BACKING_MATERIAL)
                            .attr("position", INFO_BACKING_POSITION),
                    )
                    .child(
                        Element::new("a-text")
                            .attr("value", self.title.as_str())
                            .attr("position", INFO_TITLE_POSITION)
                            .attr("width", "2.8")
                            .attr("scale", "1.8 1.8 1.8")
                            .attr("align", "center")
                            .attr("color", MARKER_COLOR)
                            .attr("font", TEXT_FONT),
                    )
                    .child(
                        Element::new("a-text")
                            .attr("value", description.as_str())
                            .attr("position", INFO_DESCRIPTION_POSITION)
                            .attr("scale", "1.4 1.4 1.4")
                            .attr("width", "1.6")
                            .attr("align", "center")
                            .attr("color", INFO_DESCRIPTION_COLOR)
                            .attr("font", TEXT_FONT),
                    );
                TagVisual { elements: vec![marker, panel], primary_id }
            }
            TagPayload::Photo { src } => {
                let image = Element::new("a-image")
                    .attr("id", marker_id.as_str())
                    .attr("src", src.as_str())
                    .attr("position", position)
                    .attr("width", PHOTO_WIDTH)
                    .attr("height", PHOTO_HEIGHT)
                    .attr("data-title", self.title.as_str())
                    .attr("dragndrop", "")
                    .attr("look-at-camera", "");
                TagVisual { elements: vec![image], primary_id }
            }
            TagPayload::Video { src } => {
                let video = Element::new("a-video")
                    .attr("id", marker_id.as_str())
                    .attr("src", src.as_str())
                    .attr("position", position)
                    .attr("width", VIDEO_WIDTH)
                    .attr("height", VIDEO_HEIGHT)
                    .attr("autoplay", "true")
                    .attr("loop", "true")
                    .attr("data-title", self.title.as_str())
                    .attr("dragndrop", "")
                    .attr("look-at-camera", "");
                TagVisual { elements: vec![video], primary_id }
            }
        }
    }
}

fn marker_sphere(id: &str, position: &str, radius: &str) -> Element {
    Element::new("a-sphere")
        .attr("id", id)
        .attr("position", position)
        .attr("radius", radius)
        .attr("color", MARKER_COLOR)
        .attr("dragndrop", "")
        .attr("look-at-camera", "")
}

/// Secondary panel entity that follows its marker around when dragged.
fn panel(marker_id: &str, position: Vec3) -> Element {
    Element::new("a-entity")
        .attr("id", format!("{marker_id}-panel"))
        .attr("position", format_position(position))
        .attr("follow-mover", format!("target: #{marker_id}"))
        .attr("look-at-camera", "")
}
