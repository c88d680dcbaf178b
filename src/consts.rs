//! Fixed visual constants for scene backgrounds and tag payloads.

use glam::Vec3;

// ── Placement ───────────────────────────────────────────────────

/// Offset from a door marker to its panel entity.
pub const DOOR_PANEL_OFFSET: Vec3 = Vec3::new(-2.0, 4.0, 0.0);

/// Offset from an info marker to its text panel.
pub const INFO_PANEL_OFFSET: Vec3 = Vec3::new(-2.0, 0.7, 0.0);

/// Depth used when the caller does not pick one.
pub const DEFAULT_TAG_DEPTH: f32 = 2.0;

// ── Scenes ──────────────────────────────────────────────────────

/// Flat background of the media-less welcome scene.
pub const WELCOME_SKY_COLOR: &str = "#ECECEC";

// ── Markers ─────────────────────────────────────────────────────

pub const MARKER_COLOR: &str = "#EF2D5E";
pub const DOOR_MARKER_RADIUS: &str = "0.5";
pub const INFO_MARKER_RADIUS: &str = "0.2";

// ── Door panel ──────────────────────────────────────────────────

pub const DOOR_COLOR: &str = "#4CC3D9";
/// Box position relative to the door panel entity.
pub const DOOR_BOX_POSITION: &str = "1 -2 0";
pub const DOOR_WIDTH: &str = "2";
pub const DOOR_HEIGHT: &str = "4";
pub const DOOR_DEPTH: &str = "0.5";

// ── Info panel ──────────────────────────────────────────────────

pub const INFO_BACKING_WIDTH: &str = "3";
pub const INFO_BACKING_HEIGHT: &str = "1.8";
pub const INFO_BACKING_POSITION: &str = "1 -0.7 0.05";
pub const INFO_BACKING_MATERIAL: &str = "opacity: 0.8; transparent: true";
pub const INFO_TITLE_POSITION: &str = "1 -0.3 0.1";
pub const INFO_DESCRIPTION_POSITION: &str = "1 -0.6 0.1";
pub const INFO_DESCRIPTION_COLOR: &str = "#FFFFFF";
pub const TEXT_FONT: &str = "https://cdn.aframe.io/fonts/mozillavr.fnt";

// ── Media tags ──────────────────────────────────────────────────

pub const PHOTO_WIDTH: &str = "2";
pub const PHOTO_HEIGHT: &str = "2";
pub const VIDEO_WIDTH: &str = "4";
pub const VIDEO_HEIGHT: &str = "2.25";

// ── Export ──────────────────────────────────────────────────────

/// Rendering engine script referenced by exported documents.
pub const AFRAME_SRC: &str = "https://aframe.io/releases/1.6.0/aframe.min.js";

/// Full-viewport, horizontally mirrored scene style for exported documents.
pub const EXPORT_SCENE_STYLE: &str =
    "a-scene { width: 100vw; height: 100vh; position: absolute; top: 0; left: 0; transform: scaleX(-1); }";
