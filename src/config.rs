//! Editor configuration parsed from environment variables.

use crate::consts::{AFRAME_SRC, DEFAULT_TAG_DEPTH};

pub const DEFAULT_EXPORT_TITLE: &str = "Exported Scenes";
pub const DEFAULT_EXPORT_LANG: &str = "en";
pub const DEFAULT_SCENE_NAME_PREFIX: &str = "Scene";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Parse { key: &'static str, value: String, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Script URL of the rendering engine referenced by exported documents.
    pub aframe_src: String,
    pub export_title: String,
    pub export_lang: String,
    /// Generated scene names are `"{prefix} {n}"`.
    pub scene_name_prefix: String,
    /// Depth used for camera placement when the caller gives none.
    pub tag_depth: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            aframe_src: AFRAME_SRC.to_owned(),
            export_title: DEFAULT_EXPORT_TITLE.to_owned(),
            export_lang: DEFAULT_EXPORT_LANG.to_owned(),
            scene_name_prefix: DEFAULT_SCENE_NAME_PREFIX.to_owned(),
            tag_depth: DEFAULT_TAG_DEPTH,
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `VRTOUR_AFRAME_SRC`: engine script URL, default A-Frame 1.6.0
    /// - `VRTOUR_EXPORT_TITLE`: default `Exported Scenes`
    /// - `VRTOUR_EXPORT_LANG`: default `en`
    /// - `VRTOUR_SCENE_NAME_PREFIX`: default `Scene`
    /// - `VRTOUR_TAG_DEPTH`: positive number, default 2
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `VRTOUR_TAG_DEPTH` is not a positive
    /// finite number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(v) => Some(v),
            Err(_) => None,
        })
    }

    /// Same as [`EditorConfig::from_env`] with an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`EditorConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };
        let tag_depth = match lookup("VRTOUR_TAG_DEPTH") {
            None => defaults.tag_depth,
            Some(raw) => parse_depth(&raw)?,
        };
        Ok(Self {
            aframe_src: text("VRTOUR_AFRAME_SRC", defaults.aframe_src),
            export_title: text("VRTOUR_EXPORT_TITLE", defaults.export_title),
            export_lang: text("VRTOUR_EXPORT_LANG", defaults.export_lang),
            scene_name_prefix: text("VRTOUR_SCENE_NAME_PREFIX", defaults.scene_name_prefix),
            tag_depth,
        })
    }
}

fn parse_depth(raw: &str) -> Result<f32, ConfigError> {
    let err = |reason| ConfigError::Parse { key: "VRTOUR_TAG_DEPTH", value: raw.to_owned(), reason };
    let depth = raw.trim().parse::<f32>().map_err(|_| err("not a number"))?;
    if !crate::placement::is_valid_depth(depth) {
        return Err(err("must be positive"));
    }
    Ok(depth)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
