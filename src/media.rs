//! Media sources and pending loads.
//!
//! Decoding a selected file is the only asynchronous step in the editor. A
//! host starts a load and receives a [`LoadTicket`]; the registry is left
//! untouched until the host reports completion for that ticket. Loads are
//! not ordered against each other: when two replacements for the same scene
//! are in flight, whichever completes last wins.

#[cfg(test)]
#[path = "media_test.rs"]
mod media_test;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::SceneId;

/// Background or tag media family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// An embeddable media source (typically a data URI) and the name of the
/// file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSource {
    pub src: String,
    pub file_name: String,
}

impl MediaSource {
    #[must_use]
    pub fn new(src: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self { src: src.into(), file_name: file_name.into() }
    }

    /// Video when the source is a `data:video/...` URI or the file name has a
    /// common video extension; image otherwise.
    #[must_use]
    pub fn kind(&self) -> MediaKind {
        if self.src.starts_with("data:video/") {
            return MediaKind::Video;
        }
        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "mp4" | "webm" | "ogv" | "mov" | "m4v" => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }
}

/// Handle for a load that has been requested but not completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(pub(crate) u64);

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a completed load will be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTarget {
    /// Create a new scene from the media.
    NewScene,
    /// Swap the background of an existing scene.
    Replace(SceneId),
}

/// Why the media collaborator could not produce a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeFailure {
    pub file_name: String,
    pub reason: String,
}

impl DecodeFailure {
    #[must_use]
    pub fn new(file_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { file_name: file_name.into(), reason: reason.into() }
    }
}

/// Loads that have been started but not yet completed.
#[derive(Debug, Default)]
pub struct PendingLoads {
    next: u64,
    pending: HashMap<LoadTicket, LoadTarget>,
}

impl PendingLoads {
    pub fn begin(&mut self, target: LoadTarget) -> LoadTicket {
        self.next += 1;
        let ticket = LoadTicket(self.next);
        self.pending.insert(ticket, target);
        ticket
    }

    /// Remove a ticket, returning what it was for. Each ticket completes once.
    pub fn take(&mut self, ticket: LoadTicket) -> Option<LoadTarget> {
        self.pending.remove(&ticket)
    }
}
