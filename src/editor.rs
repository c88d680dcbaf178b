use serde::Serialize;
use tracing::{info, warn};

use crate::config::EditorConfig;
use crate::error::{ErrorCode, TourError};
use crate::export;
use crate::ids::{SceneId, TagId};
use crate::media::{DecodeFailure, LoadTarget, LoadTicket, MediaSource, PendingLoads};
use crate::nav::{self, NavState};
use crate::placement::{self, Placement};
use crate::render::{Activation, ElementTree, SceneGraph, background, scene_root};
use crate::scene::{Scene, SceneRegistry};
use crate::tag::{Tag, TagPayload};

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

/// Severity of a status surface message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// The message currently shown on the editor's single status surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    /// Error code for failures; `None` for informational messages.
    pub code: Option<&'static str>,
    pub message: String,
}

/// Result of activating (clicking) an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The element has no activation registered.
    None,
    /// A door switched the active scene.
    Navigated { from: Option<SceneId>, to: SceneId },
    /// A marker was selected in the tag selector.
    TagSelected(TagId),
}

/// Editor state: the scene registry, the rendering collaborator, pending
/// media loads, and the status surface.
///
/// Every public operation is a discrete unit of work that either fully
/// applies or returns an error with no visible effect. Failures are also
/// written to the status surface ([`EditorCore::status`]).
#[derive(Debug)]
pub struct EditorCore<G: SceneGraph = ElementTree> {
    registry: SceneRegistry,
    graph: G,
    config: EditorConfig,
    loads: PendingLoads,
    status: Option<Notice>,
}

impl Default for EditorCore<ElementTree> {
    fn default() -> Self {
        Self::new(ElementTree::new(), EditorConfig::default())
    }
}

impl<G: SceneGraph> EditorCore<G> {
    /// Start a session: empty registry, welcome scene mounted and displayed,
    /// navigation in [`NavState::None`].
    pub fn new(mut graph: G, config: EditorConfig) -> Self {
        let registry = SceneRegistry::new(config.scene_name_prefix.as_str());
        for scene in registry.scenes() {
            graph.mount(scene.id, scene_root(scene.id, &scene.name, scene.media.as_ref()));
        }
        graph.set_visible(SceneId::DEFAULT, true);
        Self { registry, graph, config, loads: PendingLoads::default(), status: None }
    }

    // --- Scenes ---

    /// Create a scene from decoded media, mount it, and display it.
    pub fn add_scene(&mut self, media: MediaSource) -> SceneId {
        let scene = self.registry.add_scene(media);
        let id = scene.id;
        let root = scene_root(id, &scene.name, scene.media.as_ref());
        let name = scene.name.clone();
        self.graph.mount(id, root);
        if let Err(e) = nav::activate(&mut self.registry, &mut self.graph, id) {
            warn!(error = %e, scene = %id, "scene: new scene not displayed");
        }
        info!(scene = %id, %name, "scene: added");
        self.notify(format!("{name} created"));
        id
    }

    /// Rename a scene. The registry, every selector label, and the scene's
    /// `data-name` attribute change together.
    ///
    /// # Errors
    ///
    /// [`TourError::SceneNotFound`] for unknown ids or the default scene.
    pub fn rename_scene(&mut self, id: SceneId, name: &str) -> Result<(), TourError> {
        if !self.registry.rename_scene(id, name) {
            return Err(self.fail(TourError::SceneNotFound(id)));
        }
        self.graph.set_attribute(id, &id.to_string(), "data-name", name);
        info!(scene = %id, %name, "scene: renamed");
        Ok(())
    }

    /// Swap a scene's background media, keeping its id and name.
    ///
    /// # Errors
    ///
    /// [`TourError::SceneNotFound`] for unknown ids or the default scene.
    pub fn replace_media(&mut self, id: SceneId, media: MediaSource) -> Result<(), TourError> {
        let element = background(id, Some(&media));
        let file_name = media.file_name.clone();
        if !self.registry.replace_media(id, media) {
            return Err(self.fail(TourError::SceneNotFound(id)));
        }
        self.graph.replace(id, element);
        info!(scene = %id, file = %file_name, "scene: media replaced");
        Ok(())
    }

    /// Delete a scene and its tags. Doors in other scenes that lead to it
    /// stay in place. If it was active, the welcome scene is displayed.
    ///
    /// # Errors
    ///
    /// [`TourError::SceneNotFound`] for unknown ids or the default scene.
    pub fn remove_scene(&mut self, id: SceneId) -> Result<Scene, TourError> {
        let was_active = self.registry.active() == Some(id);
        let Some(removed) = self.registry.remove_scene(id) else {
            return Err(self.fail(TourError::SceneNotFound(id)));
        };
        self.graph.unmount(id);
        if was_active {
            if let Err(e) = nav::activate(&mut self.registry, &mut self.graph, SceneId::DEFAULT) {
                warn!(error = %e, "scene: welcome scene not displayed");
            }
        }
        let dangling = self
            .registry
            .dangling_edges()
            .iter()
            .filter(|e| e.target == id)
            .count();
        info!(scene = %id, tags = removed.tags().len(), dangling, "scene: removed");
        self.notify(format!("{} deleted", removed.name));
        Ok(removed)
    }

    // --- Media loads ---

    /// Start loading media for a new scene. Nothing changes until
    /// [`EditorCore::complete_load`] is called with the returned ticket.
    pub fn begin_add_scene(&mut self) -> LoadTicket {
        self.loads.begin(LoadTarget::NewScene)
    }

    /// Start loading replacement media for an existing scene.
    ///
    /// # Errors
    ///
    /// [`TourError::SceneNotFound`] for unknown ids or the default scene.
    pub fn begin_replace_media(&mut self, id: SceneId) -> Result<LoadTicket, TourError> {
        if !self.registry.is_navigable(id) {
            return Err(self.fail(TourError::SceneNotFound(id)));
        }
        Ok(self.loads.begin(LoadTarget::Replace(id)))
    }

    /// Apply the outcome of a load. Returns the scene that was created or
    /// updated.
    ///
    /// # Errors
    ///
    /// - [`TourError::UnknownLoad`] if the ticket is not pending.
    /// - [`TourError::MediaDecode`] if decoding failed; the load is abandoned.
    /// - [`TourError::SceneNotFound`] if the scene being replaced was deleted
    ///   while the load was in flight.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<MediaSource, DecodeFailure>,
    ) -> Result<SceneId, TourError> {
        let Some(target) = self.loads.take(ticket) else {
            return Err(self.fail(TourError::UnknownLoad(ticket)));
        };
        let media = match result {
            Ok(media) => media,
            Err(failure) => {
                return Err(self.fail(TourError::MediaDecode {
                    file_name: failure.file_name,
                    reason: failure.reason,
                }));
            }
        };
        match target {
            LoadTarget::NewScene => Ok(self.add_scene(media)),
            LoadTarget::Replace(id) => self.replace_media(id, media).map(|()| id),
        }
    }

    // --- Tags ---

    /// Placement used when the caller does not choose one.
    #[must_use]
    pub fn default_placement(&self) -> Placement {
        Placement::Camera { depth: self.config.tag_depth }
    }

    /// Create a tag in `scene`, mount its visual payload, and register its
    /// activation on the primary element.
    ///
    /// # Errors
    ///
    /// - [`TourError::SceneNotFound`] if `scene` is unknown or the default scene.
    /// - [`TourError::InvalidPlacement`] for a depth that is not a positive
    ///   finite number, or a position with non-finite components.
    /// - [`TourError::CameraUnavailable`] for camera placement before the
    ///   scene's camera is ready.
    ///
    /// Either way no tag is created and no id is consumed.
    pub fn create_tag(
        &mut self,
        scene: SceneId,
        title: &str,
        placement: Placement,
        payload: TagPayload,
    ) -> Result<TagId, TourError> {
        if !self.registry.is_navigable(scene) {
            return Err(self.fail(TourError::SceneNotFound(scene)));
        }
        if !placement.is_valid() {
            let detail = match placement {
                Placement::Camera { depth } => format!("depth {depth}"),
                Placement::At(at) => format!("position {}", placement::format_position(at)),
            };
            return Err(self.fail(TourError::InvalidPlacement { scene, detail }));
        }
        let camera = self.graph.camera_pose(scene);
        let Some(position) = placement::resolve(placement, camera.as_ref()) else {
            return Err(self.fail(TourError::CameraUnavailable(scene)));
        };
        let title = title.to_owned();
        let Some(tag) = self
            .registry
            .insert_tag(scene, |id| Tag { id, scene, title, position, payload })
        else {
            return Err(self.fail(TourError::SceneNotFound(scene)));
        };
        let (id, kind, activation, visual) = (tag.id, tag.kind(), tag.activation(), tag.visual());
        for element in visual.elements {
            self.graph.append(scene, element);
        }
        self.graph.listen(scene, &visual.primary_id, activation);
        info!(%scene, tag = %id, ?kind, x = position.x, y = position.y, z = position.z, "tag: created");
        Ok(id)
    }

    /// Select a tag of the active scene in the tag selector.
    pub fn select_tag(&mut self, tag: TagId) -> bool {
        self.registry.select_tag(tag)
    }

    // --- Navigation ---

    /// Display `target` (scene dropdown selection or programmatic jump).
    ///
    /// # Errors
    ///
    /// [`TourError::SceneNotFound`] if `target` is unknown; nothing changes
    /// and the refusal is posted as a warning.
    pub fn activate(&mut self, target: SceneId) -> Result<NavState, TourError> {
        nav::activate(&mut self.registry, &mut self.graph, target)
            .map_err(|e| self.post(NoticeLevel::Warning, e))
    }

    /// Dispatch a click on `element_id` inside `scene`.
    ///
    /// # Errors
    ///
    /// [`TourError::DanglingNavigation`] when a door's target no longer
    /// exists; the active scene is unchanged.
    pub fn activate_element(&mut self, scene: SceneId, element_id: &str) -> Result<Action, TourError> {
        let Some(activation) = self.graph.activation(scene, element_id) else {
            return Ok(Action::None);
        };
        match activation {
            Activation::Navigate { tag, target } => {
                let from = self.registry.active();
                nav::follow_door(&mut self.registry, &mut self.graph, scene, tag, target)
                    .map_err(|e| self.fail(e))?;
                Ok(Action::Navigated { from, to: target })
            }
            Activation::Select(tag) => {
                self.registry.select_tag(tag);
                Ok(Action::TagSelected(tag))
            }
        }
    }

    /// Activate a tag as if its primary element was clicked.
    ///
    /// # Errors
    ///
    /// [`TourError::SceneNotFound`] if the scene is unknown, plus everything
    /// [`EditorCore::activate_element`] returns.
    pub fn activate_tag(&mut self, scene: SceneId, tag: TagId) -> Result<Action, TourError> {
        let Some(element_id) = self
            .registry
            .get(scene)
            .and_then(|s| s.tag(tag))
            .map(Tag::primary_element_id)
        else {
            return Err(self.fail(TourError::SceneNotFound(scene)));
        };
        self.activate_element(scene, &element_id)
    }

    // --- Export ---

    /// Serialize all non-default scenes into one standalone document.
    pub fn export_document(&mut self) -> String {
        export::export_document(&self.registry, &mut self.graph, &self.config)
    }

    // --- Queries ---

    #[must_use]
    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    #[must_use]
    pub fn nav_state(&self) -> NavState {
        NavState::of(&self.registry)
    }

    #[must_use]
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Mutable access for host-driven updates (camera movement, etc.).
    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current status surface message.
    #[must_use]
    pub fn status(&self) -> Option<&Notice> {
        self.status.as_ref()
    }

    // --- Status surface ---

    fn notify(&mut self, message: String) {
        self.status = Some(Notice { level: NoticeLevel::Info, code: None, message });
    }

    fn fail(&mut self, err: TourError) -> TourError {
        let level = if err.is_warning() { NoticeLevel::Warning } else { NoticeLevel::Error };
        self.post(level, err)
    }

    fn post(&mut self, level: NoticeLevel, err: TourError) -> TourError {
        warn!(code = err.error_code(), error = %err, ?level, "editor: operation refused");
        self.status = Some(Notice { level, code: Some(err.error_code()), message: err.to_string() });
        err
    }
}
