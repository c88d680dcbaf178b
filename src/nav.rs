//! Navigation controller: the active-scene state machine.
//!
//! The machine starts in [`NavState::None`] and moves to
//! [`NavState::Active`] on the first successful activation. There is no
//! terminal state. A transition is guarded by the target resolving to a
//! scene in the registry; a rejected transition changes nothing, neither
//! the registry nor the element tree.
//!
//! Door activation adds a second guard: the target must be a navigable
//! (existing, non-default) scene. Doors whose target was deleted are
//! refused with [`TourError::DanglingNavigation`].

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use tracing::{debug, warn};

use crate::error::TourError;
use crate::ids::{SceneId, TagId};
use crate::render::SceneGraph;
use crate::scene::SceneRegistry;

/// Current state of the navigation machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    /// No scene has been activated yet.
    #[default]
    None,
    /// Exactly one scene is displayed.
    Active(SceneId),
}

impl NavState {
    /// State as recorded by the registry.
    #[must_use]
    pub fn of(registry: &SceneRegistry) -> Self {
        registry.active().map_or(Self::None, Self::Active)
    }
}

/// Transition to `target`: hide every scene, show the target, make it the
/// registry's active scene, and list its tags in the tag selector.
///
/// # Errors
///
/// Returns [`TourError::SceneNotFound`] if `target` is not in the registry.
pub fn activate<G: SceneGraph + ?Sized>(
    registry: &mut SceneRegistry,
    graph: &mut G,
    target: SceneId,
) -> Result<NavState, TourError> {
    if !registry.contains(target) {
        warn!(%target, "nav: unknown scene");
        return Err(TourError::SceneNotFound(target));
    }
    for scene in registry.scenes() {
        graph.set_visible(scene.id, scene.id == target);
    }
    registry.set_active(target);
    debug!(%target, tags = registry.tag_selector().len(), "nav: activated");
    Ok(NavState::Active(target))
}

/// Follow door `tag` of `scene` to `target`.
///
/// # Errors
///
/// Returns [`TourError::DanglingNavigation`] if `target` is missing or is the
/// default scene; the active scene is unchanged.
pub fn follow_door<G: SceneGraph + ?Sized>(
    registry: &mut SceneRegistry,
    graph: &mut G,
    scene: SceneId,
    tag: TagId,
    target: SceneId,
) -> Result<NavState, TourError> {
    if !registry.is_navigable(target) {
        warn!(%scene, %tag, %target, "nav: door leads nowhere");
        return Err(TourError::DanglingNavigation { scene, tag, target });
    }
    activate(registry, graph, target)
}
