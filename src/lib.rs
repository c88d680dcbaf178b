//! Editing core for multi-scene panoramic tours.
//!
//! A tour is a set of scenes (one panorama image or video each) holding
//! interactive tags. Door tags link one scene to another, so the door tags
//! across all scenes form a directed navigation graph. This crate owns the
//! in-memory model and the logic around it: id allocation, tag placement
//! relative to the viewer's camera, the active-scene state machine, and the
//! export of the whole tour as one standalone document. Drawing is delegated
//! to a [`render::SceneGraph`] implementation supplied by the host; the
//! bundled [`render::ElementTree`] keeps the element tree in memory.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | Top-level [`editor::EditorCore`] tying every component together |
//! | [`scene`] | Scene records, selectors, and the [`scene::SceneRegistry`] |
//! | [`tag`] | Tag sum type and per-variant visual payloads |
//! | [`ids`] | Scene/tag identifiers and their allocators |
//! | [`camera`] | Camera pose as reported by the rendering collaborator |
//! | [`placement`] | Camera-relative and anchored 3D placement |
//! | [`nav`] | Active-scene state machine driven by door activation |
//! | [`render`] | Rendering collaborator contract and element tree |
//! | [`media`] | Media sources and pending load tickets |
//! | [`export`] | Standalone document serializer |
//! | [`config`] | Environment-driven editor configuration |
//! | [`error`] | Error taxonomy shared by all operations |
//! | [`consts`] | Fixed visual constants (offsets, sizes, colors) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod editor;
pub mod error;
pub mod export;
pub mod ids;
pub mod media;
pub mod nav;
pub mod placement;
pub mod render;
pub mod scene;
pub mod tag;

pub use editor::EditorCore;
pub use error::TourError;
