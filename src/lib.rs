//! Interactive viewport and selection-gesture engine for an emoji art canvas.
//!
//! Users drop emoji glyphs and a background image onto a pannable, zoomable
//! canvas, then move, rescale, and delete them with touch gestures. This
//! crate owns the interaction state machine behind that: it turns a stream of
//! gesture phases into viewport changes and document mutations, keeping
//! transient in-flight deltas apart from committed state. The host is
//! responsible only for recognizing gestures, persisting the resulting
//! [`engine::Action`]s, and drawing what [`render`] asks for.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Gesture router ([`engine::EngineCore`]) and the actions it emits |
//! | [`viewport`] | Steady and transient pan/zoom, fit-to-content |
//! | [`selection`] | Set of selected item ids |
//! | [`input`] | Gesture events and frozen per-gesture routing state |
//! | [`camera`] | Geometry types and screen/document coordinate mapping |
//! | [`drop`] | Drop payload classification and resolution |
//! | [`doc`] | Document items, the `Document` trait, and the in-memory store |
//! | [`hit`] | Hit-testing screen points against items |
//! | [`render`] | Scene placement through the `Renderer` trait |
//! | [`config`] | Engine configuration from the environment |
//! | [`consts`] | Shared numeric constants (default sizes, tap counts) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod drop;
pub mod engine;
pub mod hit;
pub mod input;
pub mod render;
pub mod selection;
pub mod viewport;
