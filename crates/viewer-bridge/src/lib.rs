//! JSON message boundary between a browser UI and the surface viewer.
//!
//! The UI owns widgets and drawing; this crate owns file selection, the
//! mesh cache, control validation and scene production. Every request is a
//! [`UiToViewer`](messages::UiToViewer) and every reply a
//! [`ViewerToUi`](messages::ViewerToUi).

pub mod controls;
pub mod dispatch;
pub mod messages;
pub mod viewer_state;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use controls::{ControlsError, ViewerControls};
pub use dispatch::dispatch;
pub use viewer_state::{BridgeError, Selection, ViewerState};
