//! WASM entry points for the browser viewer.
//!
//! Only compiled for `wasm32`. There is no file system in the browser, so
//! the state starts without a catalog and files arrive via `UploadFile`.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::dispatch;
use crate::messages::{UiToViewer, ViewerToUi};
use crate::viewer_state::ViewerState;

thread_local! {
    static VIEWER_STATE: RefCell<Option<ViewerState>> = RefCell::new(None);
}

/// Initialize the viewer. Calling it again resets all state.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();

    VIEWER_STATE.with(|cell| {
        *cell.borrow_mut() = Some(ViewerState::new(None));
    });
}

/// Process a JSON `UiToViewer` message and return a JSON `ViewerToUi`.
#[wasm_bindgen]
pub fn process_message(json_input: &str) -> String {
    let response = VIEWER_STATE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let Some(state) = slot.as_mut() else {
            return ViewerToUi::Error {
                message: "viewer not initialized, call init() first".to_string(),
            };
        };

        match serde_json::from_str::<UiToViewer>(json_input) {
            Ok(msg) => dispatch::dispatch(state, msg),
            Err(e) => ViewerToUi::Error {
                message: format!("Failed to parse message: {}", e),
            },
        }
    });

    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(
            r#"{{"type":"Error","message":"Serialization failed: {}"}}"#,
            e
        )
    })
}
