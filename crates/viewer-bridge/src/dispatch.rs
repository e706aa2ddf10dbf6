use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use surface_types::{DEFAULT_PAPER_BACKGROUND, PAPER_BACKGROUNDS};
use tracing::debug;

use crate::messages::{UiToViewer, ViewerToUi};
use crate::viewer_state::{BridgeError, ViewerState};

/// Dispatch a UI message to the viewer and return a response.
///
/// Failures never escape: they come back as [`ViewerToUi::Error`] and leave
/// the state as it was before the message.
pub fn dispatch(state: &mut ViewerState, msg: UiToViewer) -> ViewerToUi {
    match handle_message(state, msg) {
        Ok(response) => response,
        Err(e) => ViewerToUi::Error {
            message: e.to_string(),
        },
    }
}

fn handle_message(state: &mut ViewerState, msg: UiToViewer) -> Result<ViewerToUi, BridgeError> {
    debug!(?msg, "ui message");
    match msg {
        UiToViewer::ListFiles => {
            let (car_models, ply_files) = state.list_files()?;
            Ok(ViewerToUi::FileList {
                car_models,
                ply_files,
            })
        }

        UiToViewer::GetPalette => Ok(ViewerToUi::Palette {
            backgrounds: PAPER_BACKGROUNDS.iter().map(|s| s.to_string()).collect(),
            default: DEFAULT_PAPER_BACKGROUND.to_string(),
        }),

        UiToViewer::SelectFile { identifier, format } => {
            state.select(identifier, format);
            Ok(selection_response(state))
        }

        UiToViewer::ClearSelection => {
            state.clear_selection();
            Ok(selection_response(state))
        }

        UiToViewer::UploadFile {
            identifier,
            format,
            data_base64,
        } => {
            let bytes = STANDARD
                .decode(data_base64.as_bytes())
                .map_err(|e| BridgeError::Decode {
                    reason: e.to_string(),
                })?;
            state.upload(identifier, format, &bytes)?;
            Ok(selection_response(state))
        }

        UiToViewer::SetControls { controls } => {
            state.set_controls(controls)?;
            Ok(ViewerToUi::ControlsChanged {
                controls: state.controls.clone(),
            })
        }

        UiToViewer::Render => {
            let scene = state.render()?;
            Ok(ViewerToUi::SceneReady { scene })
        }

        UiToViewer::Export => {
            let (file_name, html) = state.export()?;
            Ok(ViewerToUi::ExportReady {
                file_name,
                html_base64: STANDARD.encode(html.as_bytes()),
            })
        }
    }
}

fn selection_response(state: &ViewerState) -> ViewerToUi {
    ViewerToUi::SelectionChanged {
        selection: state.selection.clone(),
    }
}
