use serde::{Deserialize, Serialize};
use surface_plot::Scene;
use surface_types::MeshFormat;

use crate::controls::ViewerControls;
use crate::viewer_state::Selection;

/// Messages from the UI (JavaScript main thread) to the viewer.
/// Serialized as JSON for postMessage transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiToViewer {
    /// List the identifiers available in each sample directory.
    ListFiles,
    /// Background colors the control panel may offer.
    GetPalette,
    /// Choose a file to display. Replaces any previous selection.
    SelectFile {
        identifier: String,
        format: MeshFormat,
    },
    ClearSelection,
    /// A file picked by the user, base64 encoded. It becomes the selection.
    UploadFile {
        identifier: String,
        format: MeshFormat,
        data_base64: String,
    },
    SetControls {
        controls: ViewerControls,
    },
    /// Build the scene for the current selection.
    Render,
    /// Build the scene and wrap it in a standalone HTML document.
    Export,
}

/// Messages from the viewer back to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ViewerToUi {
    FileList {
        car_models: Vec<String>,
        ply_files: Vec<String>,
    },
    Palette {
        backgrounds: Vec<String>,
        default: String,
    },
    SelectionChanged {
        selection: Option<Selection>,
    },
    ControlsChanged {
        controls: ViewerControls,
    },
    SceneReady {
        scene: Scene,
    },
    /// `html_base64` is the document body, ready for a download link.
    ExportReady {
        file_name: String,
        html_base64: String,
    },
    Error {
        message: String,
    },
}
