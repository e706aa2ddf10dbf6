use mesh_format::{parse_mesh, DataCatalog, LoadError, MeshCache};
use serde::{Deserialize, Serialize};
use surface_plot::{render_loaded, to_html, ExportError, PlotError, Scene, SegmentedColormap};
use surface_types::MeshFormat;
use tracing::{debug, info};

use crate::controls::{ControlsError, ViewerControls};

/// The file currently shown in the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub identifier: String,
    pub format: MeshFormat,
}

/// Everything the viewer remembers between messages.
///
/// Only the selected mesh is kept in the cache: switching files drops the
/// previous one.
pub struct ViewerState {
    /// Sample directories. `None` when running without a file system, in
    /// which case only uploaded files can be shown.
    pub catalog: Option<DataCatalog>,
    pub cache: MeshCache,
    pub selection: Option<Selection>,
    pub controls: ViewerControls,
    pub colormap: SegmentedColormap,
}

impl ViewerState {
    pub fn new(catalog: Option<DataCatalog>) -> Self {
        Self {
            catalog,
            cache: MeshCache::new(),
            selection: None,
            controls: ViewerControls::default(),
            colormap: SegmentedColormap::rd_bu(),
        }
    }

    /// Identifiers in the car model and PLY directories, in that order.
    pub fn list_files(&self) -> Result<(Vec<String>, Vec<String>), BridgeError> {
        match &self.catalog {
            Some(catalog) => Ok((
                catalog.list(MeshFormat::CarModelJson)?,
                catalog.list(MeshFormat::Ply)?,
            )),
            None => Ok((Vec::new(), Vec::new())),
        }
    }

    pub fn select(&mut self, identifier: String, format: MeshFormat) {
        let next = Selection { identifier, format };
        if self.selection.as_ref() == Some(&next) {
            return;
        }
        self.clear_selection();
        info!(identifier = %next.identifier, format = %next.format, "selected");
        self.selection = Some(next);
    }

    pub fn clear_selection(&mut self) {
        if let Some(previous) = self.selection.take() {
            if self.cache.invalidate(&previous.identifier, previous.format) {
                debug!(identifier = %previous.identifier, "dropped cached mesh");
            }
        }
    }

    /// Parse an uploaded file, cache it and make it the selection.
    pub fn upload(
        &mut self,
        identifier: String,
        format: MeshFormat,
        bytes: &[u8],
    ) -> Result<(), BridgeError> {
        let loaded = parse_mesh(&identifier, format, bytes)?;
        info!(
            identifier = %identifier,
            bytes = bytes.len(),
            faces = loaded.mesh.face_count(),
            "upload parsed"
        );
        self.select(identifier, format);
        self.cache.insert(loaded);
        Ok(())
    }

    pub fn set_controls(&mut self, controls: ViewerControls) -> Result<(), BridgeError> {
        controls.validate()?;
        self.controls = controls;
        Ok(())
    }

    /// Scene for the current selection, loading it on first use.
    pub fn render(&mut self) -> Result<Scene, BridgeError> {
        let selection = self.ensure_loaded()?;
        let loaded = self
            .cache
            .get(&selection.identifier, selection.format)
            .ok_or_else(|| BridgeError::Unavailable {
                identifier: selection.identifier.clone(),
            })?;
        let scene = render_loaded(loaded, &self.controls.to_render_config(), &self.colormap)?;
        Ok(scene)
    }

    /// File name and HTML document for the current selection.
    pub fn export(&mut self) -> Result<(String, String), BridgeError> {
        let scene = self.render()?;
        let html = to_html(&scene)?;
        let file_name = match &self.selection {
            Some(selection) => format!("{}.html", selection.identifier),
            None => return Err(BridgeError::NoSelection),
        };
        Ok((file_name, html))
    }

    fn ensure_loaded(&mut self) -> Result<Selection, BridgeError> {
        let selection = self.selection.clone().ok_or(BridgeError::NoSelection)?;
        if self.cache.get(&selection.identifier, selection.format).is_none() {
            let catalog = self
                .catalog
                .as_ref()
                .ok_or_else(|| BridgeError::Unavailable {
                    identifier: selection.identifier.clone(),
                })?;
            let loader = catalog.loader(selection.format);
            self.cache
                .get_or_load(loader.as_ref(), &selection.identifier)?;
        }
        Ok(selection)
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Errors raised while handling a UI message.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("no file selected")]
    NoSelection,

    #[error("{identifier} is not loaded and there is no data directory to read it from")]
    Unavailable { identifier: String },

    #[error("invalid controls: {0}")]
    Controls(#[from] ControlsError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("upload is not valid base64: {reason}")]
    Decode { reason: String },
}
