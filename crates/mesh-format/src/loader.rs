use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use surface_types::{LoadedMesh, MeshFormat};
use tracing::{info, instrument, warn};

use crate::car_model::parse_car_model;
use crate::errors::LoadError;
use crate::ply::parse_ply;

/// Something that can turn a file identifier into a mesh.
///
/// Every implementation yields the same [`LoadedMesh`] shape so downstream
/// code never sees which format a mesh came from.
pub trait MeshLoader {
    /// The format this loader reads.
    fn format(&self) -> MeshFormat;

    /// Load the mesh named `identifier` (file name without extension).
    fn load(&self, identifier: &str) -> Result<LoadedMesh, LoadError>;
}

/// Path of `<root>/<identifier>.<ext>`.
///
/// Identifiers are bare file stems. One that is empty, `.`, `..` or holds a
/// path separator cannot name a file in `root` and is reported as
/// [`LoadError::FileNotFound`].
pub fn mesh_path(root: &Path, identifier: &str, format: MeshFormat) -> Result<PathBuf, LoadError> {
    let path = root.join(format!("{identifier}.{}", format.extension()));
    let bare = !identifier.is_empty()
        && identifier != "."
        && identifier != ".."
        && !identifier.contains(['/', '\\']);
    if !bare {
        warn!(identifier, "identifier is not a bare file name");
        return Err(LoadError::FileNotFound { path });
    }
    Ok(path)
}

/// Loads car model JSON records from a directory.
#[derive(Debug, Clone)]
pub struct CarModelLoader {
    root: PathBuf,
}

impl CarModelLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl MeshLoader for CarModelLoader {
    fn format(&self) -> MeshFormat {
        MeshFormat::CarModelJson
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn load(&self, identifier: &str) -> Result<LoadedMesh, LoadError> {
        let path = mesh_path(&self.root, identifier, self.format())?;
        let json = std::fs::read_to_string(&path).map_err(|e| LoadError::from_io(path, e))?;
        let loaded = parse_car_model(identifier, &json)?;
        log_loaded(&loaded);
        Ok(loaded)
    }
}

/// Loads PLY files from a directory.
#[derive(Debug, Clone)]
pub struct PlyLoader {
    root: PathBuf,
}

impl PlyLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl MeshLoader for PlyLoader {
    fn format(&self) -> MeshFormat {
        MeshFormat::Ply
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn load(&self, identifier: &str) -> Result<LoadedMesh, LoadError> {
        let path = mesh_path(&self.root, identifier, self.format())?;
        let file = File::open(&path).map_err(|e| LoadError::from_io(path, e))?;
        let loaded = parse_ply(identifier, BufReader::new(file))?;
        log_loaded(&loaded);
        Ok(loaded)
    }
}

/// Parse an in-memory payload of the given format.
pub fn parse_mesh(
    identifier: &str,
    format: MeshFormat,
    bytes: &[u8],
) -> Result<LoadedMesh, LoadError> {
    match format {
        MeshFormat::CarModelJson => {
            let json = std::str::from_utf8(bytes)
                .map_err(|e| LoadError::ParseError(format!("car model is not UTF-8: {e}")))?;
            parse_car_model(identifier, json)
        }
        MeshFormat::Ply => parse_ply(identifier, bytes),
    }
}

/// Resolve a user-supplied extension, rejecting anything but the two
/// supported kinds.
pub fn resolve_format(extension: &str) -> Result<MeshFormat, LoadError> {
    MeshFormat::from_extension(extension).ok_or_else(|| {
        warn!(extension, "unsupported mesh format, nothing rendered");
        LoadError::UnsupportedFormat(extension.to_string())
    })
}

fn log_loaded(loaded: &LoadedMesh) {
    info!(
        identifier = %loaded.identifier,
        format = %loaded.format,
        vertices = loaded.mesh.vertex_count(),
        faces = loaded.mesh.face_count(),
        "mesh loaded"
    );
}
