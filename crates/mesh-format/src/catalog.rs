use std::path::{Path, PathBuf};

use surface_types::MeshFormat;
use tracing::debug;

use crate::errors::LoadError;
use crate::loader::{CarModelLoader, MeshLoader, PlyLoader};

/// Default location of the car model records.
pub const DEFAULT_CAR_MODEL_DIR: &str = "data/car_models_json";
/// Default location of the PLY samples.
pub const DEFAULT_PLY_DIR: &str = "data/ply_data";

/// The sample data directories, one per format.
#[derive(Debug, Clone)]
pub struct DataCatalog {
    pub car_model_dir: PathBuf,
    pub ply_dir: PathBuf,
}

impl Default for DataCatalog {
    fn default() -> Self {
        Self {
            car_model_dir: PathBuf::from(DEFAULT_CAR_MODEL_DIR),
            ply_dir: PathBuf::from(DEFAULT_PLY_DIR),
        }
    }
}

impl DataCatalog {
    /// Catalog rooted at `data_dir`, using the default sub-directory names.
    pub fn under(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            car_model_dir: data_dir.join("car_models_json"),
            ply_dir: data_dir.join("ply_data"),
        }
    }

    pub fn dir(&self, format: MeshFormat) -> &Path {
        match format {
            MeshFormat::CarModelJson => &self.car_model_dir,
            MeshFormat::Ply => &self.ply_dir,
        }
    }

    /// File stems of every `<name>.<ext>` file in the format's directory,
    /// sorted. Sub-directories are ignored.
    pub fn list(&self, format: MeshFormat) -> Result<Vec<String>, LoadError> {
        let dir = self.dir(format);
        let entries = std::fs::read_dir(dir).map_err(|e| LoadError::from_io(dir.to_path_buf(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| LoadError::from_io(dir.to_path_buf(), e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(MeshFormat::from_extension)
                == Some(format);
            if let (true, Some(stem)) = (matches, path.file_stem().and_then(|s| s.to_str())) {
                names.push(stem.to_string());
            }
        }
        names.sort();

        debug!(dir = %dir.display(), format = %format, count = names.len(), "listed mesh files");
        Ok(names)
    }

    /// A loader reading from the format's directory.
    pub fn loader(&self, format: MeshFormat) -> Box<dyn MeshLoader> {
        match format {
            MeshFormat::CarModelJson => Box::new(CarModelLoader::new(&self.car_model_dir)),
            MeshFormat::Ply => Box::new(PlyLoader::new(&self.ply_dir)),
        }
    }
}
