use std::collections::HashMap;

use surface_types::{LoadedMesh, MeshFormat};
use tracing::debug;

use crate::errors::LoadError;
use crate::loader::MeshLoader;

/// Cache key: file identifier plus its format.
pub type CacheKey = (String, MeshFormat);

/// Memoizes loaded meshes so repeated renders of one selection skip I/O.
///
/// Nothing is evicted automatically; callers invalidate entries when the
/// selection changes.
#[derive(Debug, Default)]
pub struct MeshCache {
    entries: HashMap<CacheKey, LoadedMesh>,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached mesh, loading it through `loader` on a miss.
    /// Failed loads are not cached.
    pub fn get_or_load(
        &mut self,
        loader: &dyn MeshLoader,
        identifier: &str,
    ) -> Result<&LoadedMesh, LoadError> {
        let key = (identifier.to_string(), loader.format());
        if !self.entries.contains_key(&key) {
            let loaded = loader.load(identifier)?;
            self.entries.insert(key.clone(), loaded);
        } else {
            debug!(identifier, format = %key.1, "mesh cache hit");
        }
        Ok(&self.entries[&key])
    }

    pub fn get(&self, identifier: &str, format: MeshFormat) -> Option<&LoadedMesh> {
        self.entries.get(&(identifier.to_string(), format))
    }

    /// Store an already-parsed mesh under its own identifier and format.
    pub fn insert(&mut self, loaded: LoadedMesh) {
        let key = (loaded.identifier.clone(), loaded.format);
        self.entries.insert(key, loaded);
    }

    /// Drop one entry. Returns whether it was present.
    pub fn invalidate(&mut self, identifier: &str, format: MeshFormat) -> bool {
        self.entries
            .remove(&(identifier.to_string(), format))
            .is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
