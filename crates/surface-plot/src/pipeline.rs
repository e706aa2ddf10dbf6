use mesh_format::MeshLoader;
use surface_types::{LoadedMesh, RenderConfig};
use tracing::{info, instrument};

use crate::colorize::{colorize_faces, FlatRangePolicy};
use crate::colormap::Colormap;
use crate::errors::PlotError;
use crate::scene::{build_scene, Scene};

/// Color and assemble an already-loaded mesh.
///
/// An empty `config.title` is replaced by the mesh's own title.
#[instrument(skip_all, fields(identifier = %loaded.identifier, colormap = colormap.name()))]
pub fn render_loaded(
    loaded: &LoadedMesh,
    config: &RenderConfig,
    colormap: &dyn Colormap,
) -> Result<Scene, PlotError> {
    let colored = colorize_faces(&loaded.mesh, colormap, FlatRangePolicy::default())?;

    let config = if config.title.is_empty() {
        config.clone().with_title(loaded.title())
    } else {
        config.clone()
    };
    let scene = build_scene(&loaded.mesh, &colored.colors, &config)?;

    info!(
        faces = loaded.mesh.face_count(),
        vmin = colored.range.min(),
        vmax = colored.range.max(),
        wireframe = config.wireframe,
        "scene assembled"
    );
    Ok(scene)
}

/// Load `identifier` and render it. Any failure aborts the whole render.
#[instrument(skip(loader, config, colormap), fields(format = %loader.format()))]
pub fn plot_surface(
    loader: &dyn MeshLoader,
    identifier: &str,
    config: &RenderConfig,
    colormap: &dyn Colormap,
) -> Result<Scene, PlotError> {
    let loaded = loader.load(identifier)?;
    render_loaded(&loaded, config, colormap)
}
