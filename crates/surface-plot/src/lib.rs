//! Height-colored triangulated surfaces.
//!
//! A mesh's faces are colored by the mean z of their corners, normalized
//! over the mesh and pushed through a colormap. The result is assembled into
//! a [`Scene`]: a plotly-shaped figure description that a browser front end
//! can draw as-is, or that [`export::write_html`] can wrap into a standalone
//! interactive document.

pub mod colormap;
pub mod colorize;
pub mod errors;
pub mod export;
pub mod pipeline;
pub mod scene;

pub use colormap::{map_to_rgb, Colormap, SegmentedColormap};
pub use colorize::{colorize_faces, map_z_to_color, mean_heights, FaceColors, FlatRangePolicy};
pub use errors::{ColorizeError, ExportError, PlotError};
pub use export::{to_html, write_html};
pub use pipeline::{plot_surface, render_loaded};
pub use scene::{build_scene, Axis, Layout, LineTrace, MeshTrace, Scene, Trace};
