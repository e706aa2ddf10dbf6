use serde::{Deserialize, Serialize};
use surface_types::{ColorRange, FaceColorTable, Mesh};
use tracing::{debug, warn};

use crate::colormap::{map_to_rgb, Colormap};
use crate::errors::ColorizeError;

/// What to do when every face has the same mean height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum FlatRangePolicy {
    /// Paint every face with the colormap's `t = 0.5` color.
    #[default]
    Midpoint,
    /// Paint every face with the colormap's color at the given `t`.
    Constant(f64),
    /// Fail with [`ColorizeError::DegenerateRange`].
    Reject,
}

/// Per-face fill colors plus the range they were normalized against.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceColors {
    pub colors: FaceColorTable,
    pub range: ColorRange,
}

/// Mean z of each face, in face order.
pub fn mean_heights(mesh: &Mesh) -> Vec<f64> {
    mesh.faces().iter().map(|f| mesh.mean_height(f)).collect()
}

/// Color one height against `range`.
pub fn map_z_to_color(
    z: f64,
    colormap: &dyn Colormap,
    range: &ColorRange,
) -> Result<String, ColorizeError> {
    let t = range.normalize(z)?;
    Ok(map_to_rgb(t, colormap))
}

/// Color each face by its mean height, normalized over the whole mesh.
pub fn colorize_faces(
    mesh: &Mesh,
    colormap: &dyn Colormap,
    policy: FlatRangePolicy,
) -> Result<FaceColors, ColorizeError> {
    let heights = mean_heights(mesh);
    if heights.is_empty() {
        return Err(ColorizeError::NoFaces);
    }

    let vmin = heights.iter().copied().fold(f64::INFINITY, f64::min);
    let vmax = heights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = ColorRange::new(vmin, vmax)?;
    debug!(vmin, vmax, faces = heights.len(), "mean height range");

    let mut fallback: Option<String> = None;
    let mut colors = Vec::with_capacity(heights.len());
    for z in heights {
        let color = match map_z_to_color(z, colormap, &range) {
            Ok(color) => color,
            Err(ColorizeError::DegenerateRange { value }) => match fallback {
                Some(ref color) => color.clone(),
                None => {
                    let color = flat_color(value, colormap, policy)?;
                    fallback = Some(color.clone());
                    color
                }
            },
            Err(e) => return Err(e),
        };
        colors.push(color);
    }

    Ok(FaceColors {
        colors: FaceColorTable::new(colors),
        range,
    })
}

fn flat_color(
    value: f64,
    colormap: &dyn Colormap,
    policy: FlatRangePolicy,
) -> Result<String, ColorizeError> {
    let t = match policy {
        FlatRangePolicy::Midpoint => 0.5,
        FlatRangePolicy::Constant(t) => t,
        FlatRangePolicy::Reject => return Err(ColorizeError::DegenerateRange { value }),
    };
    warn!(value, t, "flat mesh, using a constant face color");
    Ok(map_to_rgb(t, colormap))
}
