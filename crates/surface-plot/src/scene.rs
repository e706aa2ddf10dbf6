//! Figure description in the shape plotly.js expects (`{ data, layout }`).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use surface_types::{FaceColorTable, Mesh, RenderConfig};

use crate::errors::PlotError;

const TITLE_FONT: &str = "Rockwell";
const EDGE_COLOR: &str = "rgb(50,50,50)";
const EDGE_WIDTH: f64 = 1.5;
const AXIS_BACKGROUND: &str = "rgb(230, 230,230)";
const AXIS_GRID: &str = "rgb(255, 255, 255)";

/// A complete renderable figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Scene {
    /// The filled surface trace. Every scene built by [`build_scene`] has one.
    pub fn surface(&self) -> Option<&MeshTrace> {
        self.data.iter().find_map(|t| match t {
            Trace::Mesh3d(mesh) => Some(mesh),
            _ => None,
        })
    }

    pub fn wireframe(&self) -> Option<&LineTrace> {
        self.data.iter().find_map(|t| match t {
            Trace::Scatter3d(lines) => Some(lines),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Mesh3d(MeshTrace),
    Scatter3d(LineTrace),
}

/// Filled triangles with one color per face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub i: Vec<u32>,
    pub j: Vec<u32>,
    pub k: Vec<u32>,
    pub facecolor: Vec<String>,
    pub name: String,
}

impl MeshTrace {
    pub fn triangle_count(&self) -> usize {
        self.i.len()
    }
}

/// Line segments separated by `null` breaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTrace {
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub z: Vec<Option<f64>>,
    pub mode: String,
    pub line: LineStyle,
    pub name: String,
}

impl LineTrace {
    pub fn segment_count(&self) -> usize {
        self.x.iter().filter(|v| v.is_none()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    pub hoverlabel: HoverLabel,
    pub margin: Margin,
    pub width: u32,
    pub height: u32,
    pub paper_bgcolor: String,
    pub scene: SceneAxes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverLabel {
    pub bgcolor: String,
    pub font: Font,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub l: u32,
    pub b: u32,
    pub r: u32,
    pub t: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneAxes {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub zaxis: Axis,
    pub aspectmode: String,
}

/// One 3D axis. Unset fields are left to the front end's defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Axis {
    pub showbackground: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backgroundcolor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zerolinecolor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zeroline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showticklabels: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Axis {
    /// Shaded background with white grid and zero lines.
    pub fn visible() -> Self {
        Self {
            showbackground: true,
            backgroundcolor: Some(AXIS_BACKGROUND.to_string()),
            gridcolor: Some(AXIS_GRID.to_string()),
            zerolinecolor: Some(AXIS_GRID.to_string()),
            ..Self::default()
        }
    }

    /// No background, grid, lines, tick labels or title.
    pub fn hidden() -> Self {
        Self {
            showbackground: false,
            showline: Some(false),
            zeroline: Some(false),
            showgrid: Some(false),
            showticklabels: Some(false),
            title: Some(String::new()),
            ..Self::default()
        }
    }

    pub fn is_visible(&self) -> bool {
        self.showbackground
    }
}

/// The filled surface trace, with `colors` matched to face order.
pub fn surface_trace(mesh: &Mesh, colors: &FaceColorTable) -> MeshTrace {
    let (x, y, z) = mesh.coordinate_columns();
    let (i, j, k) = mesh.index_columns();
    MeshTrace {
        x,
        y,
        z,
        i,
        j,
        k,
        facecolor: colors.as_slice().to_vec(),
        name: String::new(),
    }
}

/// Every distinct triangle edge as a two-point segment followed by a break.
///
/// Edges shared by neighbouring triangles are emitted once, in the order
/// they are first met.
pub fn wireframe_trace(mesh: &Mesh) -> LineTrace {
    let mut seen = HashSet::new();
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut z = Vec::new();

    for face in mesh.faces() {
        for (a, b) in face.edges() {
            if !seen.insert((a.min(b), a.max(b))) {
                continue;
            }
            for idx in [a, b] {
                let v = mesh.vertices()[idx as usize];
                x.push(Some(v.x));
                y.push(Some(v.y));
                z.push(Some(v.z));
            }
            x.push(None);
            y.push(None);
            z.push(None);
        }
    }

    LineTrace {
        x,
        y,
        z,
        mode: "lines".to_string(),
        line: LineStyle {
            color: EDGE_COLOR.to_string(),
            width: EDGE_WIDTH,
        },
        name: String::new(),
    }
}

/// Title, sizing, background and axes for a render.
pub fn layout(config: &RenderConfig) -> Layout {
    let axis = if config.show_axes {
        Axis::visible()
    } else {
        Axis::hidden()
    };

    Layout {
        title: Title {
            text: config.title.clone(),
            x: 0.5,
            y: 0.95,
            font: Font {
                family: TITLE_FONT.to_string(),
                size: 20,
                color: Some("#000000".to_string()),
            },
        },
        hoverlabel: HoverLabel {
            bgcolor: "rgba(58, 71, 80, 0.1)".to_string(),
            font: Font {
                family: TITLE_FONT.to_string(),
                size: 16,
                color: None,
            },
        },
        margin: Margin::default(),
        width: config.width,
        height: config.height,
        paper_bgcolor: config.background.clone(),
        scene: SceneAxes {
            xaxis: axis.clone(),
            yaxis: axis.clone(),
            zaxis: axis,
            aspectmode: "data".to_string(),
        },
    }
}

/// Assemble the figure for a colored mesh.
pub fn build_scene(
    mesh: &Mesh,
    colors: &FaceColorTable,
    config: &RenderConfig,
) -> Result<Scene, PlotError> {
    if colors.len() != mesh.face_count() {
        return Err(PlotError::ColorTableMismatch {
            faces: mesh.face_count(),
            colors: colors.len(),
        });
    }

    let mut data = vec![Trace::Mesh3d(surface_trace(mesh, colors))];
    if config.wireframe {
        data.push(Trace::Scatter3d(wireframe_trace(mesh)));
    }

    Ok(Scene {
        data,
        layout: layout(config),
    })
}
