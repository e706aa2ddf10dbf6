use serde::{Deserialize, Serialize};

use crate::format::MeshFormat;

/// A point in render space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vertex {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// One triangle, as three indices into the owning mesh's vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face(pub [u32; 3]);

impl Face {
    pub const fn new(i: u32, j: u32, k: u32) -> Self {
        Self([i, j, k])
    }

    pub fn indices(&self) -> [u32; 3] {
        self.0
    }

    /// The three edges in winding order: (i, j), (j, k), (k, i).
    pub fn edges(&self) -> [(u32, u32); 3] {
        let [i, j, k] = self.0;
        [(i, j), (j, k), (k, i)]
    }
}

/// Errors raised when a mesh would violate its invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("vertex {vertex} has a non-finite coordinate")]
    NonFiniteVertex { vertex: usize },
}

/// A triangulated surface: vertices plus faces that index into them.
///
/// Immutable once built. [`Mesh::new`] is the only way to construct one, so
/// every face is guaranteed to reference vertices of the same mesh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> Result<Self, MeshError> {
        if let Some(vertex) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(MeshError::NonFiniteVertex { vertex });
        }

        let vertex_count = vertices.len();
        for (face_idx, face) in faces.iter().enumerate() {
            for &index in &face.0 {
                if index as usize >= vertex_count {
                    return Err(MeshError::IndexOutOfRange {
                        face: face_idx,
                        index,
                        vertex_count,
                    });
                }
            }
        }

        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// The three corner positions of a face.
    pub fn face_vertices(&self, face: &Face) -> [Vertex; 3] {
        face.0.map(|i| self.vertices[i as usize])
    }

    /// Mean z of a face's three corners. Finite for any finite corners.
    pub fn mean_height(&self, face: &Face) -> f64 {
        let [a, b, c] = self.face_vertices(face);
        // Thirds near f64::MAX can still round past it.
        (a.z / 3.0 + b.z / 3.0 + c.z / 3.0).clamp(f64::MIN, f64::MAX)
    }

    /// Axis-aligned bounding box as (min, max), or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vertex, Vertex)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (
                Vertex::new(lo.x.min(v.x), lo.y.min(v.y), lo.z.min(v.z)),
                Vertex::new(hi.x.max(v.x), hi.y.max(v.y), hi.z.max(v.z)),
            )
        }))
    }

    /// Column-wise coordinates, the layout plotting front ends expect.
    pub fn coordinate_columns(&self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let mut xs = Vec::with_capacity(self.vertices.len());
        let mut ys = Vec::with_capacity(self.vertices.len());
        let mut zs = Vec::with_capacity(self.vertices.len());
        for v in &self.vertices {
            xs.push(v.x);
            ys.push(v.y);
            zs.push(v.z);
        }
        (xs, ys, zs)
    }

    /// Column-wise triangle indices (I, J, K).
    pub fn index_columns(&self) -> (Vec<u32>, Vec<u32>, Vec<u32>) {
        let mut is = Vec::with_capacity(self.faces.len());
        let mut js = Vec::with_capacity(self.faces.len());
        let mut ks = Vec::with_capacity(self.faces.len());
        for Face([i, j, k]) in &self.faces {
            is.push(*i);
            js.push(*j);
            ks.push(*k);
        }
        (is, js, ks)
    }
}

/// A mesh together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedMesh {
    pub mesh: Mesh,
    /// File name without extension.
    pub identifier: String,
    pub format: MeshFormat,
    /// Free-form label stored in the file (the car type for car models).
    pub label: Option<String>,
}

impl LoadedMesh {
    /// Display title: `"<identifier> - <label>"`, or just the identifier.
    pub fn title(&self) -> String {
        match &self.label {
            Some(label) => format!("{} - {}", self.identifier, label),
            None => self.identifier.clone(),
        }
    }
}
