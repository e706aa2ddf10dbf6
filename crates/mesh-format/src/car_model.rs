//! Car model JSON records.
//!
//! ```json
//! { "vertices": [[x, y, z], ...], "faces": [[i, j, k], ...], "car_type": "sedan" }
//! ```
//!
//! Face indices are 1-based. Vertices are stored y-down relative to the
//! viewer, so each one is remapped to `(x, z, -y)` on load.

use serde::Deserialize;
use surface_types::{Face, LoadedMesh, Mesh, MeshFormat, Vertex};
use tracing::debug;

use crate::errors::LoadError;

/// The on-disk record, before index and axis conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct CarModelRaw {
    pub vertices: Vec<[f64; 3]>,
    pub faces: Vec<[i64; 3]>,
    #[serde(default)]
    pub car_type: Option<String>,
}

/// Swap source axes into render space: `(x, y, z) -> (x, z, -y)`.
pub fn remap_axes([x, y, z]: [f64; 3]) -> Vertex {
    Vertex::new(x, z, -y)
}

/// Parse a car model record into a render-space mesh.
pub fn parse_car_model(identifier: &str, json: &str) -> Result<LoadedMesh, LoadError> {
    let raw: CarModelRaw =
        serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;

    let vertices: Vec<Vertex> = raw.vertices.iter().copied().map(remap_axes).collect();

    let faces = raw
        .faces
        .iter()
        .enumerate()
        .map(|(face_idx, tri)| to_zero_based(face_idx, tri))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        identifier,
        vertices = vertices.len(),
        faces = faces.len(),
        "parsed car model"
    );

    Ok(LoadedMesh {
        mesh: Mesh::new(vertices, faces)?,
        identifier: identifier.to_string(),
        format: MeshFormat::CarModelJson,
        label: raw.car_type,
    })
}

fn to_zero_based(face_idx: usize, tri: &[i64; 3]) -> Result<Face, LoadError> {
    let mut out = [0u32; 3];
    for (slot, &index) in out.iter_mut().zip(tri) {
        *slot = index
            .checked_sub(1)
            .and_then(|i| u32::try_from(i).ok())
            .ok_or_else(|| {
                LoadError::ParseError(format!(
                    "face {face_idx} has index {index}; car model faces are 1-based"
                ))
            })?;
    }
    Ok(Face(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_become_zero_based() {
        let json = r#"{"vertices": [[0,0,0],[1,0,0],[0,1,0]], "faces": [[1,2,3]], "car_type": "coupe"}"#;
        let loaded = parse_car_model("m", json).unwrap();
        assert_eq!(loaded.mesh.faces(), &[Face::new(0, 1, 2)]);
        assert_eq!(loaded.label.as_deref(), Some("coupe"));
    }

    #[test]
    fn vertices_are_remapped() {
        assert_eq!(remap_axes([1.0, 2.0, 3.0]), Vertex::new(1.0, 3.0, -2.0));
    }

    #[test]
    fn zero_index_is_a_parse_error() {
        let json = r#"{"vertices": [[0,0,0],[1,0,0],[0,1,0]], "faces": [[0,1,2]]}"#;
        let err = parse_car_model("m", json).unwrap_err();
        assert!(matches!(err, LoadError::ParseError(msg) if msg.contains("1-based")));
    }

    #[test]
    fn short_face_row_is_a_parse_error() {
        let json = r#"{"vertices": [[0,0,0],[1,0,0]], "faces": [[1,2]]}"#;
        assert!(matches!(
            parse_car_model("m", json),
            Err(LoadError::ParseError(_))
        ));
    }
}
