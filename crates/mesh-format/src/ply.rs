//! Stanford PLY meshes (ASCII, binary little- or big-endian).
//!
//! Only the `vertex` and `face` elements are read. Vertices keep their first
//! three declared properties as x, y, z; anything after that (normals,
//! colors, confidence) is dropped. The first face property must be the index
//! list.

use std::io::{BufRead, BufReader, Read};

use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, ElementDef, Header, Payload, Property};
use surface_types::{Face, LoadedMesh, Mesh, MeshFormat, Vertex};
use tracing::debug;

use crate::errors::LoadError;

const VERTEX_ELEMENT: &str = "vertex";
const FACE_ELEMENT: &str = "face";

/// Parse a PLY stream into a mesh.
///
/// A malformed header is a [`LoadError::ParseError`]. A body that does not
/// hold exactly the records the header declares is a
/// [`LoadError::FormatError`].
pub fn parse_ply<R: Read>(identifier: &str, reader: R) -> Result<LoadedMesh, LoadError> {
    let mut reader = BufReader::new(reader);
    let parser = Parser::<DefaultElement>::new();

    let header = parser
        .read_header(&mut reader)
        .map_err(|e| LoadError::ParseError(format!("PLY header: {e}")))?;
    let payload = parser.read_payload(&mut reader, &header).map_err(|e| {
        LoadError::FormatError(format!("body does not match the declared elements: {e}"))
    })?;
    reject_trailing_records(&mut reader)?;

    let vertices = read_vertices(&header, &payload)?;
    let faces = read_faces(&header, &payload, vertices.len())?;

    debug!(
        identifier,
        vertices = vertices.len(),
        faces = faces.len(),
        "parsed PLY"
    );

    Ok(LoadedMesh {
        mesh: Mesh::new(vertices, faces)?,
        identifier: identifier.to_string(),
        format: MeshFormat::Ply,
        label: None,
    })
}

/// Anything but whitespace after the last declared record means the header
/// undercounts the body.
fn reject_trailing_records<R: BufRead>(reader: &mut R) -> Result<(), LoadError> {
    let mut rest = Vec::new();
    reader
        .read_to_end(&mut rest)
        .map_err(|e| LoadError::ParseError(format!("PLY body: {e}")))?;
    if rest.iter().any(|b| !b.is_ascii_whitespace()) {
        return Err(LoadError::FormatError(format!(
            "{} bytes follow the declared elements",
            rest.len()
        )));
    }
    Ok(())
}

/// Look up an element's header declaration and its parsed records.
fn element<'a>(
    header: &'a Header,
    payload: &'a Payload<DefaultElement>,
    name: &str,
) -> Result<(&'a ElementDef, &'a [DefaultElement]), LoadError> {
    let def = header
        .elements
        .get(name)
        .ok_or_else(|| LoadError::FormatError(format!("missing `{name}` element")))?;
    let records = payload.get(name).map(Vec::as_slice).unwrap_or(&[]);
    Ok((def, records))
}

fn read_vertices(
    header: &Header,
    payload: &Payload<DefaultElement>,
) -> Result<Vec<Vertex>, LoadError> {
    let (def, records) = element(header, payload, VERTEX_ELEMENT)?;

    let names: Vec<&str> = def.properties.keys().map(String::as_str).take(3).collect();
    if names.len() < 3 {
        return Err(LoadError::FormatError(format!(
            "`vertex` has {} properties, need at least 3",
            names.len()
        )));
    }

    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let mut xyz = [0.0f64; 3];
            for (slot, name) in xyz.iter_mut().zip(&names) {
                *slot = record.get(*name).and_then(scalar).ok_or_else(|| {
                    LoadError::FormatError(format!(
                        "vertex {idx}: property `{name}` is not a number"
                    ))
                })?;
            }
            Ok(Vertex::new(xyz[0], xyz[1], xyz[2]))
        })
        .collect()
}

fn read_faces(
    header: &Header,
    payload: &Payload<DefaultElement>,
    vertex_count: usize,
) -> Result<Vec<Face>, LoadError> {
    let (def, records) = element(header, payload, FACE_ELEMENT)?;

    let list_name = def
        .properties
        .keys()
        .next()
        .ok_or_else(|| LoadError::FormatError("`face` has no properties".to_string()))?;

    let mut faces = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let list = record.get(list_name).and_then(index_list).ok_or_else(|| {
            LoadError::FormatError(format!(
                "face {idx}: property `{list_name}` is not an index list"
            ))
        })?;

        if list.len() < 3 {
            return Err(LoadError::FormatError(format!(
                "face {idx} has {} indices, need at least 3",
                list.len()
            )));
        }

        let mut checked = Vec::with_capacity(list.len());
        for index in list {
            let in_range = usize::try_from(index)
                .map(|i| i < vertex_count)
                .unwrap_or(false);
            if !in_range {
                return Err(LoadError::FormatError(format!(
                    "face {idx} references vertex {index} but only {vertex_count} vertices exist"
                )));
            }
            checked.push(index as u32);
        }

        // Fan out polygons; a triangle yields itself.
        for i in 1..checked.len() - 1 {
            faces.push(Face::new(checked[0], checked[i], checked[i + 1]));
        }
    }

    Ok(faces)
}

fn scalar(prop: &Property) -> Option<f64> {
    match prop {
        Property::Char(v) => Some(*v as f64),
        Property::UChar(v) => Some(*v as f64),
        Property::Short(v) => Some(*v as f64),
        Property::UShort(v) => Some(*v as f64),
        Property::Int(v) => Some(*v as f64),
        Property::UInt(v) => Some(*v as f64),
        Property::Float(v) => Some(*v as f64),
        Property::Double(v) => Some(*v),
        _ => None,
    }
}

fn index_list(prop: &Property) -> Option<Vec<i64>> {
    match prop {
        Property::ListChar(v) => Some(v.iter().map(|&i| i as i64).collect()),
        Property::ListUChar(v) => Some(v.iter().map(|&i| i as i64).collect()),
        Property::ListShort(v) => Some(v.iter().map(|&i| i as i64).collect()),
        Property::ListUShort(v) => Some(v.iter().map(|&i| i as i64).collect()),
        Property::ListInt(v) => Some(v.iter().map(|&i| i as i64).collect()),
        Property::ListUInt(v) => Some(v.iter().map(|&i| i as i64).collect()),
        _ => None,
    }
}
