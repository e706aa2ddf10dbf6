use std::cell::Cell;
use std::fs;
use std::path::Path;

use mesh_format::{
    parse_car_model, parse_mesh, parse_ply, resolve_format, CarModelLoader, DataCatalog,
    LoadError, MeshCache, MeshLoader, PlyLoader,
};
use surface_types::{Face, LoadedMesh, MeshError, MeshFormat, Vertex};

// ── Helper Functions ─────────────────────────────────────────────────────

const CAR_MODEL: &str = r#"{
    "car_type": "hatchback",
    "vertices": [[1, 2, 3], [4, 5, 6], [7, 8, 9], [0, 0, 0]],
    "faces": [[1, 2, 3], [2, 3, 4]]
}"#;

const PLY_WITH_EXTRAS: &str = "ply
format ascii 1.0
comment vertices carry normals and colors
element vertex 4
property float x
property float y
property float z
property float nx
property float ny
property float nz
property uchar red
property uchar green
property uchar blue
element face 2
property list uchar int vertex_indices
end_header
0 0 0 0 0 1 255 0 0
1 0 0 0 0 1 0 255 0
1 1 0.5 0 0 1 0 0 255
0 1 0.5 0 0 1 9 9 9
3 0 1 2
3 0 2 3
";

fn ply_with_faces(face_lines: &str, face_count: usize) -> String {
    format!(
        "ply
format ascii 1.0
element vertex 3
property double x
property double y
property double z
element face {face_count}
property list uchar uint vertex_indices
end_header
0 0 0
1 0 0
0 1 0
{face_lines}"
    )
}

fn binary_triangle() -> Vec<u8> {
    let mut buf = b"ply
format binary_little_endian 1.0
element vertex 3
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
"
    .to_vec();
    for c in [0.0f32, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0, 4.0] {
        buf.extend_from_slice(&c.to_le_bytes());
    }
    buf.push(3);
    for i in [0i32, 1, 2] {
        buf.extend_from_slice(&i.to_le_bytes());
    }
    buf
}

fn write(dir: &Path, name: &str, contents: impl AsRef<[u8]>) {
    fs::write(dir.join(name), contents).unwrap();
}

/// Counts how often the cache falls through to the loader.
struct CountingLoader {
    calls: Cell<usize>,
}

impl MeshLoader for CountingLoader {
    fn format(&self) -> MeshFormat {
        MeshFormat::CarModelJson
    }

    fn load(&self, identifier: &str) -> Result<LoadedMesh, LoadError> {
        self.calls.set(self.calls.get() + 1);
        parse_car_model(identifier, CAR_MODEL)
    }
}

// ── Car Model Tests ──────────────────────────────────────────────────────

#[test]
fn car_model_faces_are_converted_to_zero_based() {
    let loaded = parse_car_model("hatch", CAR_MODEL).unwrap();
    assert_eq!(
        loaded.mesh.faces(),
        &[Face::new(0, 1, 2), Face::new(1, 2, 3)]
    );
}

#[test]
fn car_model_vertices_are_remapped() {
    let loaded = parse_car_model("hatch", CAR_MODEL).unwrap();
    assert_eq!(loaded.mesh.vertices()[0], Vertex::new(1.0, 3.0, -2.0));
    assert_eq!(loaded.mesh.vertices()[2], Vertex::new(7.0, 9.0, -8.0));
}

#[test]
fn car_model_title_includes_car_type() {
    let loaded = parse_car_model("hatch", CAR_MODEL).unwrap();
    assert_eq!(loaded.title(), "hatch - hatchback");
}

#[test]
fn car_model_without_car_type_is_accepted() {
    let json = r#"{"vertices": [[0,0,0],[1,0,0],[0,1,0]], "faces": [[1,2,3]]}"#;
    let loaded = parse_car_model("bare", json).unwrap();
    assert_eq!(loaded.label, None);
    assert_eq!(loaded.title(), "bare");
}

#[test]
fn car_model_missing_faces_is_parse_error() {
    let json = r#"{"vertices": [[0,0,0]]}"#;
    assert!(matches!(
        parse_car_model("x", json),
        Err(LoadError::ParseError(_))
    ));
}

#[test]
fn car_model_index_past_end_is_mesh_error() {
    let json = r#"{"vertices": [[0,0,0],[1,0,0],[0,1,0]], "faces": [[1,2,4]]}"#;
    assert_eq!(
        parse_car_model("x", json),
        Err(LoadError::Mesh(MeshError::IndexOutOfRange {
            face: 0,
            index: 3,
            vertex_count: 3
        }))
    );
}

#[test]
fn car_model_loader_reads_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "hatch.json", CAR_MODEL);

    let loader = CarModelLoader::new(dir.path());
    let loaded = loader.load("hatch").unwrap();
    assert_eq!(loaded.format, MeshFormat::CarModelJson);
    assert_eq!(loaded.mesh.face_count(), 2);
}

#[test]
fn missing_file_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = CarModelLoader::new(dir.path()).load("nope").unwrap_err();
    assert_eq!(
        err,
        LoadError::FileNotFound {
            path: dir.path().join("nope.json")
        }
    );
}

#[test]
fn identifiers_cannot_leave_the_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("car_models_json");
    fs::create_dir_all(&root).unwrap();
    write(dir.path(), "outside.json", CAR_MODEL);

    let loader = CarModelLoader::new(&root);
    for bad in ["../outside", "sub/outside", "..\\outside", "", ".."] {
        assert!(
            matches!(loader.load(bad), Err(LoadError::FileNotFound { .. })),
            "{bad:?} was accepted"
        );
    }
    assert!(matches!(
        PlyLoader::new(&root).load("../outside"),
        Err(LoadError::FileNotFound { .. })
    ));
}

// ── PLY Tests ────────────────────────────────────────────────────────────

#[test]
fn ply_keeps_only_first_three_vertex_fields() {
    let loaded = parse_ply("quad", PLY_WITH_EXTRAS.as_bytes()).unwrap();
    assert_eq!(loaded.mesh.vertex_count(), 4);
    assert_eq!(loaded.mesh.vertices()[2], Vertex::new(1.0, 1.0, 0.5));
    assert_eq!(
        loaded.mesh.faces(),
        &[Face::new(0, 1, 2), Face::new(0, 2, 3)]
    );
}

#[test]
fn ply_vertices_are_not_remapped() {
    let loaded = parse_ply("tri", ply_with_faces("3 0 1 2\n", 1).as_bytes()).unwrap();
    assert_eq!(loaded.mesh.vertices()[1], Vertex::new(1.0, 0.0, 0.0));
}

#[test]
fn ply_rejects_out_of_range_face_index() {
    let err = parse_ply("bad", ply_with_faces("3 0 1 3\n", 1).as_bytes()).unwrap_err();
    match err {
        LoadError::FormatError(msg) => assert!(msg.contains("vertex 3"), "{msg}"),
        other => panic!("expected FormatError, got {other:?}"),
    }
}

#[test]
fn ply_rejects_degenerate_face_list() {
    let err = parse_ply("bad", ply_with_faces("2 0 1\n", 1).as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::FormatError(_)));
}

#[test]
fn ply_with_fewer_vertices_than_declared_is_format_error() {
    let ply = "ply
format ascii 1.0
element vertex 4
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
0 1 0
3 0 1 2
";
    let err = parse_ply("short", ply.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::FormatError(_)), "{err:?}");
}

#[test]
fn ply_with_fewer_faces_than_declared_is_format_error() {
    let err = parse_ply("short", ply_with_faces("3 0 1 2\n", 2).as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::FormatError(_)), "{err:?}");
}

#[test]
fn ply_with_more_faces_than_declared_is_format_error() {
    let faces = "3 0 1 2\n3 0 2 1\n";
    let err = parse_ply("long", ply_with_faces(faces, 1).as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::FormatError(msg) if msg.contains("follow")));
}

#[test]
fn ply_trailing_blank_lines_are_accepted() {
    let loaded = parse_ply("tri", ply_with_faces("3 0 1 2\n\n  \n", 1).as_bytes()).unwrap();
    assert_eq!(loaded.mesh.face_count(), 1);
}

#[test]
fn ply_fans_out_polygons() {
    let ply = "ply
format ascii 1.0
element vertex 5
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
2 1 0
1 2 0
0 1 0
5 0 1 2 3 4
";
    let loaded = parse_ply("pentagon", ply.as_bytes()).unwrap();
    assert_eq!(
        loaded.mesh.faces(),
        &[Face::new(0, 1, 2), Face::new(0, 2, 3), Face::new(0, 3, 4)]
    );
}

#[test]
fn ply_without_face_element_is_format_error() {
    let ply = "ply
format ascii 1.0
element vertex 1
property float x
property float y
property float z
end_header
0 0 0
";
    let err = parse_ply("points", ply.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::FormatError(msg) if msg.contains("face")));
}

#[test]
fn ply_with_two_vertex_fields_is_format_error() {
    let ply = "ply
format ascii 1.0
element vertex 1
property float x
property float y
element face 0
property list uchar int vertex_indices
end_header
0 0
";
    assert!(matches!(
        parse_ply("flat", ply.as_bytes()),
        Err(LoadError::FormatError(_))
    ));
}

#[test]
fn ply_garbage_is_parse_error() {
    assert!(matches!(
        parse_ply("junk", "not a ply file".as_bytes()),
        Err(LoadError::ParseError(_))
    ));
}

#[test]
fn binary_ply_is_supported() {
    let loaded = parse_ply("bin", binary_triangle().as_slice()).unwrap();
    assert_eq!(loaded.mesh.vertices()[2], Vertex::new(0.0, 2.0, 4.0));
    assert_eq!(loaded.mesh.faces(), &[Face::new(0, 1, 2)]);
}

#[test]
fn ply_loader_reads_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "bin.ply", binary_triangle());

    let loaded = PlyLoader::new(dir.path()).load("bin").unwrap();
    assert_eq!(loaded.identifier, "bin");
    assert_eq!(loaded.mesh.face_count(), 1);
}

// ── Dispatch, Catalog and Cache ──────────────────────────────────────────

#[test]
fn parse_mesh_dispatches_on_format() {
    let json = parse_mesh("a", MeshFormat::CarModelJson, CAR_MODEL.as_bytes()).unwrap();
    assert_eq!(json.label.as_deref(), Some("hatchback"));

    let ply = parse_mesh("b", MeshFormat::Ply, &binary_triangle()).unwrap();
    assert_eq!(ply.format, MeshFormat::Ply);
}

#[test]
fn parse_mesh_rejects_non_utf8_json() {
    let err = parse_mesh("a", MeshFormat::CarModelJson, &[0xff, 0xfe]).unwrap_err();
    assert!(matches!(err, LoadError::ParseError(_)));
}

#[test]
fn unknown_extension_is_unsupported() {
    assert_eq!(resolve_format(".ply"), Ok(MeshFormat::Ply));
    assert_eq!(
        resolve_format(".stl"),
        Err(LoadError::UnsupportedFormat(".stl".to_string()))
    );
}

#[test]
fn catalog_lists_stems_sorted_by_format() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = DataCatalog::under(dir.path());
    fs::create_dir_all(&catalog.car_model_dir).unwrap();
    fs::create_dir_all(&catalog.ply_dir).unwrap();

    write(&catalog.car_model_dir, "zeta.json", CAR_MODEL);
    write(&catalog.car_model_dir, "alpha.json", CAR_MODEL);
    write(&catalog.car_model_dir, "notes.txt", "ignore me");
    write(&catalog.ply_dir, "skull.ply", binary_triangle());
    fs::create_dir(catalog.ply_dir.join("nested.ply")).unwrap();

    assert_eq!(
        catalog.list(MeshFormat::CarModelJson).unwrap(),
        vec!["alpha", "zeta"]
    );
    assert_eq!(catalog.list(MeshFormat::Ply).unwrap(), vec!["skull"]);

    let loader = catalog.loader(MeshFormat::Ply);
    assert_eq!(loader.format(), MeshFormat::Ply);
    assert_eq!(loader.load("skull").unwrap().mesh.face_count(), 1);
}

#[test]
fn catalog_missing_directory_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = DataCatalog::under(dir.path().join("absent"));
    assert!(matches!(
        catalog.list(MeshFormat::Ply),
        Err(LoadError::FileNotFound { .. })
    ));
}

#[test]
fn cache_loads_once_until_invalidated() {
    let loader = CountingLoader {
        calls: Cell::new(0),
    };
    let mut cache = MeshCache::new();

    cache.get_or_load(&loader, "hatch").unwrap();
    cache.get_or_load(&loader, "hatch").unwrap();
    assert_eq!(loader.calls.get(), 1);
    assert_eq!(cache.len(), 1);

    assert!(cache.invalidate("hatch", MeshFormat::CarModelJson));
    assert!(!cache.invalidate("hatch", MeshFormat::CarModelJson));
    cache.get_or_load(&loader, "hatch").unwrap();
    assert_eq!(loader.calls.get(), 2);
}

#[test]
fn cache_keys_include_format() {
    let mut cache = MeshCache::new();
    cache.insert(parse_car_model("same", CAR_MODEL).unwrap());
    cache.insert(parse_ply("same", binary_triangle().as_slice()).unwrap());
    assert_eq!(cache.len(), 2);
    assert!(cache.get("same", MeshFormat::Ply).is_some());

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn failed_loads_are_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let loader = PlyLoader::new(dir.path());
    let mut cache = MeshCache::new();
    assert!(cache.get_or_load(&loader, "missing").is_err());
    assert!(cache.is_empty());
}
