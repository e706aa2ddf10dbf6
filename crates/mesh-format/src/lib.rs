//! Mesh ingestion: car model JSON records and PLY files, both loaded into
//! the same [`LoadedMesh`](surface_types::LoadedMesh) shape.

pub mod cache;
pub mod car_model;
pub mod catalog;
pub mod errors;
pub mod loader;
pub mod ply;

pub use cache::MeshCache;
pub use car_model::parse_car_model;
pub use catalog::DataCatalog;
pub use errors::LoadError;
pub use loader::{mesh_path, parse_mesh, resolve_format, CarModelLoader, MeshLoader, PlyLoader};
pub use ply::parse_ply;
