pub mod color;
pub mod config;
pub mod format;
pub mod mesh;

pub use color::*;
pub use config::*;
pub use format::*;
pub use mesh::*;
