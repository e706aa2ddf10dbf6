use serde::{Deserialize, Serialize};

/// The input file kinds the viewer knows how to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshFormat {
    /// Car model description: `{ "vertices", "faces", "car_type" }`.
    CarModelJson,
    /// Stanford polygon file, ASCII or binary.
    Ply,
}

impl MeshFormat {
    pub const ALL: [MeshFormat; 2] = [MeshFormat::CarModelJson, MeshFormat::Ply];

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            MeshFormat::CarModelJson => "json",
            MeshFormat::Ply => "ply",
        }
    }

    /// Parse an extension such as `"ply"`, `".json"` or `"PLY"`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(MeshFormat::CarModelJson),
            "ply" => Some(MeshFormat::Ply),
            _ => None,
        }
    }
}

impl std::fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_parsing_ignores_dot_and_case() {
        assert_eq!(MeshFormat::from_extension(".json"), Some(MeshFormat::CarModelJson));
        assert_eq!(MeshFormat::from_extension("PLY"), Some(MeshFormat::Ply));
        assert_eq!(MeshFormat::from_extension(".stl"), None);
        assert_eq!(MeshFormat::from_extension(""), None);
    }

    #[test]
    fn extension_matches_display() {
        for format in MeshFormat::ALL {
            assert_eq!(format.to_string(), format.extension());
        }
    }
}
