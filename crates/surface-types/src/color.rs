use serde::{Deserialize, Serialize};

/// Errors from normalizing a value against a [`ColorRange`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RangeError {
    #[error("incorrect relation between vmin ({min}) and vmax ({max})")]
    Inverted { min: f64, max: f64 },

    #[error("color range collapses to the single value {value}")]
    Degenerate { value: f64 },
}

/// The (min, max) mean-height span of a mesh, used to normalize face heights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRange {
    min: f64,
    max: f64,
}

impl ColorRange {
    pub fn new(min: f64, max: f64) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Map `value` to `(value - min) / (max - min)`.
    ///
    /// Values outside the range are not clamped. Both differences are taken
    /// on halved operands so a span wider than `f64::MAX` stays finite.
    pub fn normalize(&self, value: f64) -> Result<f64, RangeError> {
        if self.is_degenerate() {
            return Err(RangeError::Degenerate { value: self.min });
        }
        let span = self.max / 2.0 - self.min / 2.0;
        Ok((value / 2.0 - self.min / 2.0) / span)
    }
}

/// Fill colors in face order, each formatted as `rgb(R,G,B)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceColorTable(Vec<String>);

impl FaceColorTable {
    pub fn new(colors: Vec<String>) -> Self {
        Self(colors)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, face: usize) -> Option<&str> {
        self.0.get(face).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            ColorRange::new(2.0, 1.0),
            Err(RangeError::Inverted { min: 2.0, max: 1.0 })
        );
    }

    #[test]
    fn normalize_maps_endpoints() {
        let range = ColorRange::new(-2.0, 2.0).unwrap();
        assert_eq!(range.normalize(-2.0), Ok(0.0));
        assert_eq!(range.normalize(0.0), Ok(0.5));
        assert_eq!(range.normalize(2.0), Ok(1.0));
        assert_eq!(range.normalize(4.0), Ok(1.5));
    }

    #[test]
    fn normalize_survives_full_f64_span() {
        let range = ColorRange::new(-1e308, 1e308).unwrap();
        assert_eq!(range.normalize(-1e308), Ok(0.0));
        assert_eq!(range.normalize(0.0), Ok(0.5));
        assert_eq!(range.normalize(1e308), Ok(1.0));
    }

    #[test]
    fn flat_range_cannot_normalize() {
        let range = ColorRange::new(3.0, 3.0).unwrap();
        assert!(range.is_degenerate());
        assert_eq!(range.normalize(3.0), Err(RangeError::Degenerate { value: 3.0 }));
    }

    #[test]
    fn color_table_serializes_as_plain_list() {
        let table = FaceColorTable::new(vec!["rgb(1,2,3)".to_string()]);
        assert_eq!(serde_json::to_string(&table).unwrap(), r#"["rgb(1,2,3)"]"#);
        assert_eq!(table.get(0), Some("rgb(1,2,3)"));
        assert_eq!(table.get(1), None);
    }
}
