use serde::{Deserialize, Serialize};
use surface_types::{is_named_background, RenderConfig, DEFAULT_PAPER_BACKGROUND};

pub const WIDTH_RANGE: (u32, u32) = (700, 1400);
pub const HEIGHT_RANGE: (u32, u32) = (500, 1200);
pub const SIZE_STEP: u32 = 50;

/// Settings exposed in the viewer's control panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerControls {
    pub background: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_true")]
    pub show_axes: bool,
    #[serde(default)]
    pub wireframe: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ViewerControls {
    fn default() -> Self {
        Self {
            background: DEFAULT_PAPER_BACKGROUND.to_string(),
            width: 1000,
            height: 600,
            show_axes: true,
            wireframe: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlsError {
    #[error("unknown background color {0:?}")]
    UnknownBackground(String),

    #[error("{dimension} {value} is outside {min}..={max}")]
    OutOfRange {
        dimension: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("{dimension} {value} is not a multiple of {step}")]
    OffStep {
        dimension: &'static str,
        value: u32,
        step: u32,
    },
}

impl ViewerControls {
    pub fn validate(&self) -> Result<(), ControlsError> {
        if !is_named_background(&self.background) {
            return Err(ControlsError::UnknownBackground(self.background.clone()));
        }
        check_dimension("width", self.width, WIDTH_RANGE)?;
        check_dimension("height", self.height, HEIGHT_RANGE)
    }

    pub fn to_render_config(&self) -> RenderConfig {
        RenderConfig {
            title: String::new(),
            background: self.background.clone(),
            width: self.width,
            height: self.height,
            show_axes: self.show_axes,
            wireframe: self.wireframe,
        }
    }
}

fn check_dimension(
    dimension: &'static str,
    value: u32,
    (min, max): (u32, u32),
) -> Result<(), ControlsError> {
    if value < min || value > max {
        return Err(ControlsError::OutOfRange {
            dimension,
            value,
            min,
            max,
        });
    }
    if value % SIZE_STEP != 0 {
        return Err(ControlsError::OffStep {
            dimension,
            value,
            step: SIZE_STEP,
        });
    }
    Ok(())
}
