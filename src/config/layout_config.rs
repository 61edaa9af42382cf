use crate::grid_surface_errors::{validate_finite, GridSurfaceError, GridSurfaceResult};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const OUTER_FRAME_WIDTH_KEY: &str = "outerFrameWidth";
pub const OUTER_FRAME_COLOR_KEY: &str = "outerFrameColor";
pub const CELL_FRAME_WIDTH_KEY: &str = "cellFrameWidth";
pub const CELL_FRAME_COLOR_KEY: &str = "cellFrameColor";

/// Frame widths (logical units) and colors used when painting the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Thickness of the frame painted around the whole grid
    pub outer_frame_width: f64,
    pub outer_frame_color: String,
    /// Thickness of the shared line between adjacent cells
    pub cell_frame_width: f64,
    pub cell_frame_color: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            outer_frame_width: 2.0,
            outer_frame_color: "#777777".to_string(),
            cell_frame_width: 0.5,
            cell_frame_color: "#aaaaaa".to_string(),
        }
    }
}

/// Partial update of a [`LayoutConfig`]; absent fields keep their value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutConfigPatch {
    pub outer_frame_width: Option<f64>,
    pub outer_frame_color: Option<String>,
    pub cell_frame_width: Option<f64>,
    pub cell_frame_color: Option<String>,
}

impl LayoutConfigPatch {
    /// Parse JSON text into a patch
    pub fn from_json_str(text: &str) -> GridSurfaceResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Build a patch from a JSON value. Unknown keys are dropped; a recognized
    /// key holding the wrong JSON type rejects the whole patch.
    pub fn from_value(value: &Value) -> GridSurfaceResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            GridSurfaceError::InvalidArgument(
                "layout configuration must be a JSON object".to_string(),
            )
        })?;

        let patch = Self {
            outer_frame_width: number_field(object, OUTER_FRAME_WIDTH_KEY)?,
            outer_frame_color: string_field(object, OUTER_FRAME_COLOR_KEY)?,
            cell_frame_width: number_field(object, CELL_FRAME_WIDTH_KEY)?,
            cell_frame_color: string_field(object, CELL_FRAME_COLOR_KEY)?,
        };
        patch.validate()?;

        let ignored: Vec<&String> = object
            .keys()
            .filter(|key| !is_recognized_key(key))
            .collect();
        if !ignored.is_empty() {
            debug!("Ignoring unrecognized layout keys: {:?}", ignored);
        }

        Ok(patch)
    }

    /// Reject non-finite frame widths
    pub fn validate(&self) -> GridSurfaceResult<()> {
        if let Some(width) = self.outer_frame_width {
            validate_finite(width, OUTER_FRAME_WIDTH_KEY)?;
        }
        if let Some(width) = self.cell_frame_width {
            validate_finite(width, CELL_FRAME_WIDTH_KEY)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn is_recognized_key(key: &str) -> bool {
    matches!(
        key,
        OUTER_FRAME_WIDTH_KEY | OUTER_FRAME_COLOR_KEY | CELL_FRAME_WIDTH_KEY | CELL_FRAME_COLOR_KEY
    )
}

fn number_field(object: &Map<String, Value>, key: &str) -> GridSurfaceResult<Option<f64>> {
    match object.get(key) {
        None => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            GridSurfaceError::InvalidArgument(format!("`{}` must be a number, got {}", key, value))
        }),
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> GridSurfaceResult<Option<String>> {
    match object.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(GridSurfaceError::InvalidArgument(format!(
            "`{}` must be a string, got {}",
            key, other
        ))),
    }
}

impl LayoutConfig {
    /// Overwrite every field present in `patch`
    pub fn apply(&mut self, patch: &LayoutConfigPatch) {
        if let Some(width) = patch.outer_frame_width {
            self.outer_frame_width = width;
        }
        if let Some(color) = &patch.outer_frame_color {
            self.outer_frame_color = color.clone();
        }
        if let Some(width) = patch.cell_frame_width {
            self.cell_frame_width = width;
        }
        if let Some(color) = &patch.cell_frame_color {
            self.cell_frame_color = color.clone();
        }
    }

    /// Current configuration as compact JSON text
    pub fn to_json(&self) -> String {
        // Serializing a struct of finite numbers and strings cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Load configuration from file; missing keys fall back to defaults
    pub fn load_from_file(path: &str) -> GridSurfaceResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let patch = LayoutConfigPatch::from_json_str(&contents)?;
        let mut config = LayoutConfig::default();
        config.apply(&patch);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &str) -> GridSurfaceResult<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
