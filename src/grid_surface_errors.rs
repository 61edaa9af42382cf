use log::warn;
use std::fmt;

/// Errors surfaced by grid surface operations
#[derive(Debug, Clone, PartialEq)]
pub enum GridSurfaceError {
    /// Missing, wrong-typed or non-finite input to a public operation
    InvalidArgument(String),
    /// Malformed JSON supplied as layout configuration
    ConfigParseError(String),
    /// Cell index outside the current grid bounds
    OutOfRange {
        x: i64,
        y: i64,
        columns: usize,
        rows: usize,
    },
    /// Surface reference does not resolve to a 2D-capable surface
    UnsupportedSurface(String),
    /// File access errors while loading or saving configuration
    Io(String),
}

impl fmt::Display for GridSurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridSurfaceError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            GridSurfaceError::ConfigParseError(msg) => {
                write!(f, "Cannot parse layout configuration: {}", msg)
            }
            GridSurfaceError::OutOfRange {
                x,
                y,
                columns,
                rows,
            } => {
                write!(
                    f,
                    "Cell ({}, {}) is out of range - grid size is {}x{}",
                    x, y, columns, rows
                )
            }
            GridSurfaceError::UnsupportedSurface(msg) => {
                write!(f, "Unsupported drawing surface: {}", msg)
            }
            GridSurfaceError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for GridSurfaceError {}

impl From<std::io::Error> for GridSurfaceError {
    fn from(err: std::io::Error) -> Self {
        GridSurfaceError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GridSurfaceError {
    fn from(err: serde_json::Error) -> Self {
        GridSurfaceError::ConfigParseError(err.to_string())
    }
}

/// Result type alias for grid surface operations
pub type GridSurfaceResult<T> = Result<T, GridSurfaceError>;

/// Validate a signed cell index against the grid dimensions
pub fn validate_cell_coordinates(
    x: i64,
    y: i64,
    columns: usize,
    rows: usize,
) -> GridSurfaceResult<(usize, usize)> {
    let inside = |v: i64, limit: usize| v >= 0 && (v as u64) < limit as u64;
    if !inside(x, columns) || !inside(y, rows) {
        warn!(
            "⚠️ Rejected cell ({}, {}) outside {}x{} grid",
            x, y, columns, rows
        );
        Err(GridSurfaceError::OutOfRange {
            x,
            y,
            columns,
            rows,
        })
    } else {
        Ok((x as usize, y as usize))
    }
}

/// Reject NaN and infinite values; `context` names the offending argument
pub fn validate_finite(value: f64, context: &str) -> GridSurfaceResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GridSurfaceError::InvalidArgument(format!(
            "{} must be a finite number, got {}",
            context, value
        )))
    }
}

/// Validate a grid dimension (column or row count)
pub fn validate_dimension(value: usize, context: &str) -> GridSurfaceResult<usize> {
    if value == 0 {
        Err(GridSurfaceError::InvalidArgument(format!(
            "{} must be positive",
            context
        )))
    } else {
        Ok(value)
    }
}
