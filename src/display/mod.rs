// Display module for grid formatting and diagnostics
pub mod formatters;

pub use formatters::{column_headers, format_location, format_pixel_point, row_prefix};

use crate::grid::Cell;

/// Trait for displaying grid cells
pub trait CellDisplay {
    /// Short text shown for this cell in a grid dump
    fn display_cell(&self) -> String;

    /// Whether the geometry pass has placed this cell
    fn is_placed(&self) -> bool {
        true
    }
}

impl CellDisplay for Cell {
    fn display_cell(&self) -> String {
        match self.pixel_origin() {
            Some(origin) => format_pixel_point(origin),
            None => ".".to_string(),
        }
    }

    fn is_placed(&self) -> bool {
        self.pixel_origin().is_some()
    }
}
