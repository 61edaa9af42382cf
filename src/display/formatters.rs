// Display formatting utilities

use crate::grid::{CellIndex, PixelPoint};

/// Hit-test result as shown in logs
pub fn format_location(location: Option<CellIndex>) -> String {
    match location {
        Some(index) => index.to_string(),
        None => "unresolved".to_string(),
    }
}

/// Pixel coordinates with one decimal
pub fn format_pixel_point(point: PixelPoint) -> String {
    format!("{:.1},{:.1}", point.x, point.y)
}

/// Column header line for a grid `width` characters per cell
pub fn column_headers(columns: usize, width: usize) -> String {
    let mut line = String::from("    ");
    for col in 0..columns {
        line.push_str(&format!(" {:>width$}", col, width = width));
    }
    line
}

/// Row prefix for grid rows
pub fn row_prefix(row: usize) -> String {
    format!("{:2}: ", row)
}
