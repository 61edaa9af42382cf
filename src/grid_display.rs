// Grid Display Module - text dump of a grid's cells for diagnostics

use crate::display::{column_headers, row_prefix, CellDisplay};
use crate::grid::GridTrait;

/// Standard grid display configuration
pub struct GridDisplayConfig {
    pub show_headers: bool,
    /// Print each cell's pixel origin instead of a placement marker
    pub show_pixel_origins: bool,
    pub compact_format: bool,
}

impl Default for GridDisplayConfig {
    fn default() -> Self {
        Self {
            show_headers: true,
            show_pixel_origins: false,
            compact_format: false,
        }
    }
}

/// Render the grid row by row, one column per cell
pub fn render_grid<G: GridTrait>(
    grid: &G,
    display_config: &GridDisplayConfig,
    title: Option<&str>,
) -> String {
    let mut lines = Vec::new();
    let Some(config) = grid.grid_config() else {
        lines.push("Grid not initialized".to_string());
        return lines.join("\n");
    };

    let texts: Vec<Vec<String>> = grid
        .cells()
        .iter()
        .map(|column| {
            column
                .iter()
                .map(|cell| {
                    if display_config.show_pixel_origins {
                        cell.display_cell()
                    } else if cell.is_placed() {
                        "#".to_string()
                    } else {
                        ".".to_string()
                    }
                })
                .collect()
        })
        .collect();
    let width = texts
        .iter()
        .flatten()
        .map(|text| text.chars().count())
        .max()
        .unwrap_or(1)
        .max(2);

    if display_config.show_headers {
        if !display_config.compact_format {
            lines.push("=".repeat(60));
        }
        lines.push(match title {
            Some(title) => title.to_string(),
            None => format!(
                "Grid Surface - {}x{} Grid ({} cells)",
                config.columns,
                config.rows,
                grid.cell_count()
            ),
        });
        if !display_config.compact_format {
            lines.push("=".repeat(60));
        }
    }

    lines.push(column_headers(config.columns, width));
    for row in 0..config.rows {
        let mut line = row_prefix(row);
        for column in texts.iter().take(config.columns) {
            let text = column.get(row).map(String::as_str).unwrap_or("?");
            line.push_str(&format!(" {:>width$}", text, width = width));
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Print the grid to stdout
pub fn display_grid<G: GridTrait>(grid: &G, display_config: &GridDisplayConfig, title: Option<&str>) {
    println!("{}", render_grid(grid, display_config, title));
}
