// Common trait for grids whose cells carry pixel geometry

use crate::config::GridConfig;
use crate::grid::cell::Cell;
use crate::grid_surface_errors::{
    validate_cell_coordinates, GridSurfaceError, GridSurfaceResult,
};

pub trait GridTrait {
    /// Dimensions of the last render pass, if any
    fn grid_config(&self) -> Option<GridConfig>;

    /// Cells indexed `[column][row]`
    fn cells(&self) -> &[Vec<Cell>];

    fn cell_count(&self) -> usize {
        self.cells().iter().map(Vec::len).sum()
    }

    /// Validate coordinates against grid bounds
    fn validate_coordinates(&self, x: i64, y: i64) -> GridSurfaceResult<(usize, usize)> {
        let config = self.grid_config().unwrap_or(GridConfig::new(0, 0));
        validate_cell_coordinates(x, y, config.columns, config.rows)
    }

    fn cell(&self, x: i64, y: i64) -> GridSurfaceResult<&Cell> {
        let (cx, cy) = self.validate_coordinates(x, y)?;
        self.cells()
            .get(cx)
            .and_then(|column| column.get(cy))
            .ok_or(GridSurfaceError::OutOfRange {
                x,
                y,
                columns: self.cells().len(),
                rows: self.cells().first().map_or(0, Vec::len),
            })
    }
}
