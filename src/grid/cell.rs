// Cell - per-position record of the grid's pixel geometry

use crate::color::Rgba;
use crate::grid::geometry::{PixelPoint, PixelSize};
use crate::grid_surface_errors::{validate_finite, GridSurfaceResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical (column, row) coordinates of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellIndex {
    pub x: usize,
    pub y: usize,
}

impl CellIndex {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    index: CellIndex,
    pixel_origin: Option<PixelPoint>,
    pixel_size: PixelSize,
    color: Option<Rgba>,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            index: CellIndex::new(x, y),
            pixel_origin: None,
            pixel_size: PixelSize::default(),
            color: None,
        }
    }

    pub fn index(&self) -> CellIndex {
        self.index
    }

    pub fn x(&self) -> usize {
        self.index.x
    }

    pub fn y(&self) -> usize {
        self.index.y
    }

    /// Top-left of the content area; `None` until the geometry pass has run
    pub fn pixel_origin(&self) -> Option<PixelPoint> {
        self.pixel_origin
    }

    pub fn set_pixel_origin(&mut self, x: f64, y: f64) -> GridSurfaceResult<()> {
        let x = validate_finite(x, "Cell pixel x")?;
        let y = validate_finite(y, "Cell pixel y")?;
        self.pixel_origin = Some(PixelPoint { x, y });
        Ok(())
    }

    pub fn pixel_size(&self) -> PixelSize {
        self.pixel_size
    }

    pub fn set_pixel_size(&mut self, width: f64, height: f64) -> GridSurfaceResult<()> {
        let width = validate_finite(width, "Cell width")?;
        let height = validate_finite(height, "Cell height")?;
        self.pixel_size = PixelSize { width, height };
        Ok(())
    }

    /// Reserved for per-cell styling; never painted
    pub fn color(&self) -> Option<Rgba> {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = Some(color);
    }
}
