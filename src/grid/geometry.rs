// Grid geometry - cell pixel sizes, border segments and the inverse hit-test
//
// Widths: F = outer frame, f = inter-cell frame. Borders between cells are
// shared lines, so a row of C cells spans C * (cell + f) - f between frames.

use crate::config::{GridConfig, LayoutConfig};
use crate::grid::cell::CellIndex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Top, right, bottom and left frame strips of a `width` x `height` surface
pub fn outer_frame_rects(width: f64, height: f64, frame: f64) -> [PixelRect; 4] {
    [
        PixelRect::new(0.0, 0.0, width, frame),
        PixelRect::new(width - frame, 0.0, frame, height),
        PixelRect::new(0.0, height - frame, width, frame),
        PixelRect::new(0.0, 0.0, frame, height),
    ]
}

/// Geometry of one render pass, in logical units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub logical_width: f64,
    pub logical_height: f64,
    pub outer_frame_width: f64,
    pub cell_frame_width: f64,
    pub columns: usize,
    pub rows: usize,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl GridGeometry {
    pub fn compute(logical_size: (f64, f64), layout: &LayoutConfig, grid: GridConfig) -> Self {
        let (width, height) = logical_size;
        let outer = layout.outer_frame_width;
        let inner = layout.cell_frame_width;

        Self {
            logical_width: width,
            logical_height: height,
            outer_frame_width: outer,
            cell_frame_width: inner,
            columns: grid.columns,
            rows: grid.rows,
            cell_width: (width - 2.0 * outer + inner) / grid.columns as f64 - inner,
            cell_height: (height - 2.0 * outer + inner) / grid.rows as f64 - inner,
        }
    }

    pub fn grid_config(&self) -> GridConfig {
        GridConfig::new(self.columns, self.rows)
    }

    pub fn cell_size(&self) -> PixelSize {
        PixelSize {
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    /// Top-left of the content area of cell (x, y)
    pub fn cell_origin(&self, x: usize, y: usize) -> PixelPoint {
        PixelPoint {
            x: self.outer_frame_width + (self.cell_width + self.cell_frame_width) * x as f64,
            y: self.outer_frame_width + (self.cell_height + self.cell_frame_width) * y as f64,
        }
    }

    pub fn outer_frame_rects(&self) -> [PixelRect; 4] {
        outer_frame_rects(
            self.logical_width,
            self.logical_height,
            self.outer_frame_width,
        )
    }

    /// Border segments around cell (x, y) that are shared with a neighbour.
    /// Each segment is one line width longer than the cell so the crossing
    /// points between borders are covered.
    pub fn cell_border_rects(&self, x: usize, y: usize) -> Vec<PixelRect> {
        let frame = self.outer_frame_width;
        let line = self.cell_frame_width;
        let (w, h) = (self.cell_width, self.cell_height);
        let (fx, fy) = (x as f64, y as f64);

        // one line width before the cell's own content area
        let lead_x = frame + w * fx + line * (fx - 1.0);
        let lead_y = frame + h * fy + line * (fy - 1.0);

        let mut rects = Vec::with_capacity(4);
        if y > 0 {
            rects.push(PixelRect::new(lead_x, lead_y, w + line, line));
        }
        if x + 1 < self.columns {
            let right_x = frame + w * (fx + 1.0) + line * fx;
            rects.push(PixelRect::new(right_x, lead_y, line, h + line));
        }
        if y + 1 < self.rows {
            let below_y = frame + h * (fy + 1.0) + line * fy;
            rects.push(PixelRect::new(lead_x, below_y, w + line, line));
        }
        if x > 0 {
            rects.push(PixelRect::new(lead_x, lead_y, line, h + line));
        }
        rects
    }

    /// Inverse of [`cell_origin`](Self::cell_origin). Points on the outer frame,
    /// outside the surface, or past the last cell are unresolved.
    ///
    /// The offset subtracted here is half the outer frame, not the full frame
    /// used when painting.
    pub fn locate(&self, px: f64, py: f64) -> Option<CellIndex> {
        let x = self.locate_axis(px, self.logical_width, self.cell_width, self.columns)?;
        let y = self.locate_axis(py, self.logical_height, self.cell_height, self.rows)?;
        Some(CellIndex::new(x, y))
    }

    fn locate_axis(&self, coord: f64, extent: f64, cell: f64, count: usize) -> Option<usize> {
        let frame = self.outer_frame_width;
        if !(coord > frame && coord < extent - frame) {
            return None;
        }
        let index = ((coord - frame / 2.0) / (cell + self.cell_frame_width)).trunc();
        if index.is_finite() && index >= 0.0 && index < count as f64 {
            Some(index as usize)
        } else {
            None
        }
    }
}
