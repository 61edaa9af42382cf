// Surface Grid - paints a uniform grid onto a drawing surface and maps pointer
// positions back to cell indices

use crate::config::{GridConfig, LayoutConfig, LayoutConfigPatch};
use crate::grid::cell::{Cell, CellIndex};
use crate::grid::geometry::{outer_frame_rects, GridGeometry, PixelPoint, PixelSize};
use crate::grid::traits::GridTrait;
use crate::grid_surface_errors::{
    validate_dimension, validate_finite, GridSurfaceError, GridSurfaceResult,
};
use crate::pointer::{cell_tracker, CellReporter, ListenerSet};
use crate::surface::{DrawingSurface, SurfaceRef, SurfaceResolver};
use crate::DEFAULT_SCALE;
use log::{debug, info, warn};
use serde_json::Value;
use std::rc::Rc;

/// Largest backing store `set_scale` will allocate, in device pixels
pub const MAX_BACKING_PIXELS: u64 = 1 << 28;

pub struct GridSurface<S: DrawingSurface> {
    surface: S,
    layout: LayoutConfig,
    scale: f64,
    geometry: Option<GridGeometry>,
    cells: Vec<Vec<Cell>>,
    listeners: ListenerSet,
    reporter: Option<CellReporter>,
}

impl<S: DrawingSurface> GridSurface<S> {
    /// Wrap a surface. When both dimensions are given and positive the grid
    /// is initialized immediately.
    pub fn new(surface: S, columns: Option<usize>, rows: Option<usize>) -> GridSurfaceResult<Self> {
        if !surface.supports_2d() {
            return Err(GridSurfaceError::UnsupportedSurface(
                "surface does not provide a 2D drawing context".to_string(),
            ));
        }

        let mut grid = Self {
            surface,
            layout: LayoutConfig::default(),
            scale: 1.0,
            geometry: None,
            cells: Vec::new(),
            listeners: ListenerSet::new(),
            reporter: None,
        };

        if let (Some(columns), Some(rows)) = (columns, rows) {
            if columns > 0 && rows > 0 {
                grid.initialize_with(columns, rows)?;
            }
        }
        Ok(grid)
    }

    /// Resolve a handle or lookup key, then construct as [`new`](Self::new)
    pub fn from_ref<R>(
        surface_ref: SurfaceRef<'_, S>,
        resolver: &R,
        columns: Option<usize>,
        rows: Option<usize>,
    ) -> GridSurfaceResult<Self>
    where
        R: SurfaceResolver<Surface = S>,
    {
        let surface = match surface_ref {
            SurfaceRef::Handle(surface) => surface,
            SurfaceRef::Key(key) => {
                if key.trim().is_empty() {
                    return Err(GridSurfaceError::InvalidArgument(
                        "surface key is empty".to_string(),
                    ));
                }
                resolver.resolve(key).ok_or_else(|| {
                    GridSurfaceError::InvalidArgument(format!("no surface found for `{}`", key))
                })?
            }
        };
        Self::new(surface, columns, rows)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Current layout configuration as JSON text
    pub fn layout_config_json(&self) -> String {
        self.layout.to_json()
    }

    /// Merge a partial configuration and re-initialize with the current
    /// dimensions. A grid that was never initialized only stores the values.
    /// On error the previous configuration is kept.
    pub fn set_layout_config(&mut self, patch: &LayoutConfigPatch) -> GridSurfaceResult<()> {
        patch.validate()?;
        let previous = self.layout.clone();
        self.layout.apply(patch);
        debug!("Layout configuration now {}", self.layout.to_json());
        if self.geometry.is_some() {
            if let Err(e) = self.initialize() {
                self.layout = previous;
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn set_layout_config_value(&mut self, value: &Value) -> GridSurfaceResult<()> {
        let patch = LayoutConfigPatch::from_value(value)?;
        self.set_layout_config(&patch)
    }

    pub fn set_layout_config_json(&mut self, text: &str) -> GridSurfaceResult<()> {
        let patch = LayoutConfigPatch::from_json_str(text)?;
        self.set_layout_config(&patch)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Resize the backing store to `value` device pixels per logical unit,
    /// keeping the displayed size constant. Does not repaint.
    ///
    /// Fails without touching the surface when the backing store would
    /// exceed [`MAX_BACKING_PIXELS`] or when a non-empty surface would round
    /// down to zero pixels, which would lose the logical size.
    pub fn set_scale(&mut self, value: f64) -> GridSurfaceResult<()> {
        let value = validate_finite(value, "scale")?;
        if value <= 0.0 {
            return Err(GridSurfaceError::InvalidArgument(format!(
                "scale must be positive, got {}",
                value
            )));
        }

        let (logical_width, logical_height) = self.logical_size();
        let (backing_width, backing_height) =
            backing_size_for(logical_width, logical_height, value)?;

        self.surface.set_backing_size(backing_width, backing_height);
        self.surface.set_scale_transform(value);
        self.surface.set_display_size(logical_width, logical_height);
        debug!(
            "Scale {} -> {}: backing {}x{}, displayed {}x{}",
            self.scale, value, backing_width, backing_height, logical_width, logical_height
        );
        self.scale = value;
        Ok(())
    }

    /// Surface size in logical units
    pub fn logical_size(&self) -> (f64, f64) {
        let (width, height) = self.surface.backing_size();
        (width as f64 / self.scale, height as f64 / self.scale)
    }

    /// Re-run initialization with the stored dimensions
    pub fn initialize(&mut self) -> GridSurfaceResult<()> {
        let config = self.grid_config().ok_or_else(|| {
            GridSurfaceError::InvalidArgument(
                "columns and rows must be supplied before the first initialization".to_string(),
            )
        })?;
        self.run_initialization(config)
    }

    /// Set new dimensions and initialize: reset the scale, recompute the
    /// geometry, repaint every border and the outer frame, and reinstall the
    /// pointer listener.
    pub fn initialize_with(&mut self, columns: usize, rows: usize) -> GridSurfaceResult<()> {
        let columns = validate_dimension(columns, "columns")?;
        let rows = validate_dimension(rows, "rows")?;
        self.run_initialization(GridConfig::new(columns, rows))
    }

    /// Set the scale, then re-initialize. Initialization applies
    /// [`DEFAULT_SCALE`], so the grid ends up at the default scale.
    pub fn set_scale_and_reinit(&mut self, value: f64) -> GridSurfaceResult<()> {
        self.set_scale(value)?;
        self.initialize()
    }

    fn run_initialization(&mut self, config: GridConfig) -> GridSurfaceResult<()> {
        self.set_scale(DEFAULT_SCALE)?;
        let previous = self.geometry;

        let geometry = GridGeometry::compute(self.logical_size(), &self.layout, config);
        if geometry.cell_width <= 0.0 || geometry.cell_height <= 0.0 {
            warn!(
                "⚠️ Degenerate cell size {:.2}x{:.2} for a {}x{} grid",
                geometry.cell_width, geometry.cell_height, config.columns, config.rows
            );
        }
        self.geometry = Some(geometry);

        if let Err(e) = self.paint_all_cells() {
            self.geometry = previous;
            return Err(e);
        }
        self.paint_outer_frame();
        self.install_pointer_listener();

        info!(
            "✅ Grid initialized: {}x{} cells of {:.2}x{:.2} at scale {}",
            config.columns, config.rows, geometry.cell_width, geometry.cell_height, self.scale
        );
        Ok(())
    }

    /// Cell content size from the last initialization
    pub fn cell_pixel_size(&self) -> Option<PixelSize> {
        self.geometry.map(|g| g.cell_size())
    }

    pub fn geometry(&self) -> Option<&GridGeometry> {
        self.geometry.as_ref()
    }

    pub fn columns(&self) -> Option<usize> {
        self.geometry.map(|g| g.columns)
    }

    pub fn rows(&self) -> Option<usize> {
        self.geometry.map(|g| g.rows)
    }

    /// Paint the four frame strips along the surface edges
    pub fn paint_outer_frame(&mut self) {
        let (width, height) = self.logical_size();
        self.surface.set_fill_color(&self.layout.outer_frame_color);
        for rect in outer_frame_rects(width, height, self.layout.outer_frame_width) {
            self.surface
                .fill_rect(rect.x, rect.y, rect.width, rect.height);
        }
    }

    /// Paint the borders cell (x, y) shares with its neighbours and return the
    /// cell's content origin
    pub fn paint_cell_border(&mut self, x: i64, y: i64) -> GridSurfaceResult<PixelPoint> {
        let (cx, cy) = self.validate_coordinates(x, y)?;
        let geometry = self.geometry.ok_or(GridSurfaceError::OutOfRange {
            x,
            y,
            columns: 0,
            rows: 0,
        })?;

        self.surface.set_fill_color(&self.layout.cell_frame_color);
        for rect in geometry.cell_border_rects(cx, cy) {
            self.surface
                .fill_rect(rect.x, rect.y, rect.width, rect.height);
        }
        Ok(geometry.cell_origin(cx, cy))
    }

    /// Rebuild every cell and paint its borders. The cell list is replaced
    /// only once every cell has been placed.
    pub fn paint_all_cells(&mut self) -> GridSurfaceResult<()> {
        let Some(geometry) = self.geometry else {
            self.cells.clear();
            return Ok(());
        };

        let mut cells: Vec<Vec<Cell>> = (0..geometry.columns)
            .map(|x| (0..geometry.rows).map(|y| Cell::new(x, y)).collect())
            .collect();

        for (x, column) in cells.iter_mut().enumerate() {
            for (y, cell) in column.iter_mut().enumerate() {
                let origin = self.paint_cell_border(x as i64, y as i64)?;
                cell.set_pixel_origin(origin.x, origin.y)?;
                cell.set_pixel_size(geometry.cell_width, geometry.cell_height)?;
            }
        }
        self.cells = cells;
        Ok(())
    }

    /// Clear the whole logical surface. Initialization does not call this, so
    /// paint from a larger previous grid can remain visible.
    pub fn clear(&mut self) {
        let (width, height) = self.logical_size();
        self.surface.clear_rect(0.0, 0.0, width, height);
    }

    /// Cell under a surface-relative point, `None` on the frame or outside.
    ///
    /// Bounds come from the logical size captured at the last initialization,
    /// so after an external resize without re-initializing the result is
    /// relative to the stale size.
    pub fn locate_cell(&self, px: f64, py: f64) -> GridSurfaceResult<Option<CellIndex>> {
        let px = validate_finite(px, "px")?;
        let py = validate_finite(py, "py")?;
        Ok(self.geometry.and_then(|g| g.locate(px, py)))
    }

    /// Also deliver pointer-move hit-test results to `reporter`
    pub fn set_cell_reporter<F>(&mut self, reporter: F)
    where
        F: Fn(Option<CellIndex>) + 'static,
    {
        self.reporter = Some(Rc::new(reporter));
        if self.geometry.is_some() {
            self.install_pointer_listener();
        }
    }

    pub fn active_listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn install_pointer_listener(&mut self) {
        if let Some(geometry) = self.geometry {
            let listener = cell_tracker(geometry, self.reporter.clone());
            self.listeners.install(&mut self.surface, listener);
        }
    }
}

/// Device-pixel backing size for a logical size at `scale`
fn backing_size_for(
    logical_width: f64,
    logical_height: f64,
    scale: f64,
) -> GridSurfaceResult<(u32, u32)> {
    let width = (logical_width * scale).round();
    let height = (logical_height * scale).round();

    if width > u32::MAX as f64
        || height > u32::MAX as f64
        || width * height > MAX_BACKING_PIXELS as f64
    {
        return Err(GridSurfaceError::InvalidArgument(format!(
            "scale {} needs a {}x{} backing store, over the {} pixel limit",
            scale, width, height, MAX_BACKING_PIXELS
        )));
    }
    if (logical_width > 0.0 && width < 1.0) || (logical_height > 0.0 && height < 1.0) {
        return Err(GridSurfaceError::InvalidArgument(format!(
            "scale {} rounds a {}x{} surface down to an empty backing store",
            scale, logical_width, logical_height
        )));
    }
    Ok((width as u32, height as u32))
}

impl<S: DrawingSurface> GridTrait for GridSurface<S> {
    fn grid_config(&self) -> Option<GridConfig> {
        self.geometry.map(|g| g.grid_config())
    }

    fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }
}

impl<S: DrawingSurface> Drop for GridSurface<S> {
    fn drop(&mut self) {
        self.listeners.clear(&mut self.surface);
    }
}
