// Grid Surface: paints an interactive grid onto a 2D drawing surface and maps
// pointer positions back to cell indices

pub mod color;
pub mod config;
pub mod display;
pub mod grid;
pub mod grid_display;
pub mod pointer;
pub mod surface;

pub mod grid_surface_errors;
pub use grid_surface_errors::{
    validate_cell_coordinates, validate_dimension, validate_finite, GridSurfaceError,
    GridSurfaceResult,
};

// Re-export main types for convenience
pub use color::Rgba;
pub use config::{GridConfig, LayoutConfig, LayoutConfigPatch};
pub use display::CellDisplay;
pub use grid::{
    Cell, CellIndex, GridGeometry, GridSurface, GridTrait, PixelPoint, PixelRect, PixelSize,
};
pub use grid_display::{display_grid, render_grid, GridDisplayConfig};
pub use pointer::{CellReporter, ListenerSet};
pub use surface::{
    DrawOp, DrawingSurface, ListenerId, MemorySurface, PageMetrics, PointerEvent,
    PointerEventKind, PointerListener, SurfaceRect, SurfaceRef, SurfaceRegistry, SurfaceResolver,
};

/// Scale applied by every initialization
pub const DEFAULT_SCALE: f64 = 2.0;
