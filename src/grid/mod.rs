// Grid module - cell records, geometry and the surface-backed grid

pub mod cell;
pub mod geometry;
pub mod surface_grid;
pub mod traits;

pub use cell::{Cell, CellIndex};
pub use geometry::{GridGeometry, PixelPoint, PixelRect, PixelSize};
pub use surface_grid::GridSurface;
pub use traits::GridTrait;

pub use crate::config::GridConfig;
