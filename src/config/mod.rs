// Configuration module - grid dimensions and frame layout settings
pub mod grid_config;
pub mod layout_config;

pub use grid_config::GridConfig;
pub use layout_config::{LayoutConfig, LayoutConfigPatch};
