//! Heat overlays and their registry

pub mod heatmap;
pub mod manager;

pub use heatmap::{HeatGrid, HeatPoint, HeatmapLayer, OverlayOptions};
pub use manager::{OverlayHandle, OverlayManager};
