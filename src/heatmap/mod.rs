//! Turning density results into the heat overlay

pub mod controller;
pub mod intensity;
pub mod radius;

pub use controller::{Completion, HeatmapController, RefreshState};
pub use intensity::{intensity, transform, IntensityTransformer};
pub use radius::radius_for;
