//! Seams between the heat map pipeline and its collaborators
//!
//! The pipeline never talks to a concrete map widget, data service or
//! location provider; it goes through these traits so hosts can plug in
//! their own and tests can substitute fakes.

use crate::{
    core::{bounds::GeoBounds, geo::LatLng},
    data::density::DensityResult,
    layers::{
        heatmap::{HeatPoint, OverlayOptions},
        manager::OverlayHandle,
    },
    FetchError, GeolocationError, Result,
};
use async_trait::async_trait;

/// The host map as seen by the heat map pipeline
pub trait MapView {
    /// Geographic region currently visible
    fn bounds(&self) -> GeoBounds;

    /// Current zoom level
    fn zoom(&self) -> f64;

    /// Current center
    fn center(&self) -> LatLng;

    /// Moves the map to `center` at `zoom`
    fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()>;

    /// Attaches a heat overlay and returns its handle
    fn add_overlay(&mut self, points: Vec<HeatPoint>, options: OverlayOptions)
        -> Result<OverlayHandle>;

    /// Detaches a previously attached overlay
    fn remove_overlay(&mut self, handle: OverlayHandle) -> Result<()>;
}

/// Anything that can answer a density query for a region
#[async_trait]
pub trait DensitySource: Send + Sync {
    async fn fetch(&self, bounds: GeoBounds) -> std::result::Result<DensityResult, FetchError>;
}

/// Best-effort provider of the user's position
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Resolves the current position, or why it is not available.
    /// Any timeout is the provider's own.
    async fn current_position(&self) -> std::result::Result<LatLng, GeolocationError>;
}
