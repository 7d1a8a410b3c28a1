//! Initial centering of the map on the user's position

use crate::{
    core::{config::HeatmapOptions, geo::LatLng},
    heatmap::{Completion, HeatmapController},
    traits::{Geolocator, MapView},
    GeolocationError, Result,
};
use async_trait::async_trait;
use futures::future::{self, Either};
use std::sync::Arc;

/// Picks the starting center: the user's position if available, else a fallback
pub struct ViewportBootstrap {
    geolocator: Arc<dyn Geolocator>,
    fallback: LatLng,
}

impl ViewportBootstrap {
    pub fn new(geolocator: Arc<dyn Geolocator>, fallback: LatLng) -> Self {
        Self {
            geolocator,
            fallback,
        }
    }

    /// Falls back to the configured default center
    pub fn from_options(geolocator: Arc<dyn Geolocator>, options: &HeatmapOptions) -> Self {
        Self::new(geolocator, options.default_center)
    }

    /// Resolves the starting center. Never fails.
    ///
    /// Does not touch the map, so it can be awaited alongside the first refresh.
    pub async fn resolve_center(&self) -> LatLng {
        match self.geolocator.current_position().await {
            Ok(position) if position.is_valid() => {
                log::info!("centering on geolocated position {}", position);
                position
            }
            Ok(position) => {
                log::warn!(
                    "geolocator returned {} which is out of range, using {}",
                    position,
                    self.fallback
                );
                self.fallback
            }
            Err(e) => {
                log::warn!("geolocation failed ({}), using {}", e, self.fallback);
                self.fallback
            }
        }
    }

    /// Recenters `map` at its current zoom
    pub fn apply<M: MapView + ?Sized>(&self, map: &mut M, center: LatLng) -> Result<()> {
        let zoom = map.zoom();
        map.set_view(center, zoom)
    }

    /// [`resolve_center`](Self::resolve_center) followed by [`apply`](Self::apply)
    pub async fn run<M: MapView + ?Sized>(&self, map: &mut M) -> Result<LatLng> {
        let center = self.resolve_center().await;
        self.apply(map, center)?;
        Ok(center)
    }

    /// Like [`run`](Self::run), but keeps applying `controller`'s fetches while
    /// the position resolves.
    ///
    /// Returns as soon as the map is recentered; fetches still in flight are
    /// left to the caller. The returned completions are the ones applied on
    /// the way, in arrival order.
    pub async fn run_alongside<M: MapView + ?Sized>(
        &self,
        map: &mut M,
        controller: &mut HeatmapController,
    ) -> Result<(LatLng, Vec<Completion>)> {
        let mut resolve = Box::pin(self.resolve_center());
        let mut completions = Vec::new();

        let center = loop {
            let next = Box::pin(controller.next_completion(&mut *map));
            match future::select(resolve.as_mut(), next).await {
                Either::Left((center, _)) => break center,
                Either::Right((Some(completion), _)) => completions.push(completion),
                // Nothing in flight, only the position is left to wait for
                Either::Right((None, pending)) => break pending.await,
            }
        };

        self.apply(map, center)?;
        Ok((center, completions))
    }
}

/// Always reports the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub LatLng);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> std::result::Result<LatLng, GeolocationError> {
        Ok(self.0)
    }
}

/// Never has a position; used when no location provider exists
#[derive(Debug, Clone, Copy)]
pub struct NoGeolocator(pub GeolocationError);

impl Default for NoGeolocator {
    fn default() -> Self {
        Self(GeolocationError::Unavailable)
    }
}

#[async_trait]
impl Geolocator for NoGeolocator {
    async fn current_position(&self) -> std::result::Result<LatLng, GeolocationError> {
        Err(self.0)
    }
}
