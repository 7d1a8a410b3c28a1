//! # ipv6-heatmap
//!
//! Client-side pipeline for an IPv6 address density heat map.
//!
//! Whenever the visible region of a map changes, the density of allocated
//! IPv6 addresses inside it is fetched from a data service as a protobuf
//! message, log-normalized into heat intensities and rendered as a single
//! heat overlay whose blob radius follows the zoom level. On startup the map
//! is centered on the user's position when one is available.

pub mod bootstrap;
pub mod core;
pub mod data;
pub mod density;
pub mod heatmap;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod traits;
pub use crate::core::constants;

use crate::layers::manager::OverlayHandle;

// Re-export public API
pub use crate::core::{
    bounds::GeoBounds,
    config::HeatmapOptions,
    geo::{LatLng, LatLngBounds, Point},
    map::Map,
    viewport::Viewport,
};

pub use data::{DensityResult, DensitySample};

pub use density::{DensityEndpoint, DensityFetcher};

pub use heatmap::{
    radius_for, Completion, HeatmapController, IntensityTransformer, RefreshState,
};

pub use layers::{HeatPoint, HeatmapLayer, OverlayOptions};

pub use input::{EventManager, MapEvent};

pub use bootstrap::{FixedGeolocator, NoGeolocator, ViewportBootstrap};

pub use traits::{DensitySource, Geolocator, MapView};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Errors raised by map operations and configuration
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Unknown overlay: {0}")]
    UnknownOverlay(OverlayHandle),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The density payload could not be decoded
#[derive(Debug, thiserror::Error)]
#[error("malformed density payload: {0}")]
pub struct DecodeError(#[from] prost::DecodeError);

/// A density fetch failed; ends only the fetch that produced it
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Why no position could be obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("permission denied")]
    Denied,

    #[error("position unavailable")]
    Unavailable,

    #[error("timed out")]
    Timeout,
}

/// A refresh that produced no new overlay
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Map(#[from] MapError),
}

/// Error type alias for convenience
pub type Error = MapError;
