//! Prelude module for common heat map types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use ipv6_heatmap::prelude::*;`

pub use crate::core::{
    bounds::GeoBounds,
    config::HeatmapOptions,
    geo::{LatLng, LatLngBounds, Point},
    map::Map,
    viewport::Viewport,
};

pub use crate::data::{DensityResult, DensitySample};

pub use crate::density::{DensityEndpoint, DensityFetcher};

pub use crate::heatmap::{Completion, HeatmapController, IntensityTransformer, RefreshState};

pub use crate::layers::{
    heatmap::{HeatGrid, HeatPoint, HeatmapLayer, OverlayOptions},
    manager::{OverlayHandle, OverlayManager},
};

pub use crate::input::{EventManager, MapEvent};

pub use crate::bootstrap::{FixedGeolocator, NoGeolocator, ViewportBootstrap};

pub use crate::traits::{DensitySource, Geolocator, MapView};

pub use crate::{
    DecodeError, Error as MapError, FetchError, GeolocationError, RefreshError, Result,
};

pub use std::{
    collections::VecDeque,
    sync::Arc,
    time::Duration,
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};
