use crate::core::geo::{LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};

/// Geographic query region sent to the data service.
///
/// Longitudes are taken as-is: a viewport crossing the antimeridian yields
/// `min_longitude > max_longitude` and is queried unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl GeoBounds {
    /// Creates bounds, swapping the latitudes if they arrive reversed
    pub fn new(min_latitude: f64, max_latitude: f64, min_longitude: f64, max_longitude: f64) -> Self {
        let (min_latitude, max_latitude) = if min_latitude <= max_latitude {
            (min_latitude, max_latitude)
        } else {
            (max_latitude, min_latitude)
        };

        Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        }
    }

    /// Checks if the bounds contain a coordinate
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.min_latitude
            && point.lat <= self.max_latitude
            && point.lng >= self.min_longitude
            && point.lng <= self.max_longitude
    }

    /// Query parameters in the order the data service documents them
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("minLatitude", self.min_latitude.to_string()),
            ("maxLatitude", self.max_latitude.to_string()),
            ("minLongitude", self.min_longitude.to_string()),
            ("maxLongitude", self.max_longitude.to_string()),
        ]
    }
}

impl From<&LatLngBounds> for GeoBounds {
    fn from(bounds: &LatLngBounds) -> Self {
        Self::new(
            bounds.south_west.lat,
            bounds.north_east.lat,
            bounds.south_west.lng,
            bounds.north_east.lng,
        )
    }
}

impl From<LatLngBounds> for GeoBounds {
    fn from(bounds: LatLngBounds) -> Self {
        Self::from(&bounds)
    }
}

impl std::fmt::Display for GeoBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lat [{:.4}, {:.4}] lng [{:.4}, {:.4}]",
            self.min_latitude, self.max_latitude, self.min_longitude, self.max_longitude
        )
    }
}
