//! Defaults for the heat map client.

/// Latitude the map opens at before any geolocation fix.
pub const DEFAULT_LATITUDE: f64 = 35.8750625;

/// Longitude the map opens at before any geolocation fix.
pub const DEFAULT_LONGITUDE: f64 = -78.84066989999997;

/// Zoom level the map opens at.
pub const DEFAULT_ZOOM: f64 = 12.0;

/// Lowest zoom the map allows.
pub const MIN_ZOOM: f64 = 2.0;

/// Highest zoom the map allows.
pub const MAX_ZOOM: f64 = 30.0;

/// Converts the normalized `[0, 1]` density ratio into overlay intensity units.
pub const HEAT_MODIFIER: f64 = 1000.0;

/// Root of the density data service.
pub const DEFAULT_API_ROOT: &str = "http://localhost:7071";

/// Path of the IPv6 density listing, relative to the API root.
pub const IPV6_LIST_PATH: &str = "v1/ipv6";

/// Media type requested from the data service.
pub const PROTOBUF_MEDIA_TYPE: &str = "application/x-protobuf";

/// Environment variable overriding the API root.
pub const API_ROOT_ENV: &str = "HEATMAP_API_ROOT";

/// Default square tile size in pixels, used by the Mercator projection.
pub const TILE_SIZE: f64 = 256.0;

/// Gaussian blur applied when rasterizing a heat overlay, in pixels.
pub const DEFAULT_BLUR: f64 = 15.0;
