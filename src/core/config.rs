//! Configuration for the heat map client
//!
//! Defaults come from [`crate::core::constants`]; the API root can be
//! overridden from the environment or the whole set loaded from JSON.

use crate::core::constants::{
    API_ROOT_ENV, DEFAULT_API_ROOT, DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_ZOOM,
    HEAT_MODIFIER, MAX_ZOOM, MIN_ZOOM,
};
use crate::core::geo::LatLng;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapOptions {
    /// Root URL of the density data service
    pub api_root: String,
    /// Where the map opens when no geolocation fix is available
    pub default_center: LatLng,
    pub default_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Scale applied to the normalized density ratio
    pub heat_modifier: f64,
    /// `None` leaves the transport default in place
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            default_center: LatLng::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE),
            default_zoom: DEFAULT_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            heat_modifier: HEAT_MODIFIER,
            request_timeout: None,
            user_agent: concat!("ipv6-heatmap/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HeatmapOptions {
    /// Defaults, with the API root taken from the environment when set
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(api_root) = std::env::var(API_ROOT_ENV) {
            options.apply_api_root_override(&api_root);
        }
        options
    }

    /// Parses options from a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    fn apply_api_root_override(&mut self, api_root: &str) {
        let api_root = api_root.trim();
        if !api_root.is_empty() {
            log::debug!("{} override: {}", API_ROOT_ENV, api_root);
            self.api_root = api_root.to_string();
        }
    }

    /// Rejects option sets the client cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.api_root.trim().is_empty() {
            return Err(MapError::Config("api_root must not be empty".to_string()));
        }
        reqwest::Url::parse(&self.api_root)
            .map_err(|e| MapError::Config(format!("api_root '{}': {}", self.api_root, e)))?;

        if !(self.min_zoom <= self.max_zoom) {
            return Err(MapError::Config(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if !self.heat_modifier.is_finite() || self.heat_modifier <= 0.0 {
            return Err(MapError::Config(format!(
                "heat_modifier must be positive, got {}",
                self.heat_modifier
            )));
        }
        if !self.default_center.is_valid() {
            return Err(MapError::InvalidCoordinates(self.default_center.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = HeatmapOptions::default();
        assert_eq!(options.api_root, "http://localhost:7071");
        assert_eq!(options.default_center, LatLng::new(35.8750625, -78.84066989999997));
        assert_eq!(options.default_zoom, 12.0);
        assert_eq!(options.min_zoom, 2.0);
        assert_eq!(options.max_zoom, 30.0);
        assert_eq!(options.heat_modifier, 1000.0);
        assert!(options.request_timeout.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_api_root_override() {
        let mut options = HeatmapOptions::default();
        options.apply_api_root_override("   ");
        assert_eq!(options.api_root, DEFAULT_API_ROOT);

        options.apply_api_root_override(" https://density.example.net ");
        assert_eq!(options.api_root, "https://density.example.net");
    }

    #[test]
    fn test_from_json_keeps_defaults() {
        let options =
            HeatmapOptions::from_json(r#"{"api_root": "http://10.0.0.1:8080", "heat_modifier": 500.0}"#)
                .unwrap();
        assert_eq!(options.api_root, "http://10.0.0.1:8080");
        assert_eq!(options.heat_modifier, 500.0);
        assert_eq!(options.max_zoom, 30.0);
    }

    #[test]
    fn test_validation_failures() {
        let bad_root = HeatmapOptions::default().with_api_root("not a url");
        assert!(matches!(bad_root.validate(), Err(MapError::Config(_))));

        let bad_zoom = HeatmapOptions {
            min_zoom: 10.0,
            max_zoom: 5.0,
            ..Default::default()
        };
        assert!(bad_zoom.validate().is_err());

        let bad_heat = HeatmapOptions {
            heat_modifier: 0.0,
            ..Default::default()
        };
        assert!(bad_heat.validate().is_err());

        let bad_center = HeatmapOptions {
            default_center: LatLng::new(120.0, 0.0),
            ..Default::default()
        };
        assert!(matches!(
            bad_center.validate(),
            Err(MapError::InvalidCoordinates(_))
        ));

        assert!(HeatmapOptions::from_json("{ not json").is_err());
    }
}
