use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// One aggregated address count tied to a geographic point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensitySample {
    /// CIDR prefix the count was aggregated under; empty when the service omits it
    pub network: String,
    pub latitude: f64,
    pub longitude: f64,
    pub count: u64,
}

impl DensitySample {
    pub fn new(latitude: f64, longitude: f64, count: u64) -> Self {
        Self {
            network: String::new(),
            latitude,
            longitude,
            count,
        }
    }

    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = network.into();
        self
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// Decoded answer to a single density query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DensityResult {
    /// Largest count in the queried region, used as the normalization ceiling
    pub max_count: u64,
    /// Samples in wire order
    pub samples: Vec<DensitySample>,
}

impl DensityResult {
    pub fn new(max_count: u64, samples: Vec<DensitySample>) -> Self {
        Self { max_count, samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sum of every sample's count
    pub fn total_count(&self) -> u64 {
        self.samples
            .iter()
            .fold(0u64, |total, sample| total.saturating_add(sample.count))
    }
}
