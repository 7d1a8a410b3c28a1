//! Logarithmic normalization of address counts
//!
//! Each count becomes `scale * ln(count + 1) / ln(max_count + 1)`, so the
//! batch maximum maps to `scale` and a zero count maps to 0.

use crate::core::constants::HEAT_MODIFIER;
use crate::data::density::DensitySample;
use crate::layers::heatmap::HeatPoint;

/// Intensity of one count relative to the batch maximum, in `[0, scale]`.
///
/// A zero `max_count` means an empty or all-zero batch and yields 0.
pub fn intensity(count: u64, max_count: u64, scale: f64) -> f64 {
    if max_count == 0 {
        return 0.0;
    }

    let ratio = (count as f64).ln_1p() / (max_count as f64).ln_1p();
    // A count above max_count only comes from a malformed batch
    scale * ratio.min(1.0)
}

/// Converts samples into heat points, preserving their order
pub fn transform(samples: &[DensitySample], max_count: u64, scale: f64) -> Vec<HeatPoint> {
    samples
        .iter()
        .map(|sample| HeatPoint::new(sample.position(), intensity(sample.count, max_count, scale)))
        .collect()
}

/// [`transform`] bound to a fixed scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityTransformer {
    scale: f64,
}

impl IntensityTransformer {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn transform(&self, samples: &[DensitySample], max_count: u64) -> Vec<HeatPoint> {
        transform(samples, max_count, self.scale)
    }
}

impl Default for IntensityTransformer {
    fn default() -> Self {
        Self::new(HEAT_MODIFIER)
    }
}
