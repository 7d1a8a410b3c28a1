use crate::core::{
    constants::{DEFAULT_BLUR, HEAT_MODIFIER},
    geo::{LatLng, Point},
    viewport::Viewport,
};
use serde::{Deserialize, Serialize};

/// Represents a weighted data point handed to the heat overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    /// Position of the data point
    pub position: LatLng,
    /// Weight of the data point, in `[0, max_intensity]`
    pub intensity: f64,
}

impl HeatPoint {
    pub fn new(position: LatLng, intensity: f64) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// Rendering parameters for a heat overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayOptions {
    /// Radius of influence for each data point (in pixels)
    pub radius: u32,
    /// Blur factor for smoother appearance
    pub blur: f64,
    /// Intensity that maps to full heat
    pub max_intensity: f64,
}

impl OverlayOptions {
    pub fn with_radius(radius: u32) -> Self {
        Self {
            radius,
            ..Default::default()
        }
    }
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            radius: 25,
            blur: DEFAULT_BLUR,
            max_intensity: HEAT_MODIFIER,
        }
    }
}

/// Heat over a viewport, one cell per `cell_size` pixels.
///
/// Cells hold accumulated intensity divided by the overlay's
/// `max_intensity`, saturating at 1.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatGrid {
    pub width: usize,
    pub height: usize,
    pub cell_size: f64,
    cells: Vec<f64>,
}

impl HeatGrid {
    fn new(width: usize, height: usize, cell_size: f64) -> Self {
        Self {
            width,
            height,
            cell_size,
            cells: vec![0.0; width * height],
        }
    }

    pub fn get(&self, col: usize, row: usize) -> Option<f64> {
        if col < self.width && row < self.height {
            self.cells.get(row * self.width + col).copied()
        } else {
            None
        }
    }

    /// Largest accumulated value in the grid
    pub fn peak(&self) -> f64 {
        self.cells.iter().copied().fold(0.0, f64::max)
    }

    /// Number of cells with any heat at all
    pub fn hot_cells(&self) -> usize {
        self.cells.iter().filter(|value| **value > 0.0).count()
    }
}

/// A heat overlay: the points of one density result plus how to draw them
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapLayer {
    points: Vec<HeatPoint>,
    options: OverlayOptions,
}

impl HeatmapLayer {
    pub fn new(points: Vec<HeatPoint>, options: OverlayOptions) -> Self {
        Self { points, options }
    }

    pub fn points(&self) -> &[HeatPoint] {
        &self.points
    }

    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    pub fn radius(&self) -> u32 {
        self.options.radius
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Highest point intensity in the layer
    pub fn peak_intensity(&self) -> f64 {
        self.points
            .iter()
            .map(|point| point.intensity)
            .fold(0.0, f64::max)
    }

    /// Rasterizes the layer over the viewport with a Gaussian falloff
    pub fn rasterize(&self, viewport: &Viewport) -> HeatGrid {
        let radius = f64::from(self.options.radius.max(1));
        let cell_size = radius / 2.0;
        let grid_width = (viewport.size.x / cell_size).ceil().max(0.0) as usize;
        let grid_height = (viewport.size.y / cell_size).ceil().max(0.0) as usize;

        let mut grid = HeatGrid::new(grid_width, grid_height, cell_size);
        if self.points.is_empty() || grid_width == 0 || grid_height == 0 {
            return grid;
        }

        // Project once; points far outside the viewport never reach a cell
        let projected: Vec<(Point, f64)> = self
            .points
            .iter()
            .filter(|point| point.intensity > 0.0)
            .map(|point| (viewport.lat_lng_to_pixel(&point.position), point.intensity))
            .filter(|(pixel, _)| {
                pixel.x >= -radius
                    && pixel.y >= -radius
                    && pixel.x <= viewport.size.x + radius
                    && pixel.y <= viewport.size.y + radius
            })
            .collect();

        let blur = self.options.blur.max(f64::EPSILON);
        let max_intensity = self.options.max_intensity.max(f64::EPSILON);
        for row in 0..grid_height {
            for col in 0..grid_width {
                let cell_center = Point::new(
                    col as f64 * cell_size + cell_size / 2.0,
                    row as f64 * cell_size + cell_size / 2.0,
                );

                let mut total_intensity = 0.0;
                for (pixel, intensity) in &projected {
                    let distance = cell_center.distance_to(pixel);
                    if distance <= radius {
                        let influence = (-distance * distance / (2.0 * blur * blur)).exp();
                        total_intensity += intensity * influence;
                    }
                }

                grid.cells[row * grid_width + col] = (total_intensity / max_intensity).min(1.0);
            }
        }

        grid
    }
}
