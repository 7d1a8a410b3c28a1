/// Zoom thresholds and the radius used below each one
const RADIUS_STEPS: [(f64, u32); 3] = [(5.0, 10), (10.0, 20), (20.0, 30)];

/// Radius at and past the last threshold
const MAX_RADIUS: u32 = 40;

/// Heat blob radius, in pixels, for a zoom level.
///
/// Defined for every input; a NaN zoom falls through to the largest radius.
pub fn radius_for(zoom: f64) -> u32 {
    RADIUS_STEPS
        .iter()
        .find(|(threshold, _)| zoom < *threshold)
        .map(|(_, radius)| *radius)
        .unwrap_or(MAX_RADIUS)
}
