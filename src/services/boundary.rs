//! Circular zone boundary approximation.
//!
//! Converts a zone's center and radius into a closed polygon ring using an
//! equirectangular planar approximation: one fixed meters-per-degree scale
//! per axis, no great-circle math. Accurate to well under a meter at city
//! scale; the distortion grows near the poles and for very large radii,
//! which is an accepted limitation of this projection.

use crate::api::GeoPoint;

/// Meters per degree of longitude at the equator.
pub const METERS_PER_DEGREE_LONGITUDE: f64 = 111_320.0;
/// Meters per degree of latitude.
pub const METERS_PER_DEGREE_LATITUDE: f64 = 110_540.0;
/// Default number of segments used to approximate a circle.
pub const DEFAULT_RING_STEPS: u32 = 80;

/// Error type for boundary geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// Radius must be a strictly positive, finite number of meters.
    #[error("Invalid radius: {radius_meters} m (must be positive)")]
    InvalidRadius { radius_meters: f64 },

    /// At least 3 segments are needed to form a polygon.
    #[error("Invalid resolution: {steps} steps (minimum is 3)")]
    InvalidResolution { steps: u32 },
}

/// Approximate a circle as a closed polygon ring.
///
/// Produces `steps + 1` vertices: one per segment starting due east of the
/// center and sweeping counterclockwise, plus a repeat of the first vertex
/// so the ring closes exactly.
///
/// # Arguments
/// * `center` - Circle center
/// * `radius_meters` - Circle radius in meters, must be positive
/// * `steps` - Number of segments, must be at least 3
pub fn circle_ring(
    center: GeoPoint,
    radius_meters: f64,
    steps: u32,
) -> Result<Vec<GeoPoint>, GeometryError> {
    if !radius_meters.is_finite() || radius_meters <= 0.0 {
        return Err(GeometryError::InvalidRadius { radius_meters });
    }
    if steps < 3 {
        return Err(GeometryError::InvalidResolution { steps });
    }

    let mut ring = Vec::with_capacity(steps as usize + 1);
    for i in 0..steps {
        let angle_deg = (i as f64) * 360.0 / (steps as f64);
        let rad = angle_deg.to_radians();
        let longitude = center.longitude + (radius_meters / METERS_PER_DEGREE_LONGITUDE) * rad.cos();
        let latitude = center.latitude + (radius_meters / METERS_PER_DEGREE_LATITUDE) * rad.sin();
        // Vertices may leave the canonical coordinate ranges for centers
        // near the antimeridian; no wrapping is applied.
        ring.push(GeoPoint {
            latitude,
            longitude,
        });
    }

    let first = ring[0];
    ring.push(first);

    Ok(ring)
}
