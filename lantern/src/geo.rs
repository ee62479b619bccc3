use crate::error::{LanternError, Result};

/// A WGS-84 coordinate pair. Distance in this service is an axis-aligned
/// bounding box in coordinate degrees, not geodesic distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Containment test for the square of half-side `radius_deg` centered on
/// `center`. Boundary points count as inside.
pub fn within_radius(center: GeoPoint, radius_deg: f64, point: GeoPoint) -> bool {
    (point.latitude - center.latitude).abs() <= radius_deg
        && (point.longitude - center.longitude).abs() <= radius_deg
}

/// Rejects non-finite or out-of-range coordinates.
pub fn validate_point(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(LanternError::InvalidArgument(format!(
            "latitude must be within [-90, 90], got {latitude}"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(LanternError::InvalidArgument(format!(
            "longitude must be within [-180, 180], got {longitude}"
        )));
    }
    Ok(())
}

/// Validates a radius query before any storage round trip, so a bad query
/// never produces partial results.
pub fn validate_query(latitude: f64, longitude: f64, radius_deg: f64) -> Result<()> {
    validate_point(latitude, longitude)?;
    if !radius_deg.is_finite() || radius_deg <= 0.0 {
        return Err(LanternError::InvalidArgument(format!(
            "radius must be a positive number of degrees, got {radius_deg}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_radius_inside() {
        let center = GeoPoint::new(10.0, 20.0);
        assert!(within_radius(center, 0.5, GeoPoint::new(10.3, 20.3)));
    }

    #[test]
    fn test_within_radius_outside_on_one_axis() {
        let center = GeoPoint::new(10.0, 20.0);
        assert!(!within_radius(center, 0.5, GeoPoint::new(10.6, 20.0)));
        assert!(!within_radius(center, 0.5, GeoPoint::new(10.0, 20.6)));
    }

    #[test]
    fn test_within_radius_boundary_is_inside() {
        let center = GeoPoint::new(0.0, 0.0);
        assert!(within_radius(center, 0.5, GeoPoint::new(0.5, -0.5)));
    }

    #[test]
    fn test_within_radius_negative_coordinates() {
        let center = GeoPoint::new(-33.9, 151.2);
        assert!(within_radius(center, 1.0, GeoPoint::new(-34.4, 150.9)));
        assert!(!within_radius(center, 1.0, GeoPoint::new(-35.1, 151.2)));
    }

    #[test]
    fn test_validate_query_accepts_normal_input() {
        assert!(validate_query(10.0, 20.0, 0.5).is_ok());
        assert!(validate_query(-90.0, 180.0, 0.01).is_ok());
    }

    #[test]
    fn test_validate_query_rejects_bad_radius() {
        assert!(validate_query(10.0, 20.0, 0.0).is_err());
        assert!(validate_query(10.0, 20.0, -1.0).is_err());
        assert!(validate_query(10.0, 20.0, f64::NAN).is_err());
        assert!(validate_query(10.0, 20.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_point_is_radius_free() {
        assert!(validate_point(52.52, 13.405).is_ok());
        assert!(validate_point(52.52, 200.0).is_err());
    }

    #[test]
    fn test_validate_query_rejects_out_of_range_coordinates() {
        assert!(validate_query(90.5, 0.0, 0.5).is_err());
        assert!(validate_query(-91.0, 0.0, 0.5).is_err());
        assert!(validate_query(0.0, 180.5, 0.5).is_err());
        assert!(validate_query(0.0, -181.0, 0.5).is_err());
        assert!(validate_query(f64::NAN, 0.0, 0.5).is_err());
    }
}
