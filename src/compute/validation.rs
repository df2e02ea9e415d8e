//! Validation for geographic coordinates, rectangles and resolutions.

use crate::error::{CellGroupError, Result};
use geo::{Point, Rect};

/// Validates a 2D point has valid longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use cellgroup::compute::validation::validate_geographic_point;
/// use geo::Point;
///
/// let seoul = Point::new(126.9780, 37.5665);
/// assert!(validate_geographic_point(&seoul).is_ok());
///
/// let invalid = Point::new(200.0, 37.0);
/// assert!(validate_geographic_point(&invalid).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    let (x, y) = (point.x(), point.y());

    if !x.is_finite() {
        return Err(CellGroupError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            x
        )));
    }

    if !y.is_finite() {
        return Err(CellGroupError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            y
        )));
    }

    if !(-180.0..=180.0).contains(&x) {
        return Err(CellGroupError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            x
        )));
    }

    if !(-90.0..=90.0).contains(&y) {
        return Err(CellGroupError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            y
        )));
    }

    Ok(())
}

/// Validates multiple points, reporting the index of the first bad one.
pub fn validate_points(points: &[Point]) -> Result<()> {
    for (idx, point) in points.iter().enumerate() {
        validate_geographic_point(point).map_err(|e| {
            CellGroupError::InvalidInput(format!("Point at index {}: {}", idx, e))
        })?;
    }
    Ok(())
}

/// Validates both corners of a rectangle.
pub fn validate_rect(rect: &Rect) -> Result<()> {
    validate_geographic_point(&Point::from(rect.min()))
        .map_err(|e| CellGroupError::InvalidInput(format!("Rect min corner: {}", e)))?;
    validate_geographic_point(&Point::from(rect.max()))
        .map_err(|e| CellGroupError::InvalidInput(format!("Rect max corner: {}", e)))?;
    Ok(())
}

/// Validates a resolution against a tiling's supported maximum.
pub fn validate_resolution(resolution: u8, max: u8) -> Result<()> {
    if resolution > max {
        return Err(CellGroupError::InvalidResolution { resolution, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn test_valid_geographic_point() {
        let seoul = Point::new(126.9780, 37.5665);
        assert!(validate_geographic_point(&seoul).is_ok());

        let gangnam = Point::new(127.0276, 37.4979);
        assert!(validate_geographic_point(&gangnam).is_ok());

        // Edge cases
        assert!(validate_geographic_point(&Point::new(180.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(-180.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(0.0, 90.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(0.0, -90.0)).is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(validate_geographic_point(&Point::new(180.1, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-200.0, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, 90.1)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, -95.0)).is_err());
    }

    #[test]
    fn test_non_finite_coordinates() {
        assert!(validate_geographic_point(&Point::new(f64::NAN, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, f64::NAN)).is_err());
        assert!(validate_geographic_point(&Point::new(f64::INFINITY, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, f64::NEG_INFINITY)).is_err());
    }

    #[test]
    fn test_validate_multiple_points() {
        let points = vec![
            Point::new(126.97, 37.56),
            Point::new(999.0, 37.0), // Invalid
        ];
        let err = validate_points(&points).unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_validate_rect() {
        let rect = Rect::new(coord! { x: 127.035, y: 37.485 }, coord! { x: 127.065, y: 37.515 });
        assert!(validate_rect(&rect).is_ok());

        let rect = Rect::new(coord! { x: f64::NAN, y: 37.485 }, coord! { x: 127.065, y: 37.515 });
        assert!(validate_rect(&rect).is_err());
    }

    #[test]
    fn test_validate_resolution() {
        assert!(validate_resolution(0, 15).is_ok());
        assert!(validate_resolution(15, 15).is_ok());
        assert!(matches!(
            validate_resolution(16, 15),
            Err(CellGroupError::InvalidResolution {
                resolution: 16,
                max: 15
            })
        ));
    }
}
