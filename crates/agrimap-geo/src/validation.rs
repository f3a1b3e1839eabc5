use agrimap_core::error::{AgrimapError, Result};
use agrimap_core::models::Point;

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Zero-based index of the offending point
    pub index: usize,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, index: usize, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { index, reason });
    }

    /// Convert into a `Result`, reporting the first error
    pub fn into_result(self) -> Result<()> {
        match self.errors.into_iter().next() {
            None => Ok(()),
            Some(first) => {
                Err(AgrimapError::InvalidCoordinate { index: first.index, reason: first.reason })
            }
        }
    }
}

/// Validate the coordinates of a boundary
pub fn validate_boundary(points: &[Point]) -> ValidationResult {
    let mut result = ValidationResult::valid();

    for (i, point) in points.iter().enumerate() {
        if !point.lat.is_finite() || !point.lng.is_finite() {
            result.add_error(i, "Coordinates must be finite".to_string());
            continue;
        }

        if !(-90.0..=90.0).contains(&point.lat) {
            result.add_error(i, format!("Latitude {} is outside [-90, 90]", point.lat));
        }

        if !(-180.0..=180.0).contains(&point.lng) {
            result.add_error(i, format!("Longitude {} is outside [-180, 180]", point.lng));
        }

        if i > 0 && points[i - 1] == *point {
            result.add_error(i, format!("Point repeats point {}", i));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrimap_core::models::DemoFarm;

    #[test]
    fn test_demo_farm_is_valid() {
        let result = validate_boundary(&DemoFarm::shivapur().boundary);
        assert!(result.is_valid);
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let points = vec![Point::new(91.0, 0.0), Point::new(0.0, -181.0), Point::new(0.0, 0.0)];
        let result = validate_boundary(&points);

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].index, 0);
        assert_eq!(result.errors[1].index, 1);
    }

    #[test]
    fn test_non_finite_coordinate() {
        let points = vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)];
        let err = validate_boundary(&points).into_result().unwrap_err();
        assert!(matches!(err, AgrimapError::InvalidCoordinate { index: 1, .. }));
    }

    #[test]
    fn test_consecutive_duplicate() {
        let points = vec![Point::new(1.0, 1.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        let result = validate_boundary(&points);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].index, 1);
    }
}
