//! Geocoded reference markers along named rail lines

use crate::{KmError, Result, utils};
use geo::Coord;

/// A surveyed reference point (hectometer sign) on a named line
///
/// Markers are sourced fresh for every query and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceMarker {
    /// Identifier of the line (kmLint) this marker belongs to
    line_id: String,
    /// Position along the line in kilometers
    geocode: f64,
    /// Planar position in the projected coordinate system (meters)
    position: Coord<f64>,
}

impl ReferenceMarker {
    /// Create a new marker
    ///
    /// # Returns
    /// The marker, or [`KmError::InvalidMarker`] if the geocode or a coordinate is not finite
    pub fn new(line_id: impl Into<String>, geocode: f64, position: Coord<f64>) -> Result<Self> {
        let line_id = line_id.into();

        if !geocode.is_finite() {
            return Err(KmError::InvalidMarker {
                line_id,
                reason: format!("geocode {geocode} is not a finite number"),
            });
        }
        if !utils::is_finite_coord(&position) {
            return Err(KmError::InvalidMarker {
                line_id,
                reason: format!("position ({}, {}) is not finite", position.x, position.y),
            });
        }

        Ok(Self {
            line_id,
            geocode,
            position,
        })
    }

    /// Create a marker from separate ordinates
    pub fn from_xy(line_id: impl Into<String>, geocode: f64, x: f64, y: f64) -> Result<Self> {
        Self::new(line_id, geocode, Coord { x, y })
    }

    #[inline]
    pub fn line_id(&self) -> &str {
        &self.line_id
    }

    /// Geocode in kilometers
    #[inline]
    pub fn geocode(&self) -> f64 {
        self.geocode
    }

    /// Geocode converted to meters
    #[inline]
    pub fn geocode_meters(&self) -> f64 {
        self.geocode * utils::METERS_PER_KILOMETER
    }

    #[inline]
    pub fn position(&self) -> Coord<f64> {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_creation() {
        let marker = ReferenceMarker::from_xy("034", 12.3, 155000.0, 463000.0).unwrap();
        assert_eq!(marker.line_id(), "034");
        assert_eq!(marker.geocode(), 12.3);
        assert_eq!(
            marker.position(),
            Coord {
                x: 155000.0,
                y: 463000.0
            }
        );
    }

    #[test]
    fn test_geocode_meters() {
        let marker = ReferenceMarker::from_xy("A", 5.0, 0.0, 0.0).unwrap();
        assert_eq!(marker.geocode_meters(), 5000.0);
    }

    #[test]
    fn test_non_finite_geocode_fails() {
        let result = ReferenceMarker::from_xy("A", f64::NAN, 0.0, 0.0);
        assert!(matches!(result, Err(KmError::InvalidMarker { .. })));
    }

    #[test]
    fn test_non_finite_position_fails() {
        let result = ReferenceMarker::from_xy("A", 1.0, f64::INFINITY, 0.0);
        assert!(matches!(result, Err(KmError::InvalidMarker { .. })));
    }
}
