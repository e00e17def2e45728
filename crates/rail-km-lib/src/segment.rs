//! Segments between geocode-adjacent markers and point projection onto them

use crate::{ReferenceMarker, utils};
use geo::{Coord, Line};

/// Line piece between two geocode-adjacent markers of the same line
///
/// Segments borrow their markers and only live for the duration of one query.
#[derive(Clone, Copy, Debug)]
pub struct Segment<'a> {
    /// Marker with the lower geocode
    pub start: &'a ReferenceMarker,
    /// Marker with the next higher geocode
    pub end: &'a ReferenceMarker,
}

/// Relationship between a query point and one segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionResult {
    /// Normalized position of the perpendicular foot (0 = start, 1 = end)
    pub factor: f64,
    /// Perpendicular foot of the query point on the segment's line
    pub projected_point: Coord<f64>,
    /// Distance in meters from the segment start to `projected_point`
    pub distance: f64,
}

impl ProjectionResult {
    /// Whether the perpendicular foot lies within the segment (endpoints included)
    #[inline]
    pub fn is_within(&self) -> bool {
        (0.0..=1.0).contains(&self.factor)
    }
}

impl<'a> Segment<'a> {
    /// Create a new segment
    pub fn new(start: &'a ReferenceMarker, end: &'a ReferenceMarker) -> Self {
        Self { start, end }
    }

    /// The segment as a planar line from start to end marker
    #[inline]
    pub fn line(&self) -> Line<f64> {
        Line::new(self.start.position(), self.end.position())
    }

    /// Project `point` onto the segment's line
    ///
    /// The factor is `0.0` for a segment whose markers share a position.
    pub fn project(&self, point: Coord<f64>) -> ProjectionResult {
        let line = self.line();
        let factor = utils::projection_factor(point, line);
        let projected_point = utils::project_point(line, factor);
        ProjectionResult {
            factor,
            projected_point,
            distance: utils::distance(line.start, projected_point),
        }
    }

    /// Kilometer value in meters of a projection onto this segment
    ///
    /// The start marker's geocode (converted to meters) plus the in-segment offset.
    #[inline]
    pub fn kilometer_value(&self, projection: &ProjectionResult) -> f64 {
        self.start.geocode_meters() + projection.distance
    }
}
