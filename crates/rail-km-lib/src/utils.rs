//! Planar geometry helpers for projected (meter based) coordinates

use geo::{Coord, Line};

/// Conversion factor from a kilometer geocode to meters
pub const METERS_PER_KILOMETER: f64 = 1000.0;

/// Euclidean distance between two planar coordinates in meters
#[inline(always)]
pub fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let delta = b - a;
    delta.x.hypot(delta.y)
}

/// Scalar projection factor of `point` onto the line through `line.start` and `line.end`
///
/// `0.0` is the start of the line and `1.0` its end. Values outside `[0, 1]` mean the
/// perpendicular foot lies beyond one of the endpoints. A zero-length line yields `0.0`.
#[inline(always)]
pub fn projection_factor(point: Coord<f64>, line: Line<f64>) -> f64 {
    let delta = line.delta();
    let length_squared = delta.x * delta.x + delta.y * delta.y;
    if length_squared == 0.0 {
        return 0.0;
    }

    let offset = point - line.start;
    (offset.x * delta.x + offset.y * delta.y) / length_squared
}

/// Point at `factor` along `line` (`start + factor * (end - start)`)
#[inline(always)]
pub fn project_point(line: Line<f64>, factor: f64) -> Coord<f64> {
    line.start + line.delta() * factor
}

/// Check that both ordinates are finite numbers
#[inline(always)]
pub fn is_finite_coord(coord: &Coord<f64>) -> bool {
    coord.x.is_finite() && coord.y.is_finite()
}
