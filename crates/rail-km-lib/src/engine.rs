//! Linear referencing engine
//!
//! Turns a query point plus an unordered set of reference markers into a kilometer
//! value per line. The steps are:
//!
//! 1. Partition markers by line id
//! 2. Sort every partition by geocode
//! 3. Pair geocode-adjacent markers into segments (`n` markers give `n - 1` segments)
//! 4. Project the point on each segment and keep the **first** one (in geocode order)
//!    whose projection factor lies in `[0, 1]`
//! 5. Kilometer value = start geocode in meters + distance from start to the projection
//!
//! Lines without a containing segment are left out of the result.

use crate::{KmError, ReferenceMarker, Result, Segment, utils};
use geo::Coord;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Kilometer position of a point on one line
#[derive(Clone, Debug, PartialEq)]
pub struct LineKilometer {
    /// Line identifier (kmLint)
    pub line_id: String,
    /// Kilometer value expressed in meters
    pub kilometer_value_meters: f64,
}

/// Ascending geocode order, ties broken on position so the order never depends on input order
fn marker_order(a: &&ReferenceMarker, b: &&ReferenceMarker) -> Ordering {
    a.geocode()
        .total_cmp(&b.geocode())
        .then_with(|| a.position().x.total_cmp(&b.position().x))
        .then_with(|| a.position().y.total_cmp(&b.position().y))
}

/// Partition markers by line id, each partition sorted by ascending geocode
pub fn group_by_line(markers: &[ReferenceMarker]) -> BTreeMap<&str, Vec<&ReferenceMarker>> {
    #[cfg(feature = "profiling")]
    profiling::scope!("engine::group_by_line");

    let mut groups: BTreeMap<&str, Vec<&ReferenceMarker>> = BTreeMap::new();
    for marker in markers {
        groups.entry(marker.line_id()).or_default().push(marker);
    }
    for group in groups.values_mut() {
        group.sort_by(marker_order);
    }
    groups
}

/// Build the segments between consecutive markers of one sorted partition
pub fn build_segments<'a>(sorted: &[&'a ReferenceMarker]) -> Vec<Segment<'a>> {
    sorted
        .windows(2)
        .map(|pair| Segment::new(pair[0], pair[1]))
        .collect()
}

/// Kilometer value (meters) of `point` on a single sorted line partition
///
/// Returns `None` when no segment contains the projection or the value is not a number.
pub fn locate_on_line(point: Coord<f64>, sorted: &[&ReferenceMarker]) -> Option<f64> {
    build_segments(sorted)
        .iter()
        .find_map(|segment| {
            let projection = segment.project(point);
            projection
                .is_within()
                .then(|| segment.kilometer_value(&projection))
        })
        .filter(|value| !value.is_nan())
}

/// Kilometer values of `point` on every line covered by `markers`
///
/// The result holds at most one entry per line, ordered by line id.
///
/// # Errors
/// [`KmError::InvalidCoordinate`] if the query point is not finite.
pub fn locate(point: Coord<f64>, markers: &[ReferenceMarker]) -> Result<Vec<LineKilometer>> {
    #[cfg(feature = "profiling")]
    profiling::scope!("engine::locate");

    if !utils::is_finite_coord(&point) {
        return Err(KmError::InvalidCoordinate {
            x: point.x,
            y: point.y,
        });
    }

    let groups = group_by_line(markers);
    tracing::debug!(
        "Locating ({}, {}) against {} markers on {} lines",
        point.x,
        point.y,
        markers.len(),
        groups.len()
    );

    let result: Vec<LineKilometer> = groups
        .into_iter()
        .filter_map(|(line_id, sorted)| {
            let value = locate_on_line(point, &sorted);
            if value.is_none() {
                tracing::trace!("No containing segment on line {line_id}");
            }
            value.map(|kilometer_value_meters| LineKilometer {
                line_id: line_id.to_string(),
                kilometer_value_meters,
            })
        })
        .collect();

    Ok(result)
}

/// Kilometer value for `line_id` in an engine result, if present
pub fn find_line(results: &[LineKilometer], line_id: &str) -> Option<f64> {
    results
        .iter()
        .find(|km| km.line_id == line_id)
        .map(|km| km.kilometer_value_meters)
}
