//! Coordinates of WKT geometries

use geo::{Coord, Geometry};
use std::str::FromStr;
use wkt::Wkt;

#[derive(Debug, thiserror::Error)]
pub enum WktError {
    #[error("Invalid WKT: {0}")]
    Parse(String),

    #[error("Unsupported WKT geometry type")]
    Unsupported,

    #[error("WKT geometry has no coordinates")]
    Empty,
}

/// First coordinate of a point, line string, multi point or polygon (exterior ring)
pub fn first_coordinate(text: &str) -> Result<Coord<f64>, WktError> {
    let parsed = Wkt::<f64>::from_str(text.trim()).map_err(|e| WktError::Parse(e.to_string()))?;
    let geometry = Geometry::<f64>::try_from(parsed).map_err(|e| WktError::Parse(e.to_string()))?;

    let first = match &geometry {
        Geometry::Point(point) => Some(point.0),
        Geometry::LineString(line) => line.0.first().copied(),
        Geometry::MultiPoint(points) => points.0.first().map(|point| point.0),
        Geometry::Polygon(polygon) => polygon.exterior().0.first().copied(),
        _ => return Err(WktError::Unsupported),
    };
    first.ok_or(WktError::Empty)
}

#[inline]
pub fn wkt_x(text: &str) -> Result<f64, WktError> {
    Ok(first_coordinate(text)?.x)
}

#[inline]
pub fn wkt_y(text: &str) -> Result<f64, WktError> {
    Ok(first_coordinate(text)?.y)
}
